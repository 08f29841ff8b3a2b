use soroban_sdk::{Env, IntoVal, Val};

/// Ledger count below which a persistent entry is bumped (~30 days @ ~5s/ledger).
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518_400;
/// Ledger count a bumped persistent entry is extended to (~60 days).
pub const PERSISTENT_TTL_EXTEND_TO: u32 = 1_036_800;

/// Instance storage lives for the life of the deployment, so it is kept well
/// ahead of the persistent entries (~300 / ~600 days).
pub const INSTANCE_TTL_THRESHOLD: u32 = 5_184_000;
pub const INSTANCE_TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the TTL of a persistent entry that the caller just wrote or read.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance (admin, config, counters).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}
