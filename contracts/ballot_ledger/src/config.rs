//! Deployment configuration injected at `initialize`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const CONFIG: Symbol = symbol_short!("CONFIG");

/// Who may reach the `Voted` state.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VotingPolicy {
    /// Any identifier that has not voted may cast, registered or not.
    Open = 0,
    /// Only identifiers an administrator registered may cast.
    RegistrationGated = 1,
}

/// Where the voter identifier for a cast comes from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoterIdSource {
    /// The submitter passes an externally derived identifier (e.g. a nullifier).
    Supplied = 0,
    /// The identifier is a domain-separated hash of the submitter address.
    /// Linkable to the submitting account; only for deployments that accept that.
    SubmitterDerived = 1,
}

/// Everything a deployment chooses up front.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub policy: VotingPolicy,
    pub id_source: VoterIdSource,
    /// Contract implementing [`crate::verifier::ProofVerifier`].
    pub verifier: Address,
}

pub(crate) fn store(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub(crate) fn load(env: &Env) -> Option<LedgerConfig> {
    env.storage().instance().get(&CONFIG)
}
