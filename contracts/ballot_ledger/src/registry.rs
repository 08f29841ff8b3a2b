//! Voter registry: the per-identifier status state machine.
//!
//! ```text
//! NotRegistered ──register(admin)──▶ Registered ──cast──▶ Voted
//!       │                                                   ▲
//!       └──────────────cast (VotingPolicy::Open only)───────┘
//! ```
//!
//! `Voted` is terminal and no transition moves backwards. Authorisation is
//! enforced by the contract entry points; this module only owns the table.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, BytesN, Env, Symbol};

use crate::config::VotingPolicy;
use crate::ContractError;

// ── Storage key prefixes ─────────────────────────────────────────────────────

const STATUS: Symbol = symbol_short!("VSTATUS");
const REG_COUNT: Symbol = symbol_short!("REG_CNT");
const VOTE_COUNT: Symbol = symbol_short!("VOTE_CNT");

/// Pseudonymous 32-byte voter identifier.
pub type VoterId = BytesN<32>;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VotingStatus {
    NotRegistered = 0,
    Registered = 1,
    Voted = 2,
}

fn status_key(voter_id: &VoterId) -> (Symbol, VoterId) {
    (STATUS, voter_id.clone())
}

fn write_status(env: &Env, voter_id: &VoterId, status: VotingStatus) {
    let key = status_key(voter_id);
    env.storage().persistent().set(&key, &status);
    ttl::extend_persistent(env, &key);
}

fn bump_counter(env: &Env, key: &Symbol) {
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    env.storage()
        .instance()
        .set(key, &current.saturating_add(1));
}

/// Current status; identifiers never written are `NotRegistered`.
pub fn status_of(env: &Env, voter_id: &VoterId) -> VotingStatus {
    env.storage()
        .persistent()
        .get(&status_key(voter_id))
        .unwrap_or(VotingStatus::NotRegistered)
}

/// Fails with `AlreadyProcessed` unless `voter_id` is still `NotRegistered`.
pub(crate) fn ensure_registrable(env: &Env, voter_id: &VoterId) -> Result<(), ContractError> {
    match status_of(env, voter_id) {
        VotingStatus::NotRegistered => Ok(()),
        VotingStatus::Registered | VotingStatus::Voted => Err(ContractError::AlreadyProcessed),
    }
}

/// `NotRegistered → Registered`.
pub(crate) fn register(env: &Env, voter_id: &VoterId) -> Result<(), ContractError> {
    ensure_registrable(env, voter_id)?;
    write_status(env, voter_id, VotingStatus::Registered);
    bump_counter(env, &REG_COUNT);
    Ok(())
}

/// Checks that `voter_id` may move to `Voted` under `policy` without
/// touching storage. `DuplicateVote` takes precedence over the gate.
pub(crate) fn ensure_can_vote(
    env: &Env,
    voter_id: &VoterId,
    policy: VotingPolicy,
) -> Result<(), ContractError> {
    match (status_of(env, voter_id), policy) {
        (VotingStatus::Voted, _) => Err(ContractError::DuplicateVote),
        (VotingStatus::NotRegistered, VotingPolicy::RegistrationGated) => {
            Err(ContractError::NotRegistered)
        }
        _ => Ok(()),
    }
}

/// `Registered → Voted`, or `NotRegistered → Voted` under the open policy.
pub(crate) fn mark_voted(
    env: &Env,
    voter_id: &VoterId,
    policy: VotingPolicy,
) -> Result<(), ContractError> {
    ensure_can_vote(env, voter_id, policy)?;
    write_status(env, voter_id, VotingStatus::Voted);
    bump_counter(env, &VOTE_COUNT);
    Ok(())
}

/// Successful registrations ever made, including voters who have since voted.
pub fn registered_count(env: &Env) -> u64 {
    env.storage().instance().get(&REG_COUNT).unwrap_or(0)
}

/// Identifiers that reached `Voted`.
pub fn voted_count(env: &Env) -> u64 {
    env.storage().instance().get(&VOTE_COUNT).unwrap_or(0)
}
