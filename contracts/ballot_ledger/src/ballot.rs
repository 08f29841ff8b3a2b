//! Ballot store: one immutable vote record per voter identifier, plus the
//! per-candidate running tally and the candidate index behind `get_results`.
//!
//! The index is one persistent entry per position, `(CANDS, n)`, with the
//! length in instance storage. A new candidate costs one small write however
//! many candidates came before it.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Bytes, BytesN, Env, Symbol, Vec};

use crate::registry::VoterId;
use crate::ContractError;

// ── Storage key prefixes ─────────────────────────────────────────────────────

const RECORD: Symbol = symbol_short!("VOTE_REC");
const TALLY: Symbol = symbol_short!("TALLY");
const CANDIDATES: Symbol = symbol_short!("CANDS");
const CANDIDATE_COUNT: Symbol = symbol_short!("CAND_CNT");

/// Upper bound on the page size `results` will return.
pub const MAX_RESULTS_PAGE: u32 = 50;

/// Opaque 32-byte ballot choice.
pub type CandidateId = BytesN<32>;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub candidate_id: CandidateId,
    /// Proof blob exactly as submitted; never interpreted here.
    pub proof: Bytes,
    pub cast_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub votes: u64,
}

fn record_key(voter_id: &VoterId) -> (Symbol, VoterId) {
    (RECORD, voter_id.clone())
}

fn tally_key(candidate_id: &CandidateId) -> (Symbol, CandidateId) {
    (TALLY, candidate_id.clone())
}

pub fn record_of(env: &Env, voter_id: &VoterId) -> Option<VoteRecord> {
    env.storage().persistent().get(&record_key(voter_id))
}

pub fn has_record(env: &Env, voter_id: &VoterId) -> bool {
    env.storage().persistent().has(&record_key(voter_id))
}

/// Fails with `DuplicateVote` if a record already exists for `voter_id`.
pub(crate) fn ensure_absent(env: &Env, voter_id: &VoterId) -> Result<(), ContractError> {
    if has_record(env, voter_id) {
        return Err(ContractError::DuplicateVote);
    }
    Ok(())
}

/// Write the record and count it towards its candidate.
///
/// Must run inside the same invocation as `registry::mark_voted`.
pub(crate) fn append(
    env: &Env,
    voter_id: &VoterId,
    record: &VoteRecord,
) -> Result<(), ContractError> {
    ensure_absent(env, voter_id)?;

    let key = record_key(voter_id);
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);

    let tally_key = tally_key(&record.candidate_id);
    let current = tally_for(env, &record.candidate_id);
    if current == 0 {
        index_candidate(env, &record.candidate_id);
    }
    env.storage()
        .persistent()
        .set(&tally_key, &current.saturating_add(1));
    ttl::extend_persistent(env, &tally_key);

    Ok(())
}

fn index_key(position: u32) -> (Symbol, u32) {
    (CANDIDATES, position)
}

fn index_candidate(env: &Env, candidate_id: &CandidateId) {
    let position = candidate_count(env);
    let key = index_key(position);
    env.storage().persistent().set(&key, candidate_id);
    ttl::extend_persistent(env, &key);
    env.storage()
        .instance()
        .set(&CANDIDATE_COUNT, &position.saturating_add(1));
}

fn indexed_candidate(env: &Env, position: u32) -> Option<CandidateId> {
    env.storage().persistent().get(&index_key(position))
}

/// Number of candidates with at least one vote.
pub fn candidate_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&CANDIDATE_COUNT)
        .unwrap_or(0)
}

/// Exact number of stored records naming `candidate_id`.
pub fn tally_for(env: &Env, candidate_id: &CandidateId) -> u64 {
    env.storage()
        .persistent()
        .get(&tally_key(candidate_id))
        .unwrap_or(0)
}

/// Tallies of the candidates at index positions `start..start + limit`, in
/// first-vote order. `limit` is clamped to [`MAX_RESULTS_PAGE`]; a `start`
/// past the end yields an empty page.
pub fn results(env: &Env, start: u32, limit: u32) -> Vec<CandidateTally> {
    let end = start
        .saturating_add(limit.min(MAX_RESULTS_PAGE))
        .min(candidate_count(env));

    let mut out = Vec::new(env);
    for position in start..end {
        if let Some(candidate_id) = indexed_candidate(env, position) {
            let votes = tally_for(env, &candidate_id);
            out.push_back(CandidateTally {
                candidate_id,
                votes,
            });
        }
    }
    out
}
