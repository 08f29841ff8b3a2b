#![no_std]

//! # Ballot Ledger
//!
//! An anonymised ballot-recording contract. Votes are keyed by a
//! pseudonymous 32-byte voter identifier instead of an account, and each
//! identifier can be recorded at most once.
//!
//! - **Voter registry** (`registry`): `NotRegistered → Registered → Voted`,
//!   monotonic, `Voted` terminal.
//! - **Ballot store** (`ballot`): one immutable [`VoteRecord`] per
//!   identifier, a running per-candidate tally and a candidate index.
//! - **Proof gate** (`verifier`): every cast is checked by an external
//!   [`ProofVerifier`] contract before anything is written.
//! - **Identifier resolution** (`identity`): supplied by the submitter, or
//!   derived from the submitter address when the deployment opts in.
//! - **Policy**: open voting or registration-gated voting, chosen at
//!   initialisation via [`LedgerConfig`].
//!
//! Every mutating entry point validates fully before its first write, so a
//! returned error leaves no partial state behind.

pub mod ballot;
pub mod config;
pub mod events;
pub mod identity;
pub mod registry;
pub mod verifier;

use common::{pausable, ttl, CommonError};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, Map, Symbol,
    Vec,
};

pub use ballot::{CandidateId, CandidateTally, VoteRecord, MAX_RESULTS_PAGE};
pub use config::{LedgerConfig, VoterIdSource, VotingPolicy};
pub use events::VoteCastEvent;
pub use registry::{VoterId, VotingStatus};
pub use verifier::{ProofVerifier, ProofVerifierClient};

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CLOSED: Symbol = symbol_short!("CLOSED");

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// Registration of an identifier that is already registered or has voted.
    AlreadyProcessed = 4,
    DuplicateVote = 5,
    InvalidProof = 6,
    NotFound = 7,
    /// Registration-gated deployment and the identifier was never registered.
    NotRegistered = 8,
    MissingVoterId = 9,
    BallotClosed = 10,
    Paused = 11,
    InvalidInput = 12,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::RecordNotFound => ContractError::NotFound,
            CommonError::InvalidInput => ContractError::InvalidInput,
            CommonError::Paused => ContractError::Paused,
        }
    }
}

// ── Public return types ───────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerTotals {
    /// Successful registrations ever made.
    pub registered: u64,
    /// Accepted votes; always equal to the sum of all candidate tallies.
    pub voted: u64,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct BallotLedgerContract;

#[contractimpl]
impl BallotLedgerContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Fix the administrator and deployment configuration. One-shot.
    ///
    /// * `admin` : the only identity allowed to register voters, pause and
    ///              close the ballot. Never reassigned.
    /// * `config`: voting policy, identifier source and verifier contract.
    pub fn initialize(
        env: Env,
        admin: Address,
        config: LedgerConfig,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        config::store(&env, &config);
        env.storage().instance().set(&CLOSED, &false);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, &admin, &config);

        Ok(())
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Admit `voter_id`: `NotRegistered → Registered`.
    pub fn register_voter(
        env: Env,
        caller: Address,
        voter_id: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_accepting(&env)?;

        registry::register(&env, &voter_id)?;
        ttl::extend_instance(&env);
        events::publish_voter_registered(&env, &voter_id);

        Ok(())
    }

    /// Admit a batch of identifiers. All-or-nothing: if any identifier is
    /// already registered, has voted, or repeats within the batch, nothing
    /// is written.
    ///
    /// Returns the number of identifiers registered.
    pub fn register_voters(
        env: Env,
        caller: Address,
        voter_ids: Vec<BytesN<32>>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_accepting(&env)?;

        if voter_ids.is_empty() {
            return Err(ContractError::InvalidInput);
        }

        let mut seen: Map<BytesN<32>, bool> = Map::new(&env);
        for voter_id in voter_ids.iter() {
            if seen.contains_key(voter_id.clone()) {
                return Err(ContractError::AlreadyProcessed);
            }
            registry::ensure_registrable(&env, &voter_id)?;
            seen.set(voter_id, true);
        }

        for voter_id in voter_ids.iter() {
            registry::register(&env, &voter_id)?;
            events::publish_voter_registered(&env, &voter_id);
        }
        ttl::extend_instance(&env);

        Ok(voter_ids.len())
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Record a vote.
    ///
    /// 1. Resolve the voter identifier (`voter_id` is required under
    ///    `VoterIdSource::Supplied`, optional under `SubmitterDerived`).
    /// 2. Reject `DuplicateVote`, then the registration gate if configured.
    /// 3. Ask the configured verifier about `(voter_id, candidate_id, proof)`.
    /// 4. Write the record, bump the tally and mark the identifier `Voted`.
    /// 5. Publish and return the [`VoteCastEvent`].
    pub fn cast_vote(
        env: Env,
        submitter: Address,
        voter_id: Option<BytesN<32>>,
        candidate_id: BytesN<32>,
        proof: Bytes,
    ) -> Result<VoteCastEvent, ContractError> {
        Self::require_initialized(&env)?;
        submitter.require_auth();
        Self::require_accepting(&env)?;

        let config = Self::load_config(&env)?;
        let voter_id = identity::resolve(&env, config.id_source, &submitter, voter_id)?;

        registry::ensure_can_vote(&env, &voter_id, config.policy)?;
        ballot::ensure_absent(&env, &voter_id)?;
        verifier::require_valid_proof(&env, &config.verifier, &voter_id, &candidate_id, &proof)?;

        let record = VoteRecord {
            candidate_id: candidate_id.clone(),
            proof,
            cast_at: env.ledger().timestamp(),
        };
        ballot::append(&env, &voter_id, &record)?;
        registry::mark_voted(&env, &voter_id, config.policy)?;
        ttl::extend_instance(&env);

        Ok(events::publish_vote_cast(
            &env,
            &voter_id,
            &candidate_id,
            &submitter,
        ))
    }

    // ── Admin ─────────────────────────────────────────────────────────────────

    /// Permanently stop registration and voting. Queries keep working.
    pub fn close_ballot(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        if Self::closed(&env) {
            return Err(ContractError::BallotClosed);
        }

        env.storage().instance().set(&CLOSED, &true);
        events::publish_ballot_closed(&env, &caller, registry::voted_count(&env));

        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        pausable::pause(&env, &caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        pausable::unpause(&env, &caller);
        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn status_of(env: Env, voter_id: BytesN<32>) -> VotingStatus {
        registry::status_of(&env, &voter_id)
    }

    pub fn has_voted(env: Env, voter_id: BytesN<32>) -> bool {
        registry::status_of(&env, &voter_id) == VotingStatus::Voted
    }

    pub fn get_vote(env: Env, voter_id: BytesN<32>) -> Result<VoteRecord, ContractError> {
        ballot::record_of(&env, &voter_id).ok_or(ContractError::NotFound)
    }

    pub fn tally_candidate(env: Env, candidate_id: BytesN<32>) -> u64 {
        ballot::tally_for(&env, &candidate_id)
    }

    /// One page of per-candidate tallies in first-vote order. At most
    /// `ballot::MAX_RESULTS_PAGE` entries are returned per call.
    pub fn get_results(env: Env, start: u32, limit: u32) -> Vec<CandidateTally> {
        ballot::results(&env, start, limit)
    }

    /// Number of candidates listed by `get_results`.
    pub fn candidate_count(env: Env) -> u32 {
        ballot::candidate_count(&env)
    }

    pub fn get_totals(env: Env) -> LedgerTotals {
        LedgerTotals {
            registered: registry::registered_count(&env),
            voted: registry::voted_count(&env),
        }
    }

    /// The identifier `submitter` would vote under with
    /// `VoterIdSource::SubmitterDerived`, for pre-registration.
    pub fn derive_voter_id(env: Env, submitter: Address) -> BytesN<32> {
        identity::derive_from_submitter(&env, &submitter)
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn is_closed(env: Env) -> bool {
        Self::closed(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Mutations are refused while paused or after close.
    fn require_accepting(env: &Env) -> Result<(), ContractError> {
        pausable::require_not_paused(env)?;
        if Self::closed(env) {
            return Err(ContractError::BallotClosed);
        }
        Ok(())
    }

    fn closed(env: &Env) -> bool {
        env.storage().instance().get(&CLOSED).unwrap_or(false)
    }

    fn load_config(env: &Env) -> Result<LedgerConfig, ContractError> {
        config::load(env).ok_or(ContractError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
