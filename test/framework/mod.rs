//! # Ballot Ledger Testing Framework
//!
//! A reusable harness for the ballot ledger contract supporting
//! property-based testing, invariant checking, state exploration and a
//! declarative scenario DSL.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs            : TestEnv, LedgerTestHarness, snapshots, verifier doubles
//! ├── generators.rs     : Property-based test value generators
//! ├── invariants.rs     : State invariant definitions & verification
//! ├── state_explorer.rs : Systematic state-space exploration
//! └── scenario_dsl.rs   : Declarative test scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{LedgerTestHarness, TestEnv};
//!
//! let mut env = TestEnv::new();
//! let harness = LedgerTestHarness::new(&mut env, VotingPolicy::Open, VoterIdSource::Supplied);
//! let alice = harness.env.voter_id(0);
//! harness.cast(&alice, &harness.env.candidate_id(0));
//! assert_eq!(harness.client.get_totals().voted, 1);
//! ```

extern crate std;


use ballot_ledger::{
    BallotLedgerContract, BallotLedgerContractClient, CandidateTally, ContractError, LedgerConfig,
    VoteCastEvent, VoteRecord, VoterIdSource, VotingPolicy, VotingStatus, MAX_RESULTS_PAGE,
};
use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env,
};

// ── Verifier Doubles ─────────────────────────────────────────────────────────

/// Accepts every proof. Stands in for a real verifier when a test is about
/// ledger bookkeeping rather than proof checking.
#[contract]
pub struct AcceptAllVerifier;

#[contractimpl]
impl AcceptAllVerifier {
    pub fn verify(
        _env: Env,
        _voter_id: BytesN<32>,
        _candidate_id: BytesN<32>,
        _proof: Bytes,
    ) -> bool {
        true
    }
}

/// Rejects every proof.
#[contract]
pub struct RejectAllVerifier;

#[contractimpl]
impl RejectAllVerifier {
    pub fn verify(
        _env: Env,
        _voter_id: BytesN<32>,
        _candidate_id: BytesN<32>,
        _proof: Bytes,
    ) -> bool {
        false
    }
}

// ── Core Test Environment ────────────────────────────────────────────────────

/// A high-level test environment that wraps the Soroban `Env` and provides
/// contract deployment, time control, and identifier generation.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self { env }
    }

    /// Generate a fresh Soroban address.
    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deterministic voter identifier for pool slot `index`.
    pub fn voter_id(&self, index: u32) -> BytesN<32> {
        tagged_id(&self.env, 0x56, index)
    }

    /// Deterministic candidate identifier for slot `index`.
    pub fn candidate_id(&self, index: u32) -> BytesN<32> {
        tagged_id(&self.env, 0x43, index)
    }

    /// `n` distinct voter identifiers.
    pub fn voter_pool(&self, n: usize) -> std::vec::Vec<BytesN<32>> {
        (0..n as u32).map(|i| self.voter_id(i)).collect()
    }

    /// `n` distinct candidate identifiers.
    pub fn candidate_pool(&self, n: usize) -> std::vec::Vec<BytesN<32>> {
        (0..n as u32).map(|i| self.candidate_id(i)).collect()
    }

    pub fn deploy_accept_all_verifier(&self) -> Address {
        self.env.register(AcceptAllVerifier, ())
    }

    pub fn deploy_reject_all_verifier(&self) -> Address {
        self.env.register(RejectAllVerifier, ())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn tagged_id(env: &Env, tag: u8, index: u32) -> BytesN<32> {
    let mut raw = [0u8; 32];
    raw[0] = tag;
    raw[1..5].copy_from_slice(&index.to_be_bytes());
    BytesN::from_array(env, &raw)
}

// ── Ledger-Specific Harness ──────────────────────────────────────────────────

/// Pre-wired ballot ledger fixture with a verifier deployed.
///
/// Provides a higher-level API that eliminates boilerplate in ledger tests.
pub struct LedgerTestHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: BallotLedgerContractClient<'static>,
    pub contract_id: Address,
    pub admin: Address,
    pub verifier: Address,
}

impl<'a> LedgerTestHarness<'a> {
    /// Deploy and initialize a ledger backed by an accept-all verifier.
    pub fn new(env: &'a mut TestEnv, policy: VotingPolicy, id_source: VoterIdSource) -> Self {
        let verifier = env.deploy_accept_all_verifier();
        Self::with_verifier(env, policy, id_source, verifier)
    }

    /// Deploy and initialize a ledger against an already deployed verifier.
    pub fn with_verifier(
        env: &'a mut TestEnv,
        policy: VotingPolicy,
        id_source: VoterIdSource,
        verifier: Address,
    ) -> Self {
        let contract_id = env.env.register(BallotLedgerContract, ());
        let client = BallotLedgerContractClient::new(&env.env, &contract_id);
        let admin = env.generate_address();

        client.initialize(
            &admin,
            &LedgerConfig {
                policy,
                id_source,
                verifier: verifier.clone(),
            },
        );

        Self {
            env,
            client,
            contract_id,
            admin,
            verifier,
        }
    }

    /// Default opaque proof payload.
    pub fn proof(&self) -> Bytes {
        Bytes::from_array(&self.env.env, &[0x50; 8])
    }

    /// Register one identifier as the admin.
    pub fn register(&self, voter_id: &BytesN<32>) {
        self.client.register_voter(&self.admin, voter_id);
    }

    /// Register many identifiers, one call each.
    pub fn register_all(&self, voter_ids: &[BytesN<32>]) {
        for voter_id in voter_ids {
            self.register(voter_id);
        }
    }

    /// Cast under a supplied identifier from a fresh submitter account.
    pub fn cast(&self, voter_id: &BytesN<32>, candidate_id: &BytesN<32>) -> VoteCastEvent {
        let submitter = Address::generate(&self.env.env);
        self.client
            .cast_vote(&submitter, &Some(voter_id.clone()), candidate_id, &self.proof())
    }

    /// Like [`Self::cast`] but returns the contract error instead of panicking.
    pub fn try_cast(
        &self,
        voter_id: &BytesN<32>,
        candidate_id: &BytesN<32>,
    ) -> Result<VoteCastEvent, ContractError> {
        let submitter = Address::generate(&self.env.env);
        match self
            .client
            .try_cast_vote(&submitter, &Some(voter_id.clone()), candidate_id, &self.proof())
        {
            Ok(Ok(event)) => Ok(event),
            Err(Ok(e)) => Err(e),
            other => panic!("unexpected host failure: {:?}", other.err()),
        }
    }

    pub fn status(&self, voter_id: &BytesN<32>) -> VotingStatus {
        self.client.status_of(voter_id)
    }

    pub fn tally(&self, candidate_id: &BytesN<32>) -> u64 {
        self.client.tally_candidate(candidate_id)
    }

    /// Every entry of `get_results`, fetched page by page.
    pub fn all_results(&self) -> std::vec::Vec<CandidateTally> {
        let count = self.client.candidate_count();
        let mut out = std::vec::Vec::new();
        let mut start = 0;
        while start < count {
            let page = self.client.get_results(&start, &MAX_RESULTS_PAGE);
            if page.is_empty() {
                break;
            }
            start += page.len();
            out.extend(page.iter());
        }
        out
    }

    /// Snapshot of all observable ledger state for invariant checking.
    ///
    /// `voters` should be every identifier the test has touched; the
    /// count-based invariants compare against it.
    pub fn snapshot(&self, voters: &[BytesN<32>], candidates: &[BytesN<32>]) -> LedgerSnapshot {
        let totals = self.client.get_totals();

        let voter_states = voters
            .iter()
            .map(|v| VoterState {
                voter_id: v.clone(),
                status: self.status(v),
                record: self.client.try_get_vote(v).ok().and_then(|r| r.ok()),
            })
            .collect();

        let tallies = candidates
            .iter()
            .map(|c| (c.clone(), self.tally(c)))
            .collect();

        let results = self
            .all_results()
            .into_iter()
            .map(|t| (t.candidate_id, t.votes))
            .collect();

        LedgerSnapshot {
            timestamp: self.env.timestamp(),
            registered: totals.registered,
            voted: totals.voted,
            closed: self.client.is_closed(),
            paused: self.client.is_paused(),
            voters: voter_states,
            tallies,
            results,
        }
    }
}

/// Per-identifier slice of a [`LedgerSnapshot`].
#[derive(Debug, Clone)]
pub struct VoterState {
    pub voter_id: BytesN<32>,
    pub status: VotingStatus,
    pub record: Option<VoteRecord>,
}

/// Immutable snapshot of ledger state at a point in time.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub timestamp: u64,
    pub registered: u64,
    pub voted: u64,
    pub closed: bool,
    pub paused: bool,
    pub voters: std::vec::Vec<VoterState>,
    /// Tallies of the tracked candidates, including zero counts.
    pub tallies: std::vec::Vec<(BytesN<32>, u64)>,
    /// Every `get_results` entry, in first-vote order.
    pub results: std::vec::Vec<(BytesN<32>, u64)>,
}

impl LedgerSnapshot {
    /// Sum over every candidate in `results`.
    pub fn sum_results(&self) -> u64 {
        self.results.iter().map(|(_, n)| n).sum()
    }

    /// Tracked identifiers currently in `status`.
    pub fn count_status(&self, status: VotingStatus) -> u64 {
        self.voters.iter().filter(|v| v.status == status).count() as u64
    }

    /// Tracked records naming `candidate_id`.
    pub fn records_for(&self, candidate_id: &BytesN<32>) -> u64 {
        self.voters
            .iter()
            .filter(|v| {
                v.record
                    .as_ref()
                    .map(|r| &r.candidate_id == candidate_id)
                    .unwrap_or(false)
            })
            .count() as u64
    }

    pub fn voter(&self, voter_id: &BytesN<32>) -> Option<&VoterState> {
        self.voters.iter().find(|v| &v.voter_id == voter_id)
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The action failed with a contract error.
    ExpectedError(u32),
    /// The action failed at the host level.
    UnexpectedError(std::string::String),
}

impl ActionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionOutcome::Ok)
    }
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub transitions_observed: usize,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            transitions_observed: 0,
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Coverage ratio: entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
