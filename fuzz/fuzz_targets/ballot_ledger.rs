#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use ballot_ledger::{
    BallotLedgerContract, BallotLedgerContractClient, LedgerConfig, VoterIdSource, VotingPolicy,
    VotingStatus,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger},
    Address, Bytes, BytesN, Env, Vec as SorobanVec,
};

/// Accepts proofs whose first byte is even, so the fuzzer reaches both
/// verifier outcomes without a real proving system.
#[contract]
pub struct ParityVerifier;

#[contractimpl]
impl ParityVerifier {
    pub fn verify(
        _env: Env,
        _voter_id: BytesN<32>,
        _candidate_id: BytesN<32>,
        proof: Bytes,
    ) -> bool {
        proof.get(0).map(|b| b % 2 == 0).unwrap_or(false)
    }
}

/// Identifier pools are tiny on purpose: collisions are the interesting case.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { voter: u8 },
    RegisterBatch { voters: Vec<u8> },
    Cast { voter: u8, candidate: u8, proof: Vec<u8> },
    Pause,
    Unpause,
    Close,
    AdvanceTime { delta: u16 },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    gated: bool,
    actions: Vec<FuzzAction>,
}

const VOTERS: u8 = 8;
const CANDIDATES: u8 = 3;

fn voter_id(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed % VOTERS; 32])
}

fn candidate_id(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[0x80 | (seed % CANDIDATES); 32])
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let verifier = env.register(ParityVerifier, ());
    let contract_id = env.register(BallotLedgerContract, ());
    let client = BallotLedgerContractClient::new(&env, &contract_id);

    let policy = if input.gated {
        VotingPolicy::RegistrationGated
    } else {
        VotingPolicy::Open
    };
    if client
        .try_initialize(
            &admin,
            &LedgerConfig {
                policy,
                id_source: VoterIdSource::Supplied,
                verifier,
            },
        )
        .is_err()
    {
        return;
    }

    // Shadow model: voter seed -> candidate seed of the recorded vote.
    let mut votes: BTreeMap<u8, u8> = BTreeMap::new();

    for action in input.actions.into_iter().take(64) {
        match action {
            FuzzAction::Register { voter } => {
                let _ = client.try_register_voter(&admin, &voter_id(&env, voter));
            }
            FuzzAction::RegisterBatch { voters } => {
                let mut batch = SorobanVec::new(&env);
                for v in voters.into_iter().take(8) {
                    batch.push_back(voter_id(&env, v));
                }
                let _ = client.try_register_voters(&admin, &batch);
            }
            FuzzAction::Cast { voter, candidate, proof } => {
                let submitter = Address::generate(&env);
                let id = voter_id(&env, voter);
                let before = client.status_of(&id);
                let accepted = client
                    .try_cast_vote(
                        &submitter,
                        &Some(id.clone()),
                        &candidate_id(&env, candidate),
                        &Bytes::from_slice(&env, &proof),
                    )
                    .is_ok();

                if accepted {
                    assert_ne!(
                        before,
                        VotingStatus::Voted,
                        "INVARIANT VIOLATION: second vote accepted"
                    );
                    votes.insert(voter % VOTERS, candidate % CANDIDATES);
                }
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
            FuzzAction::Close => {
                let _ = client.try_close_ballot(&admin);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        for seed in 0..VOTERS {
            let id = voter_id(&env, seed);
            let status = client.status_of(&id);
            let record = client.try_get_vote(&id).ok().and_then(|r| r.ok());
            assert_eq!(
                status == VotingStatus::Voted,
                record.is_some(),
                "INVARIANT VIOLATION: record/status mismatch"
            );
            match (votes.get(&seed), record) {
                (Some(c), Some(r)) => assert_eq!(r.candidate_id, candidate_id(&env, *c)),
                (None, None) => {}
                _ => panic!("INVARIANT VIOLATION: ledger diverged from model"),
            }
        }

        for seed in 0..CANDIDATES {
            let expected = votes.values().filter(|c| **c == seed).count() as u64;
            assert_eq!(client.tally_candidate(&candidate_id(&env, seed)), expected);
        }
        assert_eq!(client.get_totals().voted, votes.len() as u64);
        let listed: u64 = client
            .get_results(&0, &(CANDIDATES as u32))
            .iter()
            .map(|t| t.votes)
            .sum();
        assert_eq!(listed, votes.len() as u64);
    }
});
