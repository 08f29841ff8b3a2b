//! Structured event publishing for the ballot ledger.
#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::config::LedgerConfig;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub config: LedgerConfig,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRegisteredEvent {
    pub voter_id: BytesN<32>,
    pub timestamp: u64,
}

/// Published once per accepted vote, for off-chain aggregation.
///
/// Also returned to the caller of `cast_vote` as its receipt.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub voter_id: BytesN<32>,
    pub candidate_id: BytesN<32>,
    pub submitter: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotClosedEvent {
    pub admin: Address,
    pub total_votes: u64,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: &Address, config: &LedgerConfig) {
    env.events().publish(
        (symbol_short!("INIT"), admin.clone()),
        InitializedEvent {
            admin: admin.clone(),
            config: config.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_voter_registered(env: &Env, voter_id: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("VOTER_REG"), voter_id.clone()),
        VoterRegisteredEvent {
            voter_id: voter_id.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vote_cast(
    env: &Env,
    voter_id: &BytesN<32>,
    candidate_id: &BytesN<32>,
    submitter: &Address,
) -> VoteCastEvent {
    let event = VoteCastEvent {
        voter_id: voter_id.clone(),
        candidate_id: candidate_id.clone(),
        submitter: submitter.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("VOTE_CST"), voter_id.clone()), event.clone());
    event
}

pub fn publish_ballot_closed(env: &Env, admin: &Address, total_votes: u64) {
    env.events().publish(
        (symbol_short!("CLOSED"),),
        BallotClosedEvent {
            admin: admin.clone(),
            total_votes,
            timestamp: env.ledger().timestamp(),
        },
    );
}
