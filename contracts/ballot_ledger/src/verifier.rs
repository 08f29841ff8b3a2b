//! Proof-verification seam.
//!
//! The ledger never interprets a proof. It hands `(voter_id, candidate_id,
//! proof)` to the verifier contract named in [`crate::LedgerConfig`] and
//! accepts the vote only on an explicit `true`. A verifier that rejects,
//! traps, or cannot be invoked all map to `InvalidProof`.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

use crate::ContractError;

#[contractclient(name = "ProofVerifierClient")]
pub trait ProofVerifier {
    /// `true` when `proof` entitles `voter_id` to cast for `candidate_id`.
    fn verify(env: Env, voter_id: BytesN<32>, candidate_id: BytesN<32>, proof: Bytes) -> bool;
}

pub(crate) fn require_valid_proof(
    env: &Env,
    verifier: &Address,
    voter_id: &BytesN<32>,
    candidate_id: &BytesN<32>,
    proof: &Bytes,
) -> Result<(), ContractError> {
    let client = ProofVerifierClient::new(env, verifier);
    match client.try_verify(voter_id, candidate_id, proof) {
        Ok(Ok(true)) => Ok(()),
        _ => Err(ContractError::InvalidProof),
    }
}
