//! Resolution of the voter identifier a cast is recorded under.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::config::VoterIdSource;
use crate::registry::VoterId;
use crate::ContractError;

const DOMAIN: &[u8] = b"ballot-ledger/voter-id/v1";

/// `sha256(DOMAIN || xdr(submitter))`.
pub fn derive_from_submitter(env: &Env, submitter: &Address) -> VoterId {
    let mut data = Bytes::from_slice(env, DOMAIN);
    data.append(&submitter.clone().to_xdr(env));
    env.crypto().sha256(&data).into()
}

pub(crate) fn resolve(
    env: &Env,
    source: VoterIdSource,
    submitter: &Address,
    supplied: Option<VoterId>,
) -> Result<VoterId, ContractError> {
    match source {
        VoterIdSource::Supplied => supplied.ok_or(ContractError::MissingVoterId),
        VoterIdSource::SubmitterDerived => {
            let derived = derive_from_submitter(env, submitter);
            match supplied {
                Some(id) if id != derived => Err(ContractError::InvalidInput),
                _ => Ok(derived),
            }
        }
    }
}
