#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Emitted whenever the pause switch flips.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub admin: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Sets the contract pause state without emitting anything.
///
/// The module performs no auth checks; callers enforce their own admin model
/// before reaching it.
pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Returns `true` when the contract is paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Returns `CommonError::Paused` when the contract is paused.
///
/// Place this at the top of every state-mutating entry point. Views must not
/// call it.
pub fn require_not_paused(env: &Env) -> Result<(), CommonError> {
    if is_paused(env) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

/// Pause on behalf of an already-authorised `admin`.
///
/// Emits `("PAUSED", admin)` with a [`PauseChangedEvent`] payload.
pub fn pause(env: &Env, admin: &Address) {
    set_paused(env, true);
    publish_pause_changed(env, symbol_short!("PAUSED"), admin, true);
}

/// Unpause on behalf of an already-authorised `admin`.
///
/// Emits `("UNPAUSED", admin)` with a [`PauseChangedEvent`] payload.
pub fn unpause(env: &Env, admin: &Address) {
    set_paused(env, false);
    publish_pause_changed(env, symbol_short!("UNPAUSED"), admin, false);
}

fn publish_pause_changed(env: &Env, topic: Symbol, admin: &Address, paused: bool) {
    env.events().publish(
        (topic, admin.clone()),
        PauseChangedEvent {
            admin: admin.clone(),
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}
