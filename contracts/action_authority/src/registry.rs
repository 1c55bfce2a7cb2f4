//! Role-gated registry operations for the four timelocked categories, and
//! the read surface adapters resolve entries through.

use common::{fingerprint, FeeConfig};
use soroban_sdk::{Address, BytesN, Env, Symbol};

use crate::errors::ContractError;
use crate::events;
use crate::roles::{self, Duty, Role};
use crate::timelock::{self, RegistryKey, RegistryValue, Transition};

fn require_duty(
    env: &Env,
    caller: &Address,
    key: &RegistryKey,
    duty: Duty,
) -> Result<(), ContractError> {
    roles::require_role(env, Role::for_category(key.category(), duty), caller)
}

// ── Generic transitions ──────────────────────────────────────────────────────

pub fn propose(
    env: &Env,
    caller: &Address,
    key: RegistryKey,
    value: RegistryValue,
) -> Result<(), ContractError> {
    require_duty(env, caller, &key, Duty::Proposer)?;
    timelock::transition(env, &key, Transition::Propose(value.clone()))?;

    let eta = env
        .ledger()
        .timestamp()
        .saturating_add(timelock::get_delay(env));
    events::publish_proposed(env, key, value, caller.clone(), eta);
    Ok(())
}

pub fn confirm(
    env: &Env,
    caller: &Address,
    key: RegistryKey,
    value: RegistryValue,
) -> Result<(), ContractError> {
    require_duty(env, caller, &key, Duty::Executor)?;
    timelock::transition(env, &key, Transition::Confirm(value.clone()))?;
    events::publish_confirmed(env, key, value, caller.clone());
    Ok(())
}

pub fn cancel(env: &Env, caller: &Address, key: RegistryKey) -> Result<(), ContractError> {
    require_duty(env, caller, &key, Duty::Canceler)?;
    timelock::transition(env, &key, Transition::Cancel)?;
    events::publish_cancelled(env, key, caller.clone());
    Ok(())
}

/// Removes an active entry immediately, without waiting for the delay.
pub fn revoke(env: &Env, caller: &Address, key: RegistryKey) -> Result<(), ContractError> {
    require_duty(env, caller, &key, Duty::Disposer)?;
    timelock::transition(env, &key, Transition::Revoke)?;
    events::publish_revoked(env, key, caller.clone());
    Ok(())
}

// ── Actions ──────────────────────────────────────────────────────────────────

pub fn propose_action(
    env: &Env,
    caller: &Address,
    handler: &Address,
) -> Result<BytesN<4>, ContractError> {
    let key = fingerprint(env, handler);
    propose(
        env,
        caller,
        RegistryKey::Action(key.clone()),
        RegistryValue::Target(handler.clone()),
    )?;
    Ok(key)
}

pub fn confirm_action(
    env: &Env,
    caller: &Address,
    handler: &Address,
) -> Result<BytesN<4>, ContractError> {
    let key = fingerprint(env, handler);
    confirm(
        env,
        caller,
        RegistryKey::Action(key.clone()),
        RegistryValue::Target(handler.clone()),
    )?;
    Ok(key)
}

pub fn resolve_action(env: &Env, key: BytesN<4>) -> Result<Address, ContractError> {
    match timelock::active_value(env, &RegistryKey::Action(key)) {
        Some(RegistryValue::Target(handler)) => Ok(handler),
        _ => Err(ContractError::ActionNotFound),
    }
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn propose_pool(
    env: &Env,
    caller: &Address,
    protocol: &Symbol,
    vault: &Address,
) -> Result<BytesN<4>, ContractError> {
    let key = fingerprint(env, vault);
    propose(
        env,
        caller,
        RegistryKey::Pool(protocol.clone(), key.clone()),
        RegistryValue::Target(vault.clone()),
    )?;
    Ok(key)
}

pub fn confirm_pool(
    env: &Env,
    caller: &Address,
    protocol: &Symbol,
    vault: &Address,
) -> Result<BytesN<4>, ContractError> {
    let key = fingerprint(env, vault);
    confirm(
        env,
        caller,
        RegistryKey::Pool(protocol.clone(), key.clone()),
        RegistryValue::Target(vault.clone()),
    )?;
    Ok(key)
}

pub fn resolve_pool(
    env: &Env,
    protocol: Symbol,
    key: BytesN<4>,
) -> Result<Address, ContractError> {
    match timelock::active_value(env, &RegistryKey::Pool(protocol, key)) {
        Some(RegistryValue::Target(vault)) => Ok(vault),
        _ => Err(ContractError::PoolNotFound),
    }
}

// ── Fee configuration ────────────────────────────────────────────────────────

pub fn propose_fee_config(
    env: &Env,
    caller: &Address,
    config: &FeeConfig,
) -> Result<(), ContractError> {
    require_duty(env, caller, &RegistryKey::Fee, Duty::Proposer)?;
    if !config.is_valid() {
        return Err(ContractError::InvalidFeeRate);
    }
    propose(
        env,
        caller,
        RegistryKey::Fee,
        RegistryValue::Fee(config.clone()),
    )
}

pub fn confirm_fee_config(
    env: &Env,
    caller: &Address,
    config: &FeeConfig,
) -> Result<(), ContractError> {
    confirm(
        env,
        caller,
        RegistryKey::Fee,
        RegistryValue::Fee(config.clone()),
    )
}

pub fn fee_config(env: &Env) -> Result<FeeConfig, ContractError> {
    match timelock::active_value(env, &RegistryKey::Fee) {
        Some(RegistryValue::Fee(config)) => Ok(config),
        _ => Err(ContractError::FeeConfigNotSet),
    }
}

// ── Raw transactions ─────────────────────────────────────────────────────────

pub fn propose_transaction(
    env: &Env,
    caller: &Address,
    tx_hash: &BytesN<32>,
) -> Result<(), ContractError> {
    propose(
        env,
        caller,
        RegistryKey::Transaction(tx_hash.clone()),
        RegistryValue::Approved,
    )
}

pub fn confirm_transaction(
    env: &Env,
    caller: &Address,
    tx_hash: &BytesN<32>,
) -> Result<(), ContractError> {
    confirm(
        env,
        caller,
        RegistryKey::Transaction(tx_hash.clone()),
        RegistryValue::Approved,
    )
}

pub fn is_transaction_approved(env: &Env, tx_hash: BytesN<32>) -> bool {
    matches!(
        timelock::active_value(env, &RegistryKey::Transaction(tx_hash)),
        Some(RegistryValue::Approved)
    )
}
