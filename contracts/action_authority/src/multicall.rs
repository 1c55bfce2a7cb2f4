use common::FeeConfig;
use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::events;
use crate::registry;
use crate::roles::{self, Role};
use crate::timelock::RegistryKey;

/// Upper bound on calls per batch.
pub const MAX_BATCH_CALLS: u32 = 32;

/// One governance operation inside a batch. Every call runs as the batch
/// caller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GovernanceCall {
    GrantRole(Role, Address),
    RevokeRole(Role, Address),

    ProposeAction(Address),
    ConfirmAction(Address),
    CancelAction(BytesN<4>),
    RevokeAction(BytesN<4>),

    ProposePool(Symbol, Address),
    ConfirmPool(Symbol, Address),
    CancelPool(Symbol, BytesN<4>),
    RevokePool(Symbol, BytesN<4>),

    ProposeFeeConfig(FeeConfig),
    ConfirmFeeConfig(FeeConfig),
    CancelFeeConfig,
    RevokeFeeConfig,

    ProposeTransaction(BytesN<32>),
    ConfirmTransaction(BytesN<32>),
    CancelTransaction(BytesN<32>),
    RevokeTransaction(BytesN<32>),
}

/// Result of one call in a batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallOutput {
    Done,
    /// Registry key derived for a handler or vault.
    Key(BytesN<4>),
}

/// Grants a role and publishes the event when it was not already held.
pub fn grant_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), ContractError> {
    if roles::grant(env, caller, role, account)? {
        events::publish_role_granted(env, role, account.clone(), caller.clone());
    }
    Ok(())
}

/// Revokes a role and publishes the event when it was actually held.
pub fn revoke_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), ContractError> {
    if roles::revoke(env, caller, role, account)? {
        events::publish_role_revoked(env, role, account.clone(), caller.clone());
    }
    Ok(())
}

/// Runs one call on behalf of `caller`.
pub fn dispatch(
    env: &Env,
    caller: &Address,
    call: GovernanceCall,
) -> Result<CallOutput, ContractError> {
    let output = match call {
        GovernanceCall::GrantRole(role, account) => {
            grant_role(env, caller, role, &account)?;
            CallOutput::Done
        }
        GovernanceCall::RevokeRole(role, account) => {
            revoke_role(env, caller, role, &account)?;
            CallOutput::Done
        }
        GovernanceCall::ProposeAction(handler) => {
            CallOutput::Key(registry::propose_action(env, caller, &handler)?)
        }
        GovernanceCall::ConfirmAction(handler) => {
            CallOutput::Key(registry::confirm_action(env, caller, &handler)?)
        }
        GovernanceCall::CancelAction(key) => {
            registry::cancel(env, caller, RegistryKey::Action(key))?;
            CallOutput::Done
        }
        GovernanceCall::RevokeAction(key) => {
            registry::revoke(env, caller, RegistryKey::Action(key))?;
            CallOutput::Done
        }
        GovernanceCall::ProposePool(protocol, vault) => {
            CallOutput::Key(registry::propose_pool(env, caller, &protocol, &vault)?)
        }
        GovernanceCall::ConfirmPool(protocol, vault) => {
            CallOutput::Key(registry::confirm_pool(env, caller, &protocol, &vault)?)
        }
        GovernanceCall::CancelPool(protocol, key) => {
            registry::cancel(env, caller, RegistryKey::Pool(protocol, key))?;
            CallOutput::Done
        }
        GovernanceCall::RevokePool(protocol, key) => {
            registry::revoke(env, caller, RegistryKey::Pool(protocol, key))?;
            CallOutput::Done
        }
        GovernanceCall::ProposeFeeConfig(config) => {
            registry::propose_fee_config(env, caller, &config)?;
            CallOutput::Done
        }
        GovernanceCall::ConfirmFeeConfig(config) => {
            registry::confirm_fee_config(env, caller, &config)?;
            CallOutput::Done
        }
        GovernanceCall::CancelFeeConfig => {
            registry::cancel(env, caller, RegistryKey::Fee)?;
            CallOutput::Done
        }
        GovernanceCall::RevokeFeeConfig => {
            registry::revoke(env, caller, RegistryKey::Fee)?;
            CallOutput::Done
        }
        GovernanceCall::ProposeTransaction(tx_hash) => {
            registry::propose_transaction(env, caller, &tx_hash)?;
            CallOutput::Done
        }
        GovernanceCall::ConfirmTransaction(tx_hash) => {
            registry::confirm_transaction(env, caller, &tx_hash)?;
            CallOutput::Done
        }
        GovernanceCall::CancelTransaction(tx_hash) => {
            registry::cancel(env, caller, RegistryKey::Transaction(tx_hash))?;
            CallOutput::Done
        }
        GovernanceCall::RevokeTransaction(tx_hash) => {
            registry::revoke(env, caller, RegistryKey::Transaction(tx_hash))?;
            CallOutput::Done
        }
    };
    Ok(output)
}

/// Runs every call in order and stops at the first failure.
///
/// Writes made by earlier calls are not undone here: the returned error
/// fails the whole contract invocation and the host discards them.
pub fn execute(
    env: &Env,
    caller: &Address,
    calls: Vec<GovernanceCall>,
) -> Result<Vec<CallOutput>, ContractError> {
    if calls.is_empty() || calls.len() > MAX_BATCH_CALLS {
        return Err(ContractError::InvalidInput);
    }

    let mut outputs = Vec::new(env);
    for call in calls.iter() {
        outputs.push_back(dispatch(env, caller, call)?);
    }

    events::publish_multicall(env, caller.clone(), outputs.len());
    Ok(outputs)
}
