#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::roles::Role;
use crate::timelock::{RegistryKey, RegistryValue};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub delay: u64,
    pub timestamp: u64,
}

/// Fired when a role is granted or revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

/// Fired when a registry change is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposedEvent {
    pub key: RegistryKey,
    pub value: RegistryValue,
    pub proposer: Address,
    /// Earliest ledger time at which the change can be confirmed.
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when a proposal is confirmed and becomes active.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmedEvent {
    pub key: RegistryKey,
    pub value: RegistryValue,
    pub executor: Address,
    pub timestamp: u64,
}

/// Fired when a pending proposal is cancelled or an active entry revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemovedEvent {
    pub key: RegistryKey,
    pub sender: Address,
    pub timestamp: u64,
}

/// Fired on every fee charge, including the zero-fee first touch.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeChargedEvent {
    pub tenant: Address,
    pub protocol: Symbol,
    pub vault: Address,
    pub balance: i128,
    pub rate_bps: u32,
    pub elapsed: u64,
    pub fee: i128,
    pub timestamp: u64,
}

/// Fired after a batch of governance calls completes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MulticallEvent {
    pub caller: Address,
    pub count: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, delay: u64) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        delay,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    let topics = (symbol_short!("ROLE_GRT"), account.clone());
    let data = RoleChangedEvent {
        role,
        account,
        sender,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    let topics = (symbol_short!("ROLE_RVK"), account.clone());
    let data = RoleChangedEvent {
        role,
        account,
        sender,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes a proposal together with the time it unlocks, so cancelers can
/// see how long they have to react.
pub fn publish_proposed(
    env: &Env,
    key: RegistryKey,
    value: RegistryValue,
    proposer: Address,
    eta: u64,
) {
    let topics = (symbol_short!("PROPOSED"), key.category());
    let data = ProposedEvent {
        key,
        value,
        proposer,
        eta,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_confirmed(env: &Env, key: RegistryKey, value: RegistryValue, executor: Address) {
    let topics = (symbol_short!("CONFIRMED"), key.category());
    let data = ConfirmedEvent {
        key,
        value,
        executor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_cancelled(env: &Env, key: RegistryKey, sender: Address) {
    let topics = (symbol_short!("CANCELLED"), key.category());
    let data = RemovedEvent {
        key,
        sender,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_revoked(env: &Env, key: RegistryKey, sender: Address) {
    let topics = (symbol_short!("REVOKED"), key.category());
    let data = RemovedEvent {
        key,
        sender,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(clippy::too_many_arguments)]
pub fn publish_fee_charged(
    env: &Env,
    tenant: Address,
    protocol: Symbol,
    vault: Address,
    balance: i128,
    rate_bps: u32,
    elapsed: u64,
    fee: i128,
) {
    let topics = (symbol_short!("FEE_CHG"), tenant.clone(), protocol.clone());
    let data = FeeChargedEvent {
        tenant,
        protocol,
        vault,
        balance,
        rate_bps,
        elapsed,
        fee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_multicall(env: &Env, caller: Address, count: u32) {
    let topics = (symbol_short!("MULTICALL"), caller.clone());
    let data = MulticallEvent {
        caller,
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
