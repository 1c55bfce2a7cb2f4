#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Balance report for one deposit or withdrawal, keyed by the caller's
/// strategy identifier.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceUpdatedEvent {
    pub strategy: Symbol,
    pub tenant: Address,
    pub protocol: Symbol,
    pub vault: Address,
    pub prior_balance: i128,
    pub new_balance: i128,
    pub fee: i128,
    pub timestamp: u64,
}

#[allow(clippy::too_many_arguments)]
pub fn publish_balance_updated(
    env: &Env,
    strategy: Symbol,
    tenant: Address,
    protocol: Symbol,
    vault: Address,
    prior_balance: i128,
    new_balance: i128,
    fee: i128,
) {
    let topics = (symbol_short!("BAL_UPD"), strategy.clone(), tenant.clone());
    let data = BalanceUpdatedEvent {
        strategy,
        tenant,
        protocol,
        vault,
        prior_balance,
        new_balance,
        fee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
