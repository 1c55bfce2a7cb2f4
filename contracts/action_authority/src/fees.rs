use common::{fingerprint, BPS_DENOMINATOR, MAX_FEE_RATE_BPS, SECONDS_PER_YEAR};
use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::errors::ContractError;
use crate::events;
use crate::registry;

const CHECKPOINT: Symbol = symbol_short!("FEE_CKPT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

fn checkpoint_key(
    tenant: &Address,
    protocol: &Symbol,
    vault: &Address,
) -> (Symbol, Address, Symbol, Address) {
    (CHECKPOINT, tenant.clone(), protocol.clone(), vault.clone())
}

/// Linear, non-compounding fee owed on `balance` over `elapsed` seconds:
/// `balance * rate_bps * elapsed / (SECONDS_PER_YEAR * 10_000)`, rounded down.
pub fn accrued_fee(balance: i128, rate_bps: u32, elapsed: u64) -> Result<i128, ContractError> {
    if balance < 0 {
        return Err(ContractError::InvalidInput);
    }
    if rate_bps > MAX_FEE_RATE_BPS {
        return Err(ContractError::InvalidFeeRate);
    }
    let numerator = balance
        .checked_mul(i128::from(rate_bps))
        .and_then(|v| v.checked_mul(i128::from(elapsed)))
        .ok_or(ContractError::ArithmeticOverflow)?;
    let denominator = i128::from(SECONDS_PER_YEAR) * BPS_DENOMINATOR;
    Ok(numerator / denominator)
}

/// Last charge time for a position, `0` if the position was never charged.
pub fn last_charged_at(env: &Env, tenant: &Address, protocol: &Symbol, vault: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&checkpoint_key(tenant, protocol, vault))
        .unwrap_or(0)
}

/// Stored checkpoints are never `0`, which is reserved for "never charged".
fn store_checkpoint(env: &Env, tenant: &Address, protocol: &Symbol, vault: &Address, at: u64) {
    let key = checkpoint_key(tenant, protocol, vault);
    env.storage().persistent().set(&key, &at.max(1));
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Guard: `handler` must be the active Action entry under its own
/// fingerprint. Only approved adapters move fee checkpoints.
pub fn require_active_handler(env: &Env, handler: &Address) -> Result<(), ContractError> {
    let active = registry::resolve_action(env, fingerprint(env, handler))?;
    if active != *handler {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Computes the fee for a position and moves its checkpoint to now.
///
/// The first charge only records the checkpoint and returns `0`. The
/// checkpoint is written in the same step as the fee is computed, so nothing
/// that runs afterwards can charge the same interval again.
pub fn charge(
    env: &Env,
    tenant: &Address,
    protocol: &Symbol,
    vault: &Address,
    balance: i128,
    rate_bps: u32,
) -> Result<i128, ContractError> {
    let now = env.ledger().timestamp();
    let last = last_charged_at(env, tenant, protocol, vault);

    let (elapsed, fee) = if last == 0 {
        // Validate inputs even though nothing is owed yet.
        accrued_fee(balance, rate_bps, 0)?;
        (0, 0)
    } else {
        let elapsed = now.saturating_sub(last);
        (elapsed, accrued_fee(balance, rate_bps, elapsed)?)
    };

    store_checkpoint(env, tenant, protocol, vault, now);

    events::publish_fee_charged(
        env,
        tenant.clone(),
        protocol.clone(),
        vault.clone(),
        balance,
        rate_bps,
        elapsed,
        fee,
    );

    Ok(fee)
}

/// Charges at the active fee rate, then transfers the fee from the tenant to
/// the configured recipient.
pub fn settle(
    env: &Env,
    tenant: &Address,
    protocol: &Symbol,
    vault: &Address,
    token: &Address,
    balance: i128,
) -> Result<i128, ContractError> {
    let config = registry::fee_config(env)?;

    // Effects before interactions.
    let fee = charge(env, tenant, protocol, vault, balance, config.rate_bps)?;

    if fee > 0 {
        token::Client::new(env, token).transfer(tenant, &config.recipient, &fee);
    }
    Ok(fee)
}
