//! Client interface for adapter contracts.
//!
//! Every call below aborts the calling adapter when the authority returns an
//! error, so a failed lookup or charge never leaves a half-applied deposit.

use soroban_sdk::{contractclient, Address, BytesN, Env, Symbol};

use crate::FeeConfig;

#[contractclient(name = "ActionAuthorityClient")]
pub trait ActionAuthorityInterface {
    /// Resolves an active handler by fingerprint.
    fn resolve_action(env: Env, key: BytesN<4>) -> Address;

    /// Resolves an active vault registered under `protocol`.
    fn resolve_pool(env: Env, protocol: Symbol, key: BytesN<4>) -> Address;

    /// Returns the active fee configuration.
    fn fee_config(env: Env) -> FeeConfig;

    /// Returns the last fee checkpoint for a position, `0` if never charged.
    fn last_charged_at(env: Env, tenant: Address, protocol: Symbol, vault: Address) -> u64;

    /// Computes the fee owed at `rate_bps` and moves the checkpoint to now.
    /// `handler` must be the calling adapter's own, active Action entry.
    fn charge_fee(
        env: Env,
        handler: Address,
        tenant: Address,
        protocol: Symbol,
        vault: Address,
        balance: i128,
        rate_bps: u32,
    ) -> i128;

    /// Charges at the active fee rate and transfers the fee in `token` from
    /// the tenant to the fee recipient.
    fn settle_fee(
        env: Env,
        handler: Address,
        tenant: Address,
        protocol: Symbol,
        vault: Address,
        token: Address,
        balance: i128,
    ) -> i128;

    /// Whether a raw transaction hash has passed the transaction timelock.
    fn is_transaction_approved(env: Env, tx_hash: BytesN<32>) -> bool;
}
