#![no_std]

//! Timelocked governance ledger for wallet action handlers and vaults.
//!
//! Operators holding per-category roles propose registry changes, wait out
//! the delay, and confirm them; disposers can revoke an active entry at any
//! time. Adapter contracts resolve handlers and vaults through this contract
//! and charge time-prorated performance fees against per-position
//! checkpoints.

pub mod errors;
pub mod events;
pub mod fees;
pub mod multicall;
pub mod registry;
pub mod roles;
pub mod timelock;

use common::{fingerprint, FeeConfig};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, Symbol, Vec};

pub use errors::{ContractError, ErrorCategory};
pub use multicall::{CallOutput, GovernanceCall, MAX_BATCH_CALLS};
pub use roles::{Category, Duty, Role};
pub use timelock::{PendingChange, RegistryEntry, RegistryKey, RegistryValue};

const INITIALIZED: Symbol = symbol_short!("INIT");

#[contract]
pub struct ActionAuthorityContract;

#[contractimpl]
impl ActionAuthorityContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner` – receives both `Owner` and `RoleManager`.
    /// * `delay` – seconds every proposal must wait before confirmation.
    ///   Fixed for the lifetime of the deployment; zero is accepted for
    ///   non-production networks.
    pub fn initialize(env: Env, owner: Address, delay: u64) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().instance().set(&INITIALIZED, &true);
        timelock::set_delay(&env, delay);
        roles::set_role(&env, Role::Owner, &owner);
        roles::set_role(&env, Role::RoleManager, &owner);

        events::publish_initialized(&env, owner, delay);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_delay(env: Env) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        Ok(timelock::get_delay(&env))
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    /// Grant `role` to `account`.
    ///
    /// `Owner` and `RoleManager` require the caller to be an owner; every
    /// other role requires `RoleManager`.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        multicall::grant_role(&env, &caller, role, &account)
    }

    /// Revoke `role` from `account`. The last owner cannot be removed.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        multicall::revoke_role(&env, &caller, role, &account)
    }

    /// Drop a role held by `account` itself.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if roles::remove_role(&env, role, &account)? {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, role, &account)
    }

    pub fn owner_count(env: Env) -> u32 {
        roles::owner_count(&env)
    }

    // ── Action registry ─────────────────────────────────────────────────────

    /// Propose a handler; returns its registry key.
    pub fn propose_action(
        env: Env,
        caller: Address,
        handler: Address,
    ) -> Result<BytesN<4>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::propose_action(&env, &caller, &handler)
    }

    /// Activate a proposed handler once the delay has elapsed.
    pub fn confirm_action(
        env: Env,
        caller: Address,
        handler: Address,
    ) -> Result<BytesN<4>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::confirm_action(&env, &caller, &handler)
    }

    pub fn cancel_action(env: Env, caller: Address, key: BytesN<4>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::cancel(&env, &caller, RegistryKey::Action(key))
    }

    pub fn revoke_action(env: Env, caller: Address, key: BytesN<4>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::revoke(&env, &caller, RegistryKey::Action(key))
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Propose a vault under a protocol tag; returns its registry key.
    pub fn propose_pool(
        env: Env,
        caller: Address,
        protocol: Symbol,
        vault: Address,
    ) -> Result<BytesN<4>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::propose_pool(&env, &caller, &protocol, &vault)
    }

    pub fn confirm_pool(
        env: Env,
        caller: Address,
        protocol: Symbol,
        vault: Address,
    ) -> Result<BytesN<4>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::confirm_pool(&env, &caller, &protocol, &vault)
    }

    pub fn cancel_pool(
        env: Env,
        caller: Address,
        protocol: Symbol,
        key: BytesN<4>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::cancel(&env, &caller, RegistryKey::Pool(protocol, key))
    }

    pub fn revoke_pool(
        env: Env,
        caller: Address,
        protocol: Symbol,
        key: BytesN<4>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::revoke(&env, &caller, RegistryKey::Pool(protocol, key))
    }

    // ── Fee configuration ───────────────────────────────────────────────────

    pub fn propose_fee_config(
        env: Env,
        caller: Address,
        config: FeeConfig,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::propose_fee_config(&env, &caller, &config)
    }

    pub fn confirm_fee_config(
        env: Env,
        caller: Address,
        config: FeeConfig,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::confirm_fee_config(&env, &caller, &config)
    }

    pub fn cancel_fee_config(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::cancel(&env, &caller, RegistryKey::Fee)
    }

    pub fn revoke_fee_config(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::revoke(&env, &caller, RegistryKey::Fee)
    }

    // ── Transaction approvals ───────────────────────────────────────────────

    pub fn propose_transaction(
        env: Env,
        caller: Address,
        tx_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::propose_transaction(&env, &caller, &tx_hash)
    }

    pub fn confirm_transaction(
        env: Env,
        caller: Address,
        tx_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::confirm_transaction(&env, &caller, &tx_hash)
    }

    pub fn cancel_transaction(
        env: Env,
        caller: Address,
        tx_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::cancel(&env, &caller, RegistryKey::Transaction(tx_hash))
    }

    pub fn revoke_transaction(
        env: Env,
        caller: Address,
        tx_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        registry::revoke(&env, &caller, RegistryKey::Transaction(tx_hash))
    }

    // ── Batching ────────────────────────────────────────────────────────────

    /// Execute a batch of governance calls as `caller`, all or nothing.
    pub fn multicall(
        env: Env,
        caller: Address,
        calls: Vec<GovernanceCall>,
    ) -> Result<Vec<CallOutput>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        multicall::execute(&env, &caller, calls)
    }

    // ── Registry views ──────────────────────────────────────────────────────

    /// Raw lifecycle state of a registry key.
    pub fn get_entry(env: Env, key: RegistryKey) -> RegistryEntry {
        timelock::load_entry(&env, &key)
    }

    /// Registry key a handler is stored under.
    pub fn action_key(env: Env, handler: Address) -> BytesN<4> {
        fingerprint(&env, &handler)
    }

    /// Registry key a vault is stored under, within its protocol tag.
    pub fn pool_key(env: Env, vault: Address) -> BytesN<4> {
        fingerprint(&env, &vault)
    }

    // ── Adapter surface ─────────────────────────────────────────────────────

    pub fn resolve_action(env: Env, key: BytesN<4>) -> Result<Address, ContractError> {
        registry::resolve_action(&env, key)
    }

    pub fn resolve_pool(
        env: Env,
        protocol: Symbol,
        key: BytesN<4>,
    ) -> Result<Address, ContractError> {
        registry::resolve_pool(&env, protocol, key)
    }

    pub fn fee_config(env: Env) -> Result<FeeConfig, ContractError> {
        registry::fee_config(&env)
    }

    pub fn is_transaction_approved(env: Env, tx_hash: BytesN<32>) -> bool {
        registry::is_transaction_approved(&env, tx_hash)
    }

    pub fn last_charged_at(env: Env, tenant: Address, protocol: Symbol, vault: Address) -> u64 {
        fees::last_charged_at(&env, &tenant, &protocol, &vault)
    }

    /// Charge the fee owed on a position at `rate_bps` and checkpoint it.
    ///
    /// `handler` is the calling adapter and must be an active Action entry.
    /// The first charge of a position only records the checkpoint and
    /// returns `0`.
    pub fn charge_fee(
        env: Env,
        handler: Address,
        tenant: Address,
        protocol: Symbol,
        vault: Address,
        balance: i128,
        rate_bps: u32,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        handler.require_auth();
        tenant.require_auth();
        fees::require_active_handler(&env, &handler)?;
        fees::charge(&env, &tenant, &protocol, &vault, balance, rate_bps)
    }

    /// Charge at the active fee rate and pay the fee in `token` to the fee
    /// recipient. The checkpoint is stored before the transfer runs.
    pub fn settle_fee(
        env: Env,
        handler: Address,
        tenant: Address,
        protocol: Symbol,
        vault: Address,
        token: Address,
        balance: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        handler.require_auth();
        tenant.require_auth();
        fees::require_active_handler(&env, &handler)?;
        fees::settle(&env, &tenant, &protocol, &vault, &token, balance)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
