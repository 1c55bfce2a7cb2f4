#![no_std]

//! Reference adapter: moves a tenant's tokens into and out of a vault the
//! governance ledger has approved, settling the performance fee on the
//! tracked position before every balance change.
//!
//! The adapter's own address must be an active Action entry on the ledger,
//! otherwise every deposit and withdrawal is rejected at fee settlement.

mod errors;
pub mod events;

use common::ActionAuthorityClient;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, BytesN, Env, Symbol};

pub use errors::AdapterError;

const AUTHORITY: Symbol = symbol_short!("AUTH");
const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contract]
pub struct VaultAdapterContract;

#[contractimpl]
impl VaultAdapterContract {
    /// Point the adapter at the governance ledger it resolves vaults through.
    pub fn initialize(env: Env, authority: Address) -> Result<(), AdapterError> {
        if env.storage().instance().has(&AUTHORITY) {
            return Err(AdapterError::AlreadyInitialized);
        }
        env.storage().instance().set(&AUTHORITY, &authority);
        Ok(())
    }

    pub fn authority(env: Env) -> Result<Address, AdapterError> {
        Self::load_authority(&env)
    }

    /// Deposit `amount` of `token` into the vault registered as
    /// `(protocol, vault_key)`. Returns the fee settled on the prior balance.
    pub fn deposit(
        env: Env,
        tenant: Address,
        strategy: Symbol,
        protocol: Symbol,
        vault_key: BytesN<4>,
        token: Address,
        amount: i128,
    ) -> Result<i128, AdapterError> {
        tenant.require_auth();
        if amount <= 0 {
            return Err(AdapterError::InvalidAmount);
        }
        let authority = ActionAuthorityClient::new(&env, &Self::load_authority(&env)?);
        let vault = authority.resolve_pool(&protocol, &vault_key);

        let prior = Self::load_position(&env, &tenant, &protocol, &vault);
        let fee = authority.settle_fee(
            &env.current_contract_address(),
            &tenant,
            &protocol,
            &vault,
            &token,
            &prior,
        );

        let new_balance = prior
            .checked_add(amount)
            .ok_or(AdapterError::ArithmeticOverflow)?;
        Self::store_position(&env, &tenant, &protocol, &vault, new_balance);

        token::Client::new(&env, &token).transfer(&tenant, &vault, &amount);

        events::publish_balance_updated(
            &env,
            strategy,
            tenant,
            protocol,
            vault,
            prior,
            new_balance,
            fee,
        );
        Ok(fee)
    }

    /// Withdraw `amount` of `token` from the vault back to the tenant.
    /// The vault must authorize the outgoing transfer.
    pub fn withdraw(
        env: Env,
        tenant: Address,
        strategy: Symbol,
        protocol: Symbol,
        vault_key: BytesN<4>,
        token: Address,
        amount: i128,
    ) -> Result<i128, AdapterError> {
        tenant.require_auth();
        if amount <= 0 {
            return Err(AdapterError::InvalidAmount);
        }
        let authority = ActionAuthorityClient::new(&env, &Self::load_authority(&env)?);
        let vault = authority.resolve_pool(&protocol, &vault_key);

        let prior = Self::load_position(&env, &tenant, &protocol, &vault);
        if amount > prior {
            return Err(AdapterError::InsufficientBalance);
        }
        let fee = authority.settle_fee(
            &env.current_contract_address(),
            &tenant,
            &protocol,
            &vault,
            &token,
            &prior,
        );

        let new_balance = prior - amount;
        Self::store_position(&env, &tenant, &protocol, &vault, new_balance);

        token::Client::new(&env, &token).transfer(&vault, &tenant, &amount);

        events::publish_balance_updated(
            &env,
            strategy,
            tenant,
            protocol,
            vault,
            prior,
            new_balance,
            fee,
        );
        Ok(fee)
    }

    /// Tracked balance of a tenant's position in a vault.
    pub fn position(env: Env, tenant: Address, protocol: Symbol, vault: Address) -> i128 {
        Self::load_position(&env, &tenant, &protocol, &vault)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn load_authority(env: &Env) -> Result<Address, AdapterError> {
        env.storage()
            .instance()
            .get(&AUTHORITY)
            .ok_or(AdapterError::NotInitialized)
    }

    fn load_position(env: &Env, tenant: &Address, protocol: &Symbol, vault: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(POSITION, tenant.clone(), protocol.clone(), vault.clone()))
            .unwrap_or(0)
    }

    fn store_position(
        env: &Env,
        tenant: &Address,
        protocol: &Symbol,
        vault: &Address,
        balance: i128,
    ) {
        let key = (POSITION, tenant.clone(), protocol.clone(), vault.clone());
        env.storage().persistent().set(&key, &balance);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
