use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const OWNER_COUNT: Symbol = symbol_short!("OWN_CNT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Registry categories, each with its own timelock instance and role set.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Category {
    Action = 1,
    Pool = 2,
    Fee = 3,
    Transaction = 4,
}

/// The four duties every category splits its governance into.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Duty {
    Proposer = 1,
    Executor = 2,
    Canceler = 3,
    Disposer = 4,
}

/// Governance roles.
///
/// `Owner` and `RoleManager` are the bootstrap roles: only owners grant or
/// revoke them. Every other role is managed by `RoleManager` holders.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Owner = 0,
    RoleManager = 1,

    ActionProposer = 10,
    ActionExecutor = 11,
    ActionCanceler = 12,
    ActionDisposer = 13,

    PoolProposer = 20,
    PoolExecutor = 21,
    PoolCanceler = 22,
    PoolDisposer = 23,

    FeeProposer = 30,
    FeeExecutor = 31,
    FeeCanceler = 32,
    FeeDisposer = 33,

    TransactionProposer = 40,
    TransactionExecutor = 41,
    TransactionCanceler = 42,
    TransactionDisposer = 43,
}

impl Role {
    pub fn for_category(category: Category, duty: Duty) -> Role {
        match (category, duty) {
            (Category::Action, Duty::Proposer) => Role::ActionProposer,
            (Category::Action, Duty::Executor) => Role::ActionExecutor,
            (Category::Action, Duty::Canceler) => Role::ActionCanceler,
            (Category::Action, Duty::Disposer) => Role::ActionDisposer,
            (Category::Pool, Duty::Proposer) => Role::PoolProposer,
            (Category::Pool, Duty::Executor) => Role::PoolExecutor,
            (Category::Pool, Duty::Canceler) => Role::PoolCanceler,
            (Category::Pool, Duty::Disposer) => Role::PoolDisposer,
            (Category::Fee, Duty::Proposer) => Role::FeeProposer,
            (Category::Fee, Duty::Executor) => Role::FeeExecutor,
            (Category::Fee, Duty::Canceler) => Role::FeeCanceler,
            (Category::Fee, Duty::Disposer) => Role::FeeDisposer,
            (Category::Transaction, Duty::Proposer) => Role::TransactionProposer,
            (Category::Transaction, Duty::Executor) => Role::TransactionExecutor,
            (Category::Transaction, Duty::Canceler) => Role::TransactionCanceler,
            (Category::Transaction, Duty::Disposer) => Role::TransactionDisposer,
        }
    }

    /// Bootstrap roles can only be granted or revoked by an owner.
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, Role::Owner | Role::RoleManager)
    }

    /// The role a caller needs to grant or revoke `self`.
    pub fn admin_role(&self) -> Role {
        if self.is_bootstrap() {
            Role::Owner
        } else {
            Role::RoleManager
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held = env.storage().persistent().has(&key);
    if held {
        extend_ttl(env, &key);
    }
    held
}

pub fn owner_count(env: &Env) -> u32 {
    env.storage().instance().get(&OWNER_COUNT).unwrap_or(0)
}

/// Guard: fails with `Unauthorized` unless `account` holds `role`.
pub fn require_role(env: &Env, role: Role, account: &Address) -> Result<(), ContractError> {
    if !has_role(env, role, account) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Stores the role. Returns `false` if the account already held it.
/// Callers must verify authorization beforehand.
pub fn set_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    if role == Role::Owner {
        let count = owner_count(env).saturating_add(1);
        env.storage().instance().set(&OWNER_COUNT, &count);
    }
    true
}

/// Removes the role. Returns `false` if the account did not hold it.
///
/// # Errors
/// `LastOwner` if removing the role would leave the contract without owners.
pub fn remove_role(env: &Env, role: Role, account: &Address) -> Result<bool, ContractError> {
    if !has_role(env, role, account) {
        return Ok(false);
    }
    if role == Role::Owner {
        let count = owner_count(env);
        if count <= 1 {
            return Err(ContractError::LastOwner);
        }
        env.storage()
            .instance()
            .set(&OWNER_COUNT, &count.saturating_sub(1));
    }
    env.storage().persistent().remove(&role_key(role, account));
    Ok(true)
}

// ── Gated mutations ──────────────────────────────────────────────────────────

/// Grants `role` to `account` on behalf of `caller`.
///
/// Returns whether the role was newly granted.
pub fn grant(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<bool, ContractError> {
    require_role(env, role.admin_role(), caller)?;
    Ok(set_role(env, role, account))
}

/// Revokes `role` from `account` on behalf of `caller`.
///
/// Returns whether the role was actually held.
pub fn revoke(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<bool, ContractError> {
    require_role(env, role.admin_role(), caller)?;
    remove_role(env, role, account)
}
