//! Propose / confirm / cancel / revoke state machine shared by every
//! registry category.
//!
//! The transition logic in [`apply`] is pure: it takes the current [`Slot`],
//! an event and the ledger time, and returns the next slot. The storage glue
//! below maps each [`RegistryKey`] onto one persisted [`RegistryEntry`].

use common::FeeConfig;
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::errors::ContractError;
use crate::roles::Category;

const DELAY: Symbol = symbol_short!("DELAY");
const ENTRY_PREFIX: Symbol = symbol_short!("REG");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Pure state machine ───────────────────────────────────────────────────────

/// Lifecycle of one key.
///
/// `pending == None && active == None` is the `Unproposed` state. A key may
/// carry a pending replacement while another value is active.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slot<V> {
    /// Proposed value and the ledger time it was proposed at.
    pub pending: Option<(V, u64)>,
    pub active: Option<V>,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot {
            pending: None,
            active: None,
        }
    }
}

impl<V> Slot<V> {
    pub fn is_unproposed(&self) -> bool {
        self.pending.is_none() && self.active.is_none()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Transition<V> {
    Propose(V),
    Confirm(V),
    Cancel,
    Revoke,
}

/// Per-category parameters of the state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Policy {
    /// Minimum seconds between propose and confirm.
    pub delay: u64,
    /// Whether a confirmed value may replace a different active value.
    /// When `false` such a confirm is a key collision.
    pub replace_active: bool,
}

/// Applies one transition to a slot.
///
/// # Errors
/// - `ProposalPending` when proposing over an existing proposal.
/// - `AlreadyActive` when proposing or confirming the value already active.
/// - `NoPendingProposal` when confirming or cancelling with nothing pending.
/// - `ValueMismatch` when the confirmed value differs from the proposal.
/// - `DelayNotElapsed` when `now < proposed_at + delay`.
/// - `KeyCollision` when a different value is active and replacement is off.
/// - `NotActive` when revoking a key with no active value.
pub fn apply<V: Clone + PartialEq>(
    slot: Slot<V>,
    transition: Transition<V>,
    now: u64,
    policy: Policy,
) -> Result<Slot<V>, ContractError> {
    let Slot { pending, active } = slot;
    match transition {
        Transition::Propose(value) => {
            if pending.is_some() {
                return Err(ContractError::ProposalPending);
            }
            if active.as_ref() == Some(&value) {
                return Err(ContractError::AlreadyActive);
            }
            Ok(Slot {
                pending: Some((value, now)),
                active,
            })
        }
        Transition::Confirm(value) => {
            let (proposed, proposed_at) = pending.ok_or(ContractError::NoPendingProposal)?;
            if proposed != value {
                return Err(ContractError::ValueMismatch);
            }
            if now < proposed_at.saturating_add(policy.delay) {
                return Err(ContractError::DelayNotElapsed);
            }
            match active {
                Some(ref current) if *current == value => return Err(ContractError::AlreadyActive),
                Some(_) if !policy.replace_active => return Err(ContractError::KeyCollision),
                _ => {}
            }
            Ok(Slot {
                pending: None,
                active: Some(value),
            })
        }
        Transition::Cancel => {
            if pending.is_none() {
                return Err(ContractError::NoPendingProposal);
            }
            Ok(Slot {
                pending: None,
                active,
            })
        }
        Transition::Revoke => {
            if active.is_none() {
                return Err(ContractError::NotActive);
            }
            Ok(Slot {
                pending,
                active: None,
            })
        }
    }
}

// ── Persisted shapes ─────────────────────────────────────────────────────────

/// Storage key of one registry entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryKey {
    /// Handler fingerprint.
    Action(BytesN<4>),
    /// Protocol tag and vault fingerprint.
    Pool(Symbol, BytesN<4>),
    /// The singleton fee configuration.
    Fee,
    /// Hash of a raw transaction awaiting approval.
    Transaction(BytesN<32>),
}

impl RegistryKey {
    pub fn category(&self) -> Category {
        match self {
            RegistryKey::Action(_) => Category::Action,
            RegistryKey::Pool(_, _) => Category::Pool,
            RegistryKey::Fee => Category::Fee,
            RegistryKey::Transaction(_) => Category::Transaction,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryValue {
    /// Handler or vault address.
    Target(Address),
    Fee(FeeConfig),
    /// Approval marker for a transaction hash.
    Approved,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingChange {
    pub value: RegistryValue,
    pub proposed_at: u64,
}

/// Persisted form of a [`Slot`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryEntry {
    pub pending: Option<PendingChange>,
    pub active: Option<RegistryValue>,
}

impl From<RegistryEntry> for Slot<RegistryValue> {
    fn from(entry: RegistryEntry) -> Self {
        Slot {
            pending: entry.pending.map(|p| (p.value, p.proposed_at)),
            active: entry.active,
        }
    }
}

impl From<Slot<RegistryValue>> for RegistryEntry {
    fn from(slot: Slot<RegistryValue>) -> Self {
        RegistryEntry {
            pending: slot
                .pending
                .map(|(value, proposed_at)| PendingChange { value, proposed_at }),
            active: slot.active,
        }
    }
}

// ── Storage glue ─────────────────────────────────────────────────────────────

pub fn set_delay(env: &Env, delay: u64) {
    env.storage().instance().set(&DELAY, &delay);
}

pub fn get_delay(env: &Env) -> u64 {
    env.storage().instance().get(&DELAY).unwrap_or(0)
}

pub fn policy_for(env: &Env, key: &RegistryKey) -> Policy {
    Policy {
        delay: get_delay(env),
        replace_active: key.category() == Category::Fee,
    }
}

fn entry_key(key: &RegistryKey) -> (Symbol, RegistryKey) {
    (ENTRY_PREFIX, key.clone())
}

/// Loads the entry for `key`; absent keys are `Unproposed`.
pub fn load_entry(env: &Env, key: &RegistryKey) -> RegistryEntry {
    env.storage()
        .persistent()
        .get(&entry_key(key))
        .unwrap_or(RegistryEntry {
            pending: None,
            active: None,
        })
}

fn store_entry(env: &Env, key: &RegistryKey, entry: &RegistryEntry) {
    let storage_key = entry_key(key);
    if entry.pending.is_none() && entry.active.is_none() {
        env.storage().persistent().remove(&storage_key);
        return;
    }
    env.storage().persistent().set(&storage_key, entry);
    env.storage()
        .persistent()
        .extend_ttl(&storage_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Loads, transitions and persists the entry for `key` at the current
/// ledger time.
pub fn transition(
    env: &Env,
    key: &RegistryKey,
    event: Transition<RegistryValue>,
) -> Result<RegistryEntry, ContractError> {
    let slot: Slot<RegistryValue> = load_entry(env, key).into();
    let next = apply(slot, event, env.ledger().timestamp(), policy_for(env, key))?;
    let entry: RegistryEntry = next.into();
    store_entry(env, key, &entry);
    Ok(entry)
}

/// The active value of `key`, if any.
pub fn active_value(env: &Env, key: &RegistryKey) -> Option<RegistryValue> {
    load_entry(env, key).active
}
