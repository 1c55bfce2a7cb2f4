use soroban_sdk::contracttype;

/// Error families used by operators and off-chain simulation to decide how
/// to react to a failed call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Initialisation order problems.
    Lifecycle = 1,
    /// The caller lacks the role the operation is gated on.
    Unauthorized = 2,
    /// The operation is valid but not in the entry's current state.
    InvalidState = 3,
    /// Two different targets map to the same registry key.
    KeyCollision = 4,
    /// A lookup hit an absent or inactive entry.
    NotFound = 5,
    /// Malformed arguments.
    Validation = 6,
}

/// Contract errors.
///
/// # Code ranges
/// | Range   | Purpose              |
/// |---------|----------------------|
/// | 1 – 9   | Lifecycle            |
/// | 10 – 19 | Authorization        |
/// | 20 – 29 | Invalid state        |
/// | 30 – 39 | Key collision        |
/// | 40 – 49 | Not found            |
/// | 50 – 59 | Validation / input   |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    Unauthorized = 10,

    ProposalPending = 20,
    NoPendingProposal = 21,
    ValueMismatch = 22,
    DelayNotElapsed = 23,
    AlreadyActive = 24,
    NotActive = 25,
    LastOwner = 26,

    KeyCollision = 30,

    ActionNotFound = 40,
    PoolNotFound = 41,
    FeeConfigNotSet = 42,

    InvalidInput = 50,
    InvalidFeeRate = 51,
    ArithmeticOverflow = 52,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Unauthorized,
            ContractError::ProposalPending
            | ContractError::NoPendingProposal
            | ContractError::ValueMismatch
            | ContractError::DelayNotElapsed
            | ContractError::AlreadyActive
            | ContractError::NotActive
            | ContractError::LastOwner => ErrorCategory::InvalidState,
            ContractError::KeyCollision => ErrorCategory::KeyCollision,
            ContractError::ActionNotFound
            | ContractError::PoolNotFound
            | ContractError::FeeConfigNotSet => ErrorCategory::NotFound,
            ContractError::InvalidInput
            | ContractError::InvalidFeeRate
            | ContractError::ArithmeticOverflow => ErrorCategory::Validation,
        }
    }

    /// Human-readable description of the error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller does not hold the required role",
            ContractError::ProposalPending => "A proposal is already pending for this key",
            ContractError::NoPendingProposal => "No proposal is pending for this key",
            ContractError::ValueMismatch => "Confirmed value differs from the proposed value",
            ContractError::DelayNotElapsed => "Timelock delay has not elapsed",
            ContractError::AlreadyActive => "Value is already active for this key",
            ContractError::NotActive => "No active entry exists for this key",
            ContractError::LastOwner => "At least one owner must remain",
            ContractError::KeyCollision => "Key is already bound to a different target",
            ContractError::ActionNotFound => "Action handler is not registered",
            ContractError::PoolNotFound => "Vault is not registered",
            ContractError::FeeConfigNotSet => "Fee configuration is not active",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::InvalidFeeRate => "Fee rate exceeds the maximum",
            ContractError::ArithmeticOverflow => "Fee computation overflowed",
        }
    }
}
