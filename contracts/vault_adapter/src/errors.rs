use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AdapterError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 50,
    InsufficientBalance = 51,
    ArithmeticOverflow = 52,
}
