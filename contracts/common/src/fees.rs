use soroban_sdk::{contracttype, Address};

/// Denominator for rates expressed in basis points.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Length of the accrual year in seconds (365 days).
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Upper bound accepted for any fee rate.
pub const MAX_FEE_RATE_BPS: u32 = 10_000;

/// Global performance-fee settings, activated through the fee timelock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    /// Address receiving settled fees.
    pub recipient: Address,
    /// Annualised fee rate in basis points.
    pub rate_bps: u32,
}

impl FeeConfig {
    pub fn is_valid(&self) -> bool {
        self.rate_bps <= MAX_FEE_RATE_BPS
    }
}
