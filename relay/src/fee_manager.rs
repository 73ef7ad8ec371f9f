//! Fee Manager Module
//!
//! Fee calculation for outbound transfers. The rate is configured per
//! destination domain in basis points:
//!
//! | feeBps | Rate   |
//! |--------|--------|
//! | 0      | free   |
//! | 100    | 1%     |
//! | 10000  | 100%   |
//!
//! `fee = floor(gross * feeBps / 10000)` and `net = gross - fee`, so
//! `fee + net == gross` for every amount.

use cosmwasm_std::Uint128;

use crate::error::ContractError;

// ============================================================================
// Constants
// ============================================================================

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10000;

/// Highest configurable fee rate
pub const MAX_FEE_BPS: u64 = BPS_DENOMINATOR;

// ============================================================================
// Fee Calculation Functions
// ============================================================================

/// Calculate the fee owed on `gross_amount` at `fee_bps`
///
/// Rates above 100% are clamped so the fee never exceeds the amount.
pub fn compute_fee(gross_amount: Uint128, fee_bps: u64) -> Uint128 {
    let fee_bps = fee_bps.min(BPS_DENOMINATOR);
    gross_amount.multiply_ratio(fee_bps, BPS_DENOMINATOR)
}

/// Split a gross amount into `(fee, net)`
pub fn split_fee(gross_amount: Uint128, fee_bps: u64) -> (Uint128, Uint128) {
    let fee = compute_fee(gross_amount, fee_bps);
    (fee, gross_amount - fee)
}

/// Validate a configured fee rate
pub fn validate_fee_bps(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(ContractError::InvalidChainConfig {
            reason: format!("fee_bps {} exceeds max {}", fee_bps, MAX_FEE_BPS),
        });
    }
    Ok(())
}
