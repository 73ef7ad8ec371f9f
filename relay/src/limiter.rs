//! Per-domain transfer limits
//!
//! Each destination domain carries a size range, a daily volume cap and a fee
//! rate. The volume window is fixed-length and evaluated lazily: it rolls
//! over on the first reservation (or read) at least [`DAILY_WINDOW`] seconds
//! after it started.

use cosmwasm_std::{Storage, Timestamp, Uint128};

use crate::error::ContractError;
use crate::fee_manager::validate_fee_bps;
use crate::state::{ChainConfig, CHAINS, DAILY_WINDOW};

/// Parameters of a `SetChainConfig` call
pub struct ChainLimits {
    pub supported: bool,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
    pub daily_limit: Uint128,
    pub fee_bps: u64,
}

/// Replace the limits of a domain, keeping its current window
pub fn set_chain_config(
    storage: &mut dyn Storage,
    now: Timestamp,
    local_domain_id: u64,
    domain_id: u64,
    limits: ChainLimits,
) -> Result<ChainConfig, ContractError> {
    if domain_id == 0 {
        return Err(ContractError::InvalidChainConfig {
            reason: "domain id 0 is reserved".to_string(),
        });
    }
    if domain_id == local_domain_id {
        return Err(ContractError::InvalidChainConfig {
            reason: format!("domain {} is the local domain", domain_id),
        });
    }
    if limits.min_amount > limits.max_amount {
        return Err(ContractError::InvalidChainConfig {
            reason: format!(
                "min_amount {} exceeds max_amount {}",
                limits.min_amount, limits.max_amount
            ),
        });
    }
    validate_fee_bps(limits.fee_bps)?;

    let (window_start, window_volume) = match CHAINS.may_load(storage, domain_id)? {
        Some(existing) => (existing.window_start, existing.window_volume),
        None => (now, Uint128::zero()),
    };

    let config = ChainConfig {
        domain_id,
        supported: limits.supported,
        min_amount: limits.min_amount,
        max_amount: limits.max_amount,
        daily_limit: limits.daily_limit,
        fee_bps: limits.fee_bps,
        window_start,
        window_volume,
    };
    CHAINS.save(storage, domain_id, &config)?;

    Ok(config)
}

/// Window start and volume as seen at `now`
pub fn current_window(config: &ChainConfig, now: Timestamp) -> (Timestamp, Uint128) {
    if now.seconds() >= config.window_start.seconds() + DAILY_WINDOW {
        (now, Uint128::zero())
    } else {
        (config.window_start, config.window_volume)
    }
}

/// Check a transfer against the domain limits and reserve its volume
///
/// Checks run in a fixed order: daily cap, minimum, maximum, then support.
/// Nothing is written unless every check passes.
pub fn check_and_reserve(
    storage: &mut dyn Storage,
    now: Timestamp,
    domain_id: u64,
    gross_amount: Uint128,
) -> Result<ChainConfig, ContractError> {
    let mut config = CHAINS
        .may_load(storage, domain_id)?
        .ok_or(ContractError::ChainNotSupported { domain_id })?;

    let (window_start, used) = current_window(&config, now);
    config.window_start = window_start;
    config.window_volume = used;

    let new_volume = match used.checked_add(gross_amount) {
        Ok(volume) if volume <= config.daily_limit => volume,
        _ => {
            return Err(ContractError::DailyLimitExceeded {
                domain_id,
                daily_limit: config.daily_limit,
                used,
                requested: gross_amount,
            })
        }
    };

    if gross_amount < config.min_amount {
        return Err(ContractError::BelowMinimum {
            domain_id,
            amount: gross_amount,
            min_amount: config.min_amount,
        });
    }

    if gross_amount > config.max_amount {
        return Err(ContractError::AboveMaximum {
            domain_id,
            amount: gross_amount,
            max_amount: config.max_amount,
        });
    }

    if !config.supported {
        return Err(ContractError::ChainNotSupported { domain_id });
    }

    config.window_volume = new_volume;
    CHAINS.save(storage, domain_id, &config)?;

    Ok(config)
}
