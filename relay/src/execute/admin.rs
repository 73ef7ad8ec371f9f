//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause
//! - Admin transfer (propose/accept/cancel)
//! - Relayer registration
//! - Fee collector and liquidity pool

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::ledger;
use crate::state::{PendingAdmin, ADMIN_TIMELOCK_DURATION, CONFIG, LIQUIDITY, PENDING_ADMIN, RELAYERS};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the relay. Blocks `Bridge` and `ProcessIncoming`; refunds stay open.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.paused = true;
        Ok(config)
    })?;

    Ok(Response::new().add_attribute("method", "pause"))
}

/// Unpause the relay.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.paused = false;
        Ok(config)
    })?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Propose a new admin (starts timelock).
pub fn execute_propose_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let new_admin_addr = deps.api.addr_validate(&new_admin)?;
    let pending = PendingAdmin {
        new_address: new_admin_addr.clone(),
        execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
    };
    PENDING_ADMIN.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_admin")
        .add_attribute("new_admin", new_admin_addr.to_string())
        .add_attribute("execute_after", pending.execute_after.seconds().to_string()))
}

/// Accept pending admin role (after timelock).
pub fn execute_accept_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    if env.block.time < pending.execute_after {
        let remaining = pending.execute_after.seconds() - env.block.time.seconds();
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: remaining,
        });
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.admin = pending.new_address.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_admin")
        .add_attribute("new_admin", pending.new_address.to_string()))
}

/// Cancel pending admin proposal.
pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    if !PENDING_ADMIN.exists(deps.storage) {
        return Err(ContractError::NoPendingAdmin);
    }
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_admin_proposal"))
}

// ============================================================================
// Relayers
// ============================================================================

pub fn execute_add_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let relayer_addr = deps.api.addr_validate(&relayer)?;
    if RELAYERS.may_load(deps.storage, &relayer_addr)?.unwrap_or(false) {
        return Err(ContractError::RelayerAlreadyRegistered);
    }
    RELAYERS.save(deps.storage, &relayer_addr, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_relayer")
        .add_attribute("relayer", relayer_addr))
}

pub fn execute_remove_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let relayer_addr = deps.api.addr_validate(&relayer)?;
    if !RELAYERS.may_load(deps.storage, &relayer_addr)?.unwrap_or(false) {
        return Err(ContractError::RelayerNotRegistered);
    }
    RELAYERS.remove(deps.storage, &relayer_addr);

    Ok(Response::new()
        .add_attribute("method", "remove_relayer")
        .add_attribute("relayer", relayer_addr))
}

// ============================================================================
// Fees & Liquidity
// ============================================================================

pub fn execute_set_fee_collector(
    deps: DepsMut,
    info: MessageInfo,
    fee_collector: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let fee_collector_addr = deps.api.addr_validate(&fee_collector)?;
    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.fee_collector = fee_collector_addr.clone();
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_collector")
        .add_attribute("fee_collector", fee_collector_addr))
}

/// Deposit into the pool that pays inbound transfers. Open to anyone.
pub fn execute_add_liquidity(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Liquidity amount must be greater than zero".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    ledger::debit(&info, &config.denom, amount)?;

    let liquidity = LIQUIDITY.load(deps.storage)?.checked_add(amount)?;
    LIQUIDITY.save(deps.storage, &liquidity)?;

    Ok(Response::new()
        .add_attribute("method", "add_liquidity")
        .add_attribute("provider", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("liquidity", liquidity.to_string()))
}
