//! Configuration handlers.
//!
//! Validator registry, quorum threshold and per-domain limits. All admin-only.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::hash::{parse_signer, signer_to_hex};
use crate::limiter::{self, ChainLimits};
use crate::registry;
use crate::state::CONFIG;

// ============================================================================
// Validator Management
// ============================================================================

pub fn execute_add_validator(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    identity: String,
    signer: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let identity_addr = deps.api.addr_validate(&identity)?;
    let signer = parse_signer(&signer)?;
    let activated = registry::add_validator(deps.storage, &identity_addr, signer, env.block.time)?;

    Ok(Response::new()
        .add_attribute("method", "add_validator")
        .add_attribute("validator", identity_addr)
        .add_attribute("signer", signer_to_hex(&signer))
        .add_attribute("activated", activated.to_string())
        .add_attribute("active_validators", registry::active_count(deps.storage)?.to_string()))
}

pub fn execute_remove_validator(
    deps: DepsMut,
    info: MessageInfo,
    identity: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let identity_addr = deps.api.addr_validate(&identity)?;
    registry::remove_validator(deps.storage, &identity_addr)?;

    Ok(Response::new()
        .add_attribute("method", "remove_validator")
        .add_attribute("validator", identity_addr)
        .add_attribute("active_validators", registry::active_count(deps.storage)?.to_string()))
}

pub fn execute_set_required_validations(
    deps: DepsMut,
    info: MessageInfo,
    required: u32,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    registry::set_required_validations(deps.storage, required)?;

    Ok(Response::new()
        .add_attribute("method", "set_required_validations")
        .add_attribute("required_validations", required.to_string()))
}

// ============================================================================
// Chain Management
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn execute_set_chain_config(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    domain_id: u64,
    supported: bool,
    min_amount: Uint128,
    max_amount: Uint128,
    daily_limit: Uint128,
    fee_bps: u64,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let config = CONFIG.load(deps.storage)?;
    let chain = limiter::set_chain_config(
        deps.storage,
        env.block.time,
        config.local_domain_id,
        domain_id,
        ChainLimits {
            supported,
            min_amount,
            max_amount,
            daily_limit,
            fee_bps,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_chain_config")
        .add_attribute("domain_id", domain_id.to_string())
        .add_attribute("supported", chain.supported.to_string())
        .add_attribute("min_amount", chain.min_amount.to_string())
        .add_attribute("max_amount", chain.max_amount.to_string())
        .add_attribute("daily_limit", chain.daily_limit.to_string())
        .add_attribute("fee_bps", chain.fee_bps.to_string()))
}
