//! Quorum Relay Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_add_liquidity, execute_add_relayer, execute_add_validator,
    execute_batch_validate, execute_bridge, execute_cancel_admin_proposal, execute_pause,
    execute_process_incoming, execute_propose_admin, execute_refund, execute_remove_relayer,
    execute_remove_validator, execute_set_chain_config, execute_set_fee_collector,
    execute_set_required_validations, execute_unpause, execute_validate_bridge,
};
use crate::hash::parse_signer;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_chain_config, query_config, query_estimate_fee, query_is_processed, query_is_validator,
    query_liquidity, query_message_digest, query_pending_admin, query_period_usage,
    query_relayers, query_request, query_requests, query_statistics, query_supported_chains,
    query_validators,
};
use crate::registry;
use crate::state::{
    Config, Stats, ACTIVE_VALIDATOR_COUNT, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LIQUIDITY,
    LOCKED, NEXT_REQUEST_ID, RELAYERS, REQUIRED_VALIDATIONS, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let fee_collector = deps.api.addr_validate(&msg.fee_collector)?;

    if msg.denom.trim().is_empty() {
        return Err(ContractError::InvalidAmount {
            reason: "Denom cannot be empty".to_string(),
        });
    }

    if msg.local_domain_id == 0 {
        return Err(ContractError::InvalidChainConfig {
            reason: "domain id 0 is reserved".to_string(),
        });
    }

    let config = Config {
        admin,
        paused: false,
        fee_collector,
        denom: msg.denom,
        local_domain_id: msg.local_domain_id,
    };
    CONFIG.save(deps.storage, &config)?;

    // Validator set, then the threshold it must satisfy
    ACTIVE_VALIDATOR_COUNT.save(deps.storage, &0u32)?;
    REQUIRED_VALIDATIONS.save(deps.storage, &0u32)?;
    for validator in &msg.validators {
        let identity = deps.api.addr_validate(&validator.identity)?;
        let signer = parse_signer(&validator.signer)?;
        registry::add_validator(deps.storage, &identity, signer, env.block.time)?;
    }
    registry::set_required_validations(deps.storage, msg.required_validations)?;

    for relayer in &msg.relayers {
        let relayer = deps.api.addr_validate(relayer)?;
        RELAYERS.save(deps.storage, &relayer, &true)?;
    }

    STATS.save(deps.storage, &Stats::default())?;
    NEXT_REQUEST_ID.save(deps.storage, &0u64)?;
    LIQUIDITY.save(deps.storage, &Uint128::zero())?;
    LOCKED.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("denom", config.denom)
        .add_attribute("local_domain_id", config.local_domain_id.to_string())
        .add_attribute(
            "validators",
            registry::active_count(deps.storage)?.to_string(),
        )
        .add_attribute("required_validations", msg.required_validations.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing transfers
        ExecuteMsg::Bridge {
            recipient,
            amount,
            domain_id,
        } => execute_bridge(deps, env, info, recipient, amount, domain_id),
        ExecuteMsg::Refund { request_id } => execute_refund(deps, env, request_id),

        // Validator votes
        ExecuteMsg::ValidateBridge { request_id } => {
            execute_validate_bridge(deps, info, request_id)
        }
        ExecuteMsg::BatchValidate { request_ids } => {
            execute_batch_validate(deps, info, request_ids)
        }

        // Incoming transfers
        ExecuteMsg::ProcessIncoming {
            source_request_id,
            recipient,
            amount,
            source_domain_id,
            signatures,
        } => execute_process_incoming(
            deps,
            info,
            source_request_id,
            recipient,
            amount,
            source_domain_id,
            signatures,
        ),
        ExecuteMsg::AddLiquidity { amount } => execute_add_liquidity(deps, info, amount),

        // Validator management
        ExecuteMsg::AddValidator { identity, signer } => {
            execute_add_validator(deps, env, info, identity, signer)
        }
        ExecuteMsg::RemoveValidator { identity } => execute_remove_validator(deps, info, identity),
        ExecuteMsg::SetRequiredValidations { required } => {
            execute_set_required_validations(deps, info, required)
        }

        // Chain management
        ExecuteMsg::SetChainConfig {
            domain_id,
            supported,
            min_amount,
            max_amount,
            daily_limit,
            fee_bps,
        } => execute_set_chain_config(
            deps,
            env,
            info,
            domain_id,
            supported,
            min_amount,
            max_amount,
            daily_limit,
            fee_bps,
        ),

        // Admin operations
        ExecuteMsg::AddRelayer { relayer } => execute_add_relayer(deps, info, relayer),
        ExecuteMsg::RemoveRelayer { relayer } => execute_remove_relayer(deps, info, relayer),
        ExecuteMsg::SetFeeCollector { fee_collector } => {
            execute_set_fee_collector(deps, info, fee_collector)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Statistics {} => to_json_binary(&query_statistics(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::Liquidity {} => to_json_binary(&query_liquidity(deps)?),

        // Chain queries
        QueryMsg::SupportedChains {} => to_json_binary(&query_supported_chains(deps)?),
        QueryMsg::ChainConfig { domain_id } => to_json_binary(&query_chain_config(deps, domain_id)?),
        QueryMsg::PeriodUsage { domain_id } => {
            to_json_binary(&query_period_usage(deps, env, domain_id)?)
        }
        QueryMsg::EstimateFee { amount, domain_id } => {
            to_json_binary(&query_estimate_fee(deps, amount, domain_id)?)
        }

        // Validator & relayer queries
        QueryMsg::Validators {} => to_json_binary(&query_validators(deps)?),
        QueryMsg::IsValidator { identity } => to_json_binary(&query_is_validator(deps, identity)?),
        QueryMsg::Relayers {} => to_json_binary(&query_relayers(deps)?),

        // Request queries
        QueryMsg::Request { request_id } => to_json_binary(&query_request(deps, request_id)?),
        QueryMsg::Requests { start_after, limit } => {
            to_json_binary(&query_requests(deps, start_after, limit)?)
        }

        // Incoming queries
        QueryMsg::IsProcessed {
            source_domain_id,
            source_request_id,
        } => to_json_binary(&query_is_processed(
            deps,
            source_domain_id,
            source_request_id,
        )?),
        QueryMsg::MessageDigest {
            source_request_id,
            recipient,
            amount,
            source_domain_id,
        } => to_json_binary(&query_message_digest(
            deps,
            source_request_id,
            recipient,
            amount,
            source_domain_id,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
