//! Query handlers for the Quorum Relay contract.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult, Timestamp, Uint128};
use cw_storage_plus::Bound;

use crate::fee_manager::split_fee;
use crate::hash::{bytes32_to_hex, compute_incoming_digest, signer_to_hex};
use crate::limiter::current_window;
use crate::msg::{
    ChainConfigResponse, ConfigResponse, EstimateFeeResponse, IsProcessedResponse,
    IsValidatorResponse, LiquidityResponse, MessageDigestResponse, PendingAdminResponse,
    PeriodUsageResponse, RelayersResponse, RequestResponse, RequestsResponse, StatisticsResponse,
    SupportedChainsResponse, ValidatorInfo, ValidatorsResponse,
};
use crate::registry::{active_count, is_validator, list_validators};
use crate::state::{
    BridgeRequest, ChainConfig, CHAINS, CONFIG, DAILY_WINDOW, LIQUIDITY, LOCKED, PENDING_ADMIN,
    PROCESSED_INCOMING, RELAYERS, REQUESTS, REQUEST_EXPIRY_WINDOW, REQUIRED_VALIDATIONS, STATS,
};

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        fee_collector: config.fee_collector,
        denom: config.denom,
        local_domain_id: config.local_domain_id,
        required_validations: REQUIRED_VALIDATIONS.load(deps.storage)?,
        active_validators: active_count(deps.storage)?,
    })
}

/// Query relay statistics.
pub fn query_statistics(deps: Deps) -> StdResult<StatisticsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatisticsResponse {
        total_bridged_out: stats.total_bridged_out,
        total_fees_collected: stats.total_fees_collected,
        total_requests: stats.total_requests,
        total_bridged_in: stats.total_bridged_in,
        total_incoming: stats.total_incoming,
        total_refunded: stats.total_refunded,
    })
}

/// Query pending admin transfer.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

pub fn query_liquidity(deps: Deps) -> StdResult<LiquidityResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(LiquidityResponse {
        denom: config.denom,
        available: LIQUIDITY.load(deps.storage)?,
        locked: LOCKED.load(deps.storage)?,
    })
}

// ============================================================================
// Chain Queries
// ============================================================================

/// Domains currently accepting transfers, ascending.
pub fn query_supported_chains(deps: Deps) -> StdResult<SupportedChainsResponse> {
    let domain_ids = CHAINS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((domain_id, chain)) if chain.supported => Some(Ok(domain_id)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SupportedChainsResponse { domain_ids })
}

fn load_chain(deps: Deps, domain_id: u64) -> StdResult<ChainConfig> {
    CHAINS
        .may_load(deps.storage, domain_id)?
        .ok_or_else(|| StdError::not_found(format!("chain config for domain {}", domain_id)))
}

pub fn query_chain_config(deps: Deps, domain_id: u64) -> StdResult<ChainConfigResponse> {
    let chain = load_chain(deps, domain_id)?;
    Ok(ChainConfigResponse {
        domain_id: chain.domain_id,
        supported: chain.supported,
        min_amount: chain.min_amount,
        max_amount: chain.max_amount,
        daily_limit: chain.daily_limit,
        fee_bps: chain.fee_bps,
    })
}

/// Volume used in the current window, as it would be seen by a transfer now.
pub fn query_period_usage(deps: Deps, env: Env, domain_id: u64) -> StdResult<PeriodUsageResponse> {
    let chain = load_chain(deps, domain_id)?;
    let (window_start, used) = current_window(&chain, env.block.time);

    let remaining = chain.daily_limit.saturating_sub(used);
    let resets_at = Timestamp::from_seconds(window_start.seconds() + DAILY_WINDOW);

    Ok(PeriodUsageResponse {
        domain_id,
        window_start,
        resets_at,
        used,
        daily_limit: chain.daily_limit,
        remaining,
    })
}

pub fn query_estimate_fee(
    deps: Deps,
    amount: Uint128,
    domain_id: u64,
) -> StdResult<EstimateFeeResponse> {
    let chain = load_chain(deps, domain_id)?;
    let (fee, net_amount) = split_fee(amount, chain.fee_bps);
    Ok(EstimateFeeResponse {
        gross_amount: amount,
        fee,
        net_amount,
        fee_bps: chain.fee_bps,
    })
}

// ============================================================================
// Validator & Relayer Queries
// ============================================================================

pub fn query_validators(deps: Deps) -> StdResult<ValidatorsResponse> {
    let validators = list_validators(deps.storage)?
        .into_iter()
        .map(|v| ValidatorInfo {
            identity: v.identity,
            signer: signer_to_hex(&v.signer),
            added_at: v.added_at,
        })
        .collect();

    Ok(ValidatorsResponse {
        validators,
        required_validations: REQUIRED_VALIDATIONS.load(deps.storage)?,
    })
}

pub fn query_is_validator(deps: Deps, identity: String) -> StdResult<IsValidatorResponse> {
    let addr = deps.api.addr_validate(&identity)?;
    Ok(IsValidatorResponse {
        identity,
        is_validator: is_validator(deps.storage, &addr)?,
    })
}

pub fn query_relayers(deps: Deps) -> StdResult<RelayersResponse> {
    let relayers = RELAYERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RelayersResponse { relayers })
}

// ============================================================================
// Request Queries
// ============================================================================

fn request_response(request: BridgeRequest) -> RequestResponse {
    RequestResponse {
        expires_at: request.created_at.plus_seconds(REQUEST_EXPIRY_WINDOW),
        id: request.id,
        sender: request.sender,
        recipient: request.recipient,
        gross_amount: request.gross_amount,
        fee: request.fee,
        net_amount: request.net_amount,
        domain_id: request.domain_id,
        status: request.status,
        created_at: request.created_at,
        voted_validators: request.voted_validators,
    }
}

pub fn query_request(deps: Deps, request_id: u64) -> StdResult<RequestResponse> {
    let request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or_else(|| StdError::not_found(format!("bridge request {}", request_id)))?;
    Ok(request_response(request))
}

/// Query paginated list of requests.
pub fn query_requests(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<RequestsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);

    let requests = REQUESTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, request) = item?;
            Ok(request_response(request))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RequestsResponse { requests })
}

// ============================================================================
// Incoming Queries
// ============================================================================

pub fn query_is_processed(
    deps: Deps,
    source_domain_id: u64,
    source_request_id: u64,
) -> StdResult<IsProcessedResponse> {
    Ok(IsProcessedResponse {
        source_domain_id,
        source_request_id,
        processed: PROCESSED_INCOMING.has(deps.storage, (source_domain_id, source_request_id)),
    })
}

/// Compute the attestation digest without touching state.
///
/// The recipient is validated the same way `ProcessIncoming` does, so the
/// returned digest is exactly what validators must sign.
pub fn query_message_digest(
    deps: Deps,
    source_request_id: u64,
    recipient: String,
    amount: Uint128,
    source_domain_id: u64,
) -> StdResult<MessageDigestResponse> {
    let config = CONFIG.load(deps.storage)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;
    let digest = compute_incoming_digest(
        source_request_id,
        recipient_addr.as_str(),
        amount.u128(),
        source_domain_id,
        config.local_domain_id,
    );
    Ok(MessageDigestResponse {
        digest: Binary::from(digest.to_vec()),
        digest_hex: bytes32_to_hex(&digest),
    })
}
