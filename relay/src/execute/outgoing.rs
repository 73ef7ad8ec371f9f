//! Outgoing transfer handlers (Bridge and Refund).
//!
//! `Bridge` locks the sender's funds for a destination domain and records a
//! request for validators to vote on. If the request is never completed, the
//! sender can reclaim the net amount once it has expired.

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::fee_manager::split_fee;
use crate::ledger;
use crate::limiter;
use crate::msg::BridgeResponse;
use crate::state::{
    BridgeRequest, RequestStatus, CONFIG, LOCKED, NEXT_REQUEST_ID, REQUESTS, REQUEST_EXPIRY_WINDOW,
    STATS,
};

/// Lock `amount` of the configured denom for transfer to `domain_id`.
pub fn execute_bridge(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
    domain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Bridge amount must be greater than zero".to_string(),
        });
    }

    let recipient = recipient.trim().to_string();
    if recipient.is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "Recipient cannot be empty".to_string(),
        });
    }

    let chain = limiter::check_and_reserve(deps.storage, env.block.time, domain_id, amount)?;
    ledger::debit(&info, &config.denom, amount)?;

    let (fee, net_amount) = split_fee(amount, chain.fee_bps);

    let request_id = NEXT_REQUEST_ID.load(deps.storage)?;
    NEXT_REQUEST_ID.save(deps.storage, &(request_id + 1))?;

    let request = BridgeRequest {
        id: request_id,
        sender: info.sender.clone(),
        recipient: recipient.clone(),
        gross_amount: amount,
        fee,
        net_amount,
        domain_id,
        status: RequestStatus::Pending,
        created_at: env.block.time,
        voted_validators: vec![],
    };
    REQUESTS.save(deps.storage, request_id, &request)?;

    let locked = LOCKED.load(deps.storage)?.checked_add(net_amount)?;
    LOCKED.save(deps.storage, &locked)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_bridged_out = stats.total_bridged_out.checked_add(amount)?;
    stats.total_fees_collected = stats.total_fees_collected.checked_add(fee)?;
    stats.total_requests += 1;
    STATS.save(deps.storage, &stats)?;

    let mut response = Response::new();
    if !fee.is_zero() {
        response = response.add_message(ledger::credit(&config.fee_collector, &config.denom, fee));
    }

    Ok(response
        .set_data(to_json_binary(&BridgeResponse { request_id })?)
        .add_attribute("method", "bridge")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("domain_id", domain_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string())
        .add_attribute("net_amount", net_amount.to_string())
        .add_attribute("window_volume", chain.window_volume.to_string()))
}

/// Return the net amount of an expired request to its sender.
///
/// Anyone may trigger a refund; the funds always go to the recorded sender.
/// Refunds are not affected by pause.
pub fn execute_refund(
    deps: DepsMut,
    env: Env,
    request_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotFound { request_id })?;

    let expires_at = request.created_at.plus_seconds(REQUEST_EXPIRY_WINDOW);
    if env.block.time < expires_at {
        return Err(ContractError::NotExpired {
            remaining_seconds: expires_at.seconds() - env.block.time.seconds(),
        });
    }

    if request.status == RequestStatus::Refunded {
        return Err(ContractError::AlreadyRefunded { request_id });
    }

    let previous_status = request.status.clone();
    request.status = RequestStatus::Refunded;
    REQUESTS.save(deps.storage, request_id, &request)?;

    let locked = LOCKED.load(deps.storage)?.checked_sub(request.net_amount)?;
    LOCKED.save(deps.storage, &locked)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_refunded = stats.total_refunded.checked_add(request.net_amount)?;
    STATS.save(deps.storage, &stats)?;

    let mut response = Response::new();
    if !request.net_amount.is_zero() {
        response = response.add_message(ledger::credit(
            &request.sender,
            &config.denom,
            request.net_amount,
        ));
    }

    Ok(response
        .add_attribute("method", "refund")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("sender", request.sender.to_string())
        .add_attribute("amount", request.net_amount.to_string())
        .add_attribute("previous_status", previous_status.as_str()))
}
