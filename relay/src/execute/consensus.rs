//! Validator vote handlers (ValidateBridge and BatchValidate).
//!
//! Each active validator casts at most one vote per outbound request. A
//! request becomes `Validated` once its vote count reaches the quorum
//! threshold in force at the time of the vote.

use std::collections::HashSet;

use cosmwasm_std::{to_json_binary, Addr, DepsMut, MessageInfo, Response, Storage};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::msg::{BatchRejection, BatchValidateResponse};
use crate::registry::{StoredValidatorSet, ValidatorSet};
use crate::state::{BridgeRequest, RequestStatus, MAX_BATCH_SIZE, REQUESTS};

/// Record `voter`'s vote on a request, promoting it at quorum.
pub(crate) fn record_vote(
    storage: &mut dyn Storage,
    required: u32,
    request_id: u64,
    voter: &Addr,
) -> Result<BridgeRequest, ContractError> {
    let mut request = REQUESTS
        .may_load(storage, request_id)?
        .ok_or(ContractError::RequestNotFound { request_id })?;

    if request.voted_validators.contains(voter) {
        return Err(ContractError::AlreadyValidated { request_id });
    }

    match request.status {
        RequestStatus::Pending => {}
        RequestStatus::Validated => return Err(ContractError::AlreadyValidated { request_id }),
        RequestStatus::Refunded => return Err(ContractError::AlreadyRefunded { request_id }),
    }

    request.voted_validators.push(voter.clone());
    if request.voted_validators.len() as u64 >= u64::from(required) {
        request.status = RequestStatus::Validated;
    }
    REQUESTS.save(storage, request_id, &request)?;

    Ok(request)
}

pub fn execute_validate_bridge(
    deps: DepsMut,
    info: MessageInfo,
    request_id: u64,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Validator)?;

    let required = StoredValidatorSet::new(deps.storage).required_validations()?;
    let request = record_vote(deps.storage, required, request_id, &info.sender)?;

    Ok(Response::new()
        .add_attribute("method", "validate_bridge")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("validator", info.sender)
        .add_attribute("votes", request.voted_validators.len().to_string())
        .add_attribute("required_validations", required.to_string())
        .add_attribute("status", request.status.as_str()))
}

/// Vote on many requests at once. Each id succeeds or fails on its own.
pub fn execute_batch_validate(
    deps: DepsMut,
    info: MessageInfo,
    request_ids: Vec<u64>,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Validator)?;

    if request_ids.is_empty() {
        return Err(ContractError::InvalidBatch {
            reason: "Batch cannot be empty".to_string(),
        });
    }
    if request_ids.len() > MAX_BATCH_SIZE {
        return Err(ContractError::InvalidBatch {
            reason: format!(
                "Batch of {} exceeds max {}",
                request_ids.len(),
                MAX_BATCH_SIZE
            ),
        });
    }

    let required = StoredValidatorSet::new(deps.storage).required_validations()?;

    let mut seen = HashSet::new();
    let mut accepted = Vec::new();
    let mut validated = Vec::new();
    let mut rejected = Vec::new();

    for request_id in request_ids {
        if !seen.insert(request_id) {
            rejected.push(BatchRejection {
                request_id,
                reason: ContractError::DuplicateValidatorVote { request_id }.to_string(),
            });
            continue;
        }

        match record_vote(deps.storage, required, request_id, &info.sender) {
            Ok(request) => {
                if request.status == RequestStatus::Validated {
                    validated.push(request_id);
                }
                accepted.push(request_id);
            }
            Err(err @ (ContractError::Std(_) | ContractError::Overflow(_))) => return Err(err),
            Err(err) => rejected.push(BatchRejection {
                request_id,
                reason: err.to_string(),
            }),
        }
    }

    let rejected_ids: Vec<u64> = rejected.iter().map(|r| r.request_id).collect();
    let mut response = Response::new()
        .add_attribute("method", "batch_validate")
        .add_attribute("validator", info.sender.to_string())
        .add_attribute("accepted_count", accepted.len().to_string())
        .add_attribute("rejected_count", rejected.len().to_string());
    for (key, ids) in [
        ("accepted", &accepted),
        ("validated", &validated),
        ("rejected", &rejected_ids),
    ] {
        if !ids.is_empty() {
            response = response.add_attribute(key, join_ids(ids));
        }
    }
    for rejection in &rejected {
        response = response.add_attribute(
            format!("rejected_{}", rejection.request_id),
            rejection.reason.clone(),
        );
    }

    Ok(response.set_data(to_json_binary(&BatchValidateResponse {
        accepted,
        validated,
        rejected,
    })?))
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
