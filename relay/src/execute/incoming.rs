//! Incoming transfer handler (ProcessIncoming).
//!
//! A relayer submits a transfer that happened on another domain together with
//! validator signatures over its digest. Once enough distinct active
//! validators have signed, the recipient is paid from the liquidity pool and
//! the source event is marked processed.

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Uint128};

use crate::attestation::{collect_attestations, Secp256k1Verifier};
use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_incoming_digest};
use crate::ledger;
use crate::registry::{StoredValidatorSet, ValidatorSet};
use crate::state::{CONFIG, LIQUIDITY, PROCESSED_INCOMING, STATS};

pub fn execute_process_incoming(
    deps: DepsMut,
    info: MessageInfo,
    source_request_id: u64,
    recipient: String,
    amount: Uint128,
    source_domain_id: u64,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    ensure_capability(deps.storage, &info.sender, Capability::Relayer)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Incoming amount must be greater than zero".to_string(),
        });
    }

    let replay_key = (source_domain_id, source_request_id);
    if PROCESSED_INCOMING.has(deps.storage, replay_key) {
        return Err(ContractError::AlreadyProcessed {
            source_domain_id,
            source_request_id,
        });
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    let digest = compute_incoming_digest(
        source_request_id,
        recipient_addr.as_str(),
        amount.u128(),
        source_domain_id,
        config.local_domain_id,
    );

    let (attesters, required) = {
        let verifier = Secp256k1Verifier::new(deps.api);
        let validators = StoredValidatorSet::new(deps.storage);
        let attesters = collect_attestations(&verifier, &validators, &digest, &signatures)?;
        (attesters, validators.required_validations()?)
    };

    let got = attesters.len() as u32;
    if got < required {
        return Err(ContractError::InsufficientSignatures { got, required });
    }

    let available = LIQUIDITY.load(deps.storage)?;
    if available < amount {
        return Err(ContractError::InsufficientLiquidity {
            available,
            requested: amount,
        });
    }
    LIQUIDITY.save(deps.storage, &(available - amount))?;

    PROCESSED_INCOMING.save(deps.storage, replay_key, &true)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_bridged_in = stats.total_bridged_in.checked_add(amount)?;
    stats.total_incoming += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_message(ledger::credit(&recipient_addr, &config.denom, amount))
        .add_attribute("method", "process_incoming")
        .add_attribute("source_domain_id", source_domain_id.to_string())
        .add_attribute("source_request_id", source_request_id.to_string())
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", amount.to_string())
        .add_attribute("digest", bytes32_to_hex(&digest))
        .add_attribute("signatures", got.to_string())
        .add_attribute("relayer", info.sender))
}
