//! Error types for the Quorum Relay contract
//!
//! Variants are grouped the way callers react to them: validation failures
//! are fixed by resubmitting different parameters, authorization failures by
//! using a different caller or more signatures, state failures by waiting or
//! giving up, and invariant failures by changing the admin call.

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Amount {amount} is below the minimum of {min_amount} for domain {domain_id}")]
    BelowMinimum {
        domain_id: u64,
        amount: Uint128,
        min_amount: Uint128,
    },

    #[error("Amount {amount} is above the maximum of {max_amount} for domain {domain_id}")]
    AboveMaximum {
        domain_id: u64,
        amount: Uint128,
        max_amount: Uint128,
    },

    #[error("Chain not supported: {domain_id}")]
    ChainNotSupported { domain_id: u64 },

    #[error("Daily limit exceeded for domain {domain_id}: limit {daily_limit}, used {used}, requested {requested}")]
    DailyLimitExceeded {
        domain_id: u64,
        daily_limit: Uint128,
        used: Uint128,
        requested: Uint128,
    },

    #[error("Invalid chain config: {reason}")]
    InvalidChainConfig { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Funds mismatch: expected {expected}, got {got}")]
    FundsMismatch { expected: String, got: String },

    #[error("Invalid batch: {reason}")]
    InvalidBatch { reason: String },

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("Unauthorized: {address} is not an active validator")]
    NotAnActiveValidator { address: String },

    #[error("Unauthorized: {address} is not a relayer")]
    NotARelayer { address: String },

    #[error("Insufficient signatures: got {got}, need {required}")]
    InsufficientSignatures { got: u32, required: u32 },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Duplicate validator vote for request {request_id}")]
    DuplicateValidatorVote { request_id: u64 },

    #[error("Invalid signer address: {reason}")]
    InvalidSigner { reason: String },

    // ========================================================================
    // State Errors
    // ========================================================================

    #[error("Bridge request not found: {request_id}")]
    RequestNotFound { request_id: u64 },

    #[error("Bridge request {request_id} already validated")]
    AlreadyValidated { request_id: u64 },

    #[error("Incoming transfer already processed: domain {source_domain_id}, request {source_request_id}")]
    AlreadyProcessed {
        source_domain_id: u64,
        source_request_id: u64,
    },

    #[error("Bridge request {request_id} already refunded")]
    AlreadyRefunded { request_id: u64 },

    #[error("Bridge request not expired: {remaining_seconds} seconds remaining")]
    NotExpired { remaining_seconds: u64 },

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Insufficient bridge liquidity: available {available}, requested {requested}")]
    InsufficientLiquidity {
        available: Uint128,
        requested: Uint128,
    },

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Validator not registered: {address}")]
    ValidatorNotRegistered { address: String },

    #[error("Relayer already registered")]
    RelayerAlreadyRegistered,

    #[error("Relayer not registered")]
    RelayerNotRegistered,

    // ========================================================================
    // Invariant Errors
    // ========================================================================

    #[error("Cannot remove validator: {active} active validators, {required} required")]
    CannotRemoveBelowThreshold { active: u32, required: u32 },

    #[error("Invalid threshold {required}: must be between 1 and {active}")]
    InvalidThreshold { required: u32, active: u32 },
}
