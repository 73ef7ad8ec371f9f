//! Message types for the Quorum Relay contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::state::RequestStatus;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Validator registration
#[cw_serde]
pub struct ValidatorInit {
    /// Account the validator votes from
    pub identity: String,
    /// 20-byte attestation signer address, hex encoded
    pub signer: String,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Fee collector address
    pub fee_collector: String,
    /// Native denom moved by the relay
    pub denom: String,
    /// Domain id of this ledger
    pub local_domain_id: u64,
    /// Initial validator set
    pub validators: Vec<ValidatorInit>,
    /// Quorum threshold, between 1 and the number of validators
    pub required_validations: u32,
    /// Initial relayer addresses
    pub relayers: Vec<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing Transfers
    // ========================================================================
    /// Lock funds for transfer to another domain
    ///
    /// Authorization: Anyone. Attach exactly `amount` of the relay denom.
    Bridge {
        /// Account on the destination domain
        recipient: String,
        amount: Uint128,
        /// Destination domain id
        domain_id: u64,
    },

    /// Return the net amount of an expired request to its sender
    ///
    /// Authorization: Anyone. Allowed while paused.
    Refund { request_id: u64 },

    // ========================================================================
    // Validator Votes
    // ========================================================================
    /// Vote that an outbound request was observed
    ///
    /// Authorization: Active validator
    ValidateBridge { request_id: u64 },

    /// Vote on up to 50 requests; each id is accepted or rejected on its own
    ///
    /// Authorization: Active validator
    BatchValidate { request_ids: Vec<u64> },

    // ========================================================================
    // Incoming Transfers
    // ========================================================================
    /// Pay out a transfer that originated on another domain
    ///
    /// Authorization: Relayer. `signatures` are 65-byte secp256k1 recoverable
    /// signatures over the `MessageDigest` of the transfer.
    ProcessIncoming {
        source_request_id: u64,
        recipient: String,
        amount: Uint128,
        source_domain_id: u64,
        signatures: Vec<Binary>,
    },

    /// Fund the pool that pays incoming transfers
    ///
    /// Authorization: Anyone. Attach exactly `amount` of the relay denom.
    AddLiquidity { amount: Uint128 },

    // ========================================================================
    // Validator Management (Admin)
    // ========================================================================
    /// Add or re-activate a validator
    AddValidator {
        identity: String,
        /// Hex encoded 20-byte signer address
        signer: String,
    },

    /// Deactivate a validator
    RemoveValidator { identity: String },

    /// Set the quorum threshold
    SetRequiredValidations { required: u32 },

    // ========================================================================
    // Chain Management (Admin)
    // ========================================================================
    /// Replace the limits of a destination domain
    SetChainConfig {
        domain_id: u64,
        supported: bool,
        min_amount: Uint128,
        max_amount: Uint128,
        daily_limit: Uint128,
        /// Fee rate in basis points (max 10000)
        fee_bps: u64,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Register a relayer
    AddRelayer { relayer: String },

    /// Unregister a relayer
    RemoveRelayer { relayer: String },

    /// Change the fee collector
    SetFeeCollector { fee_collector: String },

    /// Pause bridging and incoming transfers
    Pause {},

    /// Resume bridging and incoming transfers
    Unpause {},

    /// Propose a new admin (7-day timelock)
    ProposeAdmin { new_admin: String },

    /// Accept the admin role (pending admin only)
    AcceptAdmin {},

    /// Cancel the pending admin proposal
    CancelAdminProposal {},
}

// ============================================================================
// Execute Response Data
// ============================================================================

/// Data returned by `Bridge`
#[cw_serde]
pub struct BridgeResponse {
    pub request_id: u64,
}

#[cw_serde]
pub struct BatchRejection {
    pub request_id: u64,
    pub reason: String,
}

/// Data returned by `BatchValidate`
#[cw_serde]
pub struct BatchValidateResponse {
    /// Ids the vote was recorded on
    pub accepted: Vec<u64>,
    /// Accepted ids that reached quorum with this vote
    pub validated: Vec<u64>,
    pub rejected: Vec<BatchRejection>,
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core Queries
    // ========================================================================
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns relay statistics
    #[returns(StatisticsResponse)]
    Statistics {},

    /// Returns pending admin proposal details
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Returns the liquidity pool and the amount locked for refunds
    #[returns(LiquidityResponse)]
    Liquidity {},

    // ========================================================================
    // Chain Queries
    // ========================================================================
    /// Returns the ids of domains currently accepting transfers
    #[returns(SupportedChainsResponse)]
    SupportedChains {},

    /// Returns the configuration of a domain
    #[returns(ChainConfigResponse)]
    ChainConfig { domain_id: u64 },

    /// Returns the volume used in the current window of a domain
    #[returns(PeriodUsageResponse)]
    PeriodUsage { domain_id: u64 },

    /// Fee that `Bridge` would charge for `amount` to `domain_id`
    #[returns(EstimateFeeResponse)]
    EstimateFee { amount: Uint128, domain_id: u64 },

    // ========================================================================
    // Validator & Relayer Queries
    // ========================================================================
    /// Active validators in registration order
    #[returns(ValidatorsResponse)]
    Validators {},

    #[returns(IsValidatorResponse)]
    IsValidator { identity: String },

    #[returns(RelayersResponse)]
    Relayers {},

    // ========================================================================
    // Request Queries
    // ========================================================================
    #[returns(RequestResponse)]
    Request { request_id: u64 },

    /// List requests in id order
    #[returns(RequestsResponse)]
    Requests {
        start_after: Option<u64>,
        /// Max entries to return (default 10, max 50)
        limit: Option<u32>,
    },

    // ========================================================================
    // Incoming Queries
    // ========================================================================
    /// Whether an inbound transfer was already paid out
    #[returns(IsProcessedResponse)]
    IsProcessed {
        source_domain_id: u64,
        source_request_id: u64,
    },

    /// Digest validators sign for an inbound transfer
    #[returns(MessageDigestResponse)]
    MessageDigest {
        source_request_id: u64,
        recipient: String,
        amount: Uint128,
        source_domain_id: u64,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub fee_collector: Addr,
    pub denom: String,
    pub local_domain_id: u64,
    pub required_validations: u32,
    pub active_validators: u32,
}

#[cw_serde]
pub struct StatisticsResponse {
    pub total_bridged_out: Uint128,
    pub total_fees_collected: Uint128,
    pub total_requests: u64,
    pub total_bridged_in: Uint128,
    pub total_incoming: u64,
    pub total_refunded: Uint128,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct LiquidityResponse {
    pub denom: String,
    /// Available to pay incoming transfers
    pub available: Uint128,
    /// Held for outbound requests until refunded
    pub locked: Uint128,
}

#[cw_serde]
pub struct SupportedChainsResponse {
    pub domain_ids: Vec<u64>,
}

#[cw_serde]
pub struct ChainConfigResponse {
    pub domain_id: u64,
    pub supported: bool,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
    pub daily_limit: Uint128,
    pub fee_bps: u64,
}

#[cw_serde]
pub struct PeriodUsageResponse {
    pub domain_id: u64,
    pub window_start: Timestamp,
    /// When the current window ends
    pub resets_at: Timestamp,
    pub used: Uint128,
    pub daily_limit: Uint128,
    pub remaining: Uint128,
}

#[cw_serde]
pub struct EstimateFeeResponse {
    pub gross_amount: Uint128,
    pub fee: Uint128,
    pub net_amount: Uint128,
    pub fee_bps: u64,
}

#[cw_serde]
pub struct ValidatorInfo {
    pub identity: Addr,
    /// 0x-prefixed hex signer address
    pub signer: String,
    pub added_at: Timestamp,
}

#[cw_serde]
pub struct ValidatorsResponse {
    pub validators: Vec<ValidatorInfo>,
    pub required_validations: u32,
}

#[cw_serde]
pub struct IsValidatorResponse {
    pub identity: String,
    pub is_validator: bool,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
}

#[cw_serde]
pub struct RequestResponse {
    pub id: u64,
    pub sender: Addr,
    pub recipient: String,
    pub gross_amount: Uint128,
    pub fee: Uint128,
    pub net_amount: Uint128,
    pub domain_id: u64,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    /// Earliest time a refund is possible
    pub expires_at: Timestamp,
    pub voted_validators: Vec<Addr>,
}

#[cw_serde]
pub struct RequestsResponse {
    pub requests: Vec<RequestResponse>,
}

#[cw_serde]
pub struct IsProcessedResponse {
    pub source_domain_id: u64,
    pub source_request_id: u64,
    pub processed: bool,
}

#[cw_serde]
pub struct MessageDigestResponse {
    pub digest: Binary,
    /// 0x-prefixed hex of `digest`
    pub digest_hex: String,
}
