//! State definitions for the Quorum Relay contract
//!
//! This module defines all storage structures and state maps for the relay:
//! configuration, the validator registry, per-domain limits, outbound
//! requests and the inbound replay guard.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Whether bridging and inbound processing are currently paused
    pub paused: bool,
    /// Receives the fee portion of every outbound transfer
    pub fee_collector: Addr,
    /// Native denom moved by this relay
    pub denom: String,
    /// Domain id of the ledger this instance runs on
    pub local_domain_id: u64,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Relay statistics. Every counter only ever grows.
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Gross amount accepted by `bridge`
    pub total_bridged_out: Uint128,
    /// Fees forwarded to the fee collector
    pub total_fees_collected: Uint128,
    /// Number of outbound requests created
    pub total_requests: u64,
    /// Amount credited by inbound transfers
    pub total_bridged_in: Uint128,
    /// Number of inbound transfers processed
    pub total_incoming: u64,
    /// Net amount returned by refunds
    pub total_refunded: Uint128,
}

// ============================================================================
// Validator Registry
// ============================================================================

/// A registered validator. Removal deactivates, it never deletes.
#[cw_serde]
pub struct Validator {
    /// Account that casts votes through `ValidateBridge`
    pub identity: Addr,
    /// 20-byte address of the key the validator attests inbound transfers with
    pub signer: [u8; 20],
    pub active: bool,
    pub added_at: Timestamp,
}

// ============================================================================
// Chain Limits
// ============================================================================

/// Per-destination-domain limits and the rolling volume window
#[cw_serde]
pub struct ChainConfig {
    pub domain_id: u64,
    pub supported: bool,
    /// Smallest gross amount accepted per transfer
    pub min_amount: Uint128,
    /// Largest gross amount accepted per transfer
    pub max_amount: Uint128,
    /// Cap on gross volume within one window
    pub daily_limit: Uint128,
    /// Fee rate in basis points (100 = 1%)
    pub fee_bps: u64,
    pub window_start: Timestamp,
    pub window_volume: Uint128,
}

// ============================================================================
// Outbound Requests
// ============================================================================

#[cw_serde]
pub enum RequestStatus {
    Pending,
    Validated,
    Refunded,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Validated => "validated",
            RequestStatus::Refunded => "refunded",
        }
    }
}

/// Outbound transfer record
#[cw_serde]
pub struct BridgeRequest {
    pub id: u64,
    pub sender: Addr,
    /// Account on the destination domain
    pub recipient: String,
    pub gross_amount: Uint128,
    pub fee: Uint128,
    /// Amount owed on the destination domain, and refunded on expiry
    pub net_amount: Uint128,
    pub domain_id: u64,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    /// Validators that voted, in vote order
    pub voted_validators: Vec<Addr>,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:quorum-relay";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// 7 days in seconds before an outbound request can be refunded
pub const REQUEST_EXPIRY_WINDOW: u64 = 604_800;

/// Length of the chain volume window in seconds (24 hours)
pub const DAILY_WINDOW: u64 = 86_400;

/// Largest number of request ids accepted by one `BatchValidate`
pub const MAX_BATCH_SIZE: usize = 50;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Relay statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Authorized relayers
/// Key: relayer address, Value: whether active
pub const RELAYERS: Map<&Addr, bool> = Map::new("relayers");

/// Pool that inbound transfers are paid from
pub const LIQUIDITY: Item<Uint128> = Item::new("liquidity");

/// Net amount held for outbound requests that may still be refunded
pub const LOCKED: Item<Uint128> = Item::new("locked");

// ============================================================================
// Validator Registry State
// ============================================================================

/// Validators by identity
pub const VALIDATORS: Map<&Addr, Validator> = Map::new("validators");

/// Validator identities in insertion order
pub const VALIDATOR_ORDER: Item<Vec<Addr>> = Item::new("validator_order");

/// Attestation signer to validator identity
/// Key: 20-byte signer address
pub const VALIDATOR_SIGNERS: Map<&[u8], Addr> = Map::new("validator_signers");

/// Number of active validators
pub const ACTIVE_VALIDATOR_COUNT: Item<u32> = Item::new("active_validator_count");

/// Quorum threshold for votes and inbound attestations
pub const REQUIRED_VALIDATIONS: Item<u32> = Item::new("required_validations");

// ============================================================================
// Chain & Request State
// ============================================================================

/// Destination domain configuration
/// Key: domain id
pub const CHAINS: Map<u64, ChainConfig> = Map::new("chains");

/// Outbound requests
/// Key: request id
pub const REQUESTS: Map<u64, BridgeRequest> = Map::new("requests");

/// Next outbound request id
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");

/// Replay guard for inbound transfers
/// Key: (source domain id, source request id), Value: always true
pub const PROCESSED_INCOMING: Map<(u64, u64), bool> = Map::new("processed_incoming");
