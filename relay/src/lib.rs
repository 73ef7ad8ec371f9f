//! Quorum Relay Contract - Validator-Attested Cross-Domain Transfers
//!
//! One instance runs on each domain and moves a single native denom between
//! domains under the authority of a validator quorum.
//!
//! # Outgoing Flow (Bridge)
//! 1. Sender attaches funds to `Bridge`; the fee goes to the fee collector
//!    and the net amount is locked under a new request id
//! 2. Validators observe the request and vote with `ValidateBridge`
//! 3. The request becomes `Validated` once the quorum threshold is reached
//! 4. If nothing completes it, the sender can `Refund` the net amount after
//!    seven days
//!
//! # Incoming Flow (ProcessIncoming)
//! 1. Validators sign the digest of a transfer that happened elsewhere
//! 2. A relayer submits the transfer with the signatures
//! 3. Once enough distinct active validators signed, the recipient is paid
//!    from the liquidity pool and the source event is marked processed
//!
//! # Security
//! - Per-domain size limits and rolling 24h volume caps
//! - Replay guard keyed by source domain and source request id
//! - Emergency pause that never blocks refunds
//! - Timelocked admin handover

pub mod attestation;
pub mod auth;
pub mod contract;
pub mod error;
mod execute;
pub mod fee_manager;
pub mod hash;
pub mod ledger;
pub mod limiter;
pub mod msg;
mod query;
pub mod registry;
pub mod state;

pub use crate::error::ContractError;
pub use crate::fee_manager::compute_fee;
pub use crate::hash::{compute_incoming_digest, keccak256};
