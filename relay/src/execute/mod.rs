//! Execute handlers for the Quorum Relay contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - Bridge and Refund handlers for outbound transfers
//! - `consensus` - ValidateBridge and BatchValidate vote handlers
//! - `incoming` - ProcessIncoming handler for attested inbound transfers
//! - `config` - Validator, threshold and chain limit management
//! - `admin` - Pause, admin transfer, relayers, fee collector and liquidity

mod admin;
mod config;
mod consensus;
mod incoming;
mod outgoing;

pub use admin::*;
pub use config::*;
pub use consensus::*;
pub use incoming::*;
pub use outgoing::*;
