//! Hash computation for inbound transfer attestations
//!
//! Validators sign the digest produced by [`compute_incoming_digest`]. The
//! encoding is EVM `abi.encode` compatible so the same digest can be
//! reproduced by off-chain tooling on any domain.
//!
//! # Byte Layout (160 bytes total)
//! - Bytes 0-31:    sourceRequestId (uint256, big-endian, left-padded)
//! - Bytes 32-63:   keccak256(recipient string)
//! - Bytes 64-95:   amount (uint256, big-endian, left-padded)
//! - Bytes 96-127:  sourceDomainId (uint256, big-endian, left-padded)
//! - Bytes 128-159: localDomainId (uint256, big-endian, left-padded)

use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the digest validators sign for an inbound transfer
///
/// Binding `local_domain_id` into the digest means an attestation for one
/// destination instance cannot be replayed against another.
pub fn compute_incoming_digest(
    source_request_id: u64,
    recipient: &str,
    amount: u128,
    source_domain_id: u64,
    local_domain_id: u64,
) -> [u8; 32] {
    // Pre-allocate exact size: 5 * 32 = 160 bytes
    let mut data = [0u8; 160];

    // u64 (8 bytes) goes into bytes 24-31 of its slot
    data[24..32].copy_from_slice(&source_request_id.to_be_bytes());

    data[32..64].copy_from_slice(&keccak256(recipient.as_bytes()));

    // u128 (16 bytes) goes into bytes 16-31 of its slot
    data[64 + 16..96].copy_from_slice(&amount.to_be_bytes());

    data[96 + 24..128].copy_from_slice(&source_domain_id.to_be_bytes());
    data[128 + 24..160].copy_from_slice(&local_domain_id.to_be_bytes());

    keccak256(&data)
}

/// Derive the 20-byte signer address of an uncompressed secp256k1 public key
///
/// Matches EVM address derivation: the last 20 bytes of
/// `keccak256(x || y)`.
pub fn signer_from_pubkey(pubkey: &[u8]) -> Result<[u8; 20], ContractError> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return Err(ContractError::InvalidSignature);
    }
    let hash = keccak256(&pubkey[1..]);
    let mut signer = [0u8; 20];
    signer.copy_from_slice(&hash[12..]);
    Ok(signer)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Render a signer address as 0x-prefixed lowercase hex
pub fn signer_to_hex(signer: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(signer))
}

/// Parse a signer address (with or without 0x prefix)
pub fn parse_signer(input: &str) -> Result<[u8; 20], ContractError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ContractError::InvalidSigner {
        reason: e.to_string(),
    })?;
    let signer: [u8; 20] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidSigner {
            reason: format!("expected 20 bytes, got {}", bytes.len()),
        })?;
    if signer == [0u8; 20] {
        return Err(ContractError::InvalidSigner {
            reason: "zero address".to_string(),
        });
    }
    Ok(signer)
}
