//! Inbound transfer attestations
//!
//! Validators attest an inbound transfer by signing its digest with their
//! secp256k1 key. Signatures are 65 bytes `r || s || v` with `v` in
//! `{0, 1, 27, 28}`; the signer is the EVM-style address of the recovered
//! public key.

use cosmwasm_std::{Addr, Api, Binary};

use crate::error::ContractError;
use crate::hash::signer_from_pubkey;
use crate::registry::ValidatorSet;

/// Length of a recoverable secp256k1 signature
pub const SIGNATURE_LENGTH: usize = 65;

/// Recovers the signer of a digest
pub trait SignatureVerifier {
    /// `Err` for a structurally malformed signature, `Ok(None)` when no
    /// signer can be recovered from a well-formed one.
    fn recover_signer(
        &self,
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<Option<[u8; 20]>, ContractError>;
}

/// Recovery through the chain's secp256k1 host functions
pub struct Secp256k1Verifier<'a> {
    api: &'a dyn Api,
}

impl<'a> Secp256k1Verifier<'a> {
    pub fn new(api: &'a dyn Api) -> Self {
        Self { api }
    }
}

impl<'a> SignatureVerifier for Secp256k1Verifier<'a> {
    fn recover_signer(
        &self,
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<Option<[u8; 20]>, ContractError> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(ContractError::InvalidSignature);
        }
        let recovery_param = match signature[64] {
            0 | 27 => 0u8,
            1 | 28 => 1u8,
            _ => return Err(ContractError::InvalidSignature),
        };

        match self
            .api
            .secp256k1_recover_pubkey(digest, &signature[..64], recovery_param)
        {
            Ok(pubkey) => Ok(Some(signer_from_pubkey(&pubkey)?)),
            Err(_) => Ok(None),
        }
    }
}

/// Distinct active validators that signed `digest`, in first-seen order
///
/// Signatures that recover to an unknown or inactive signer are skipped, and
/// a validator counts once no matter how many of its signatures are present.
pub fn collect_attestations(
    verifier: &dyn SignatureVerifier,
    validators: &dyn ValidatorSet,
    digest: &[u8; 32],
    signatures: &[Binary],
) -> Result<Vec<Addr>, ContractError> {
    let mut attesters: Vec<Addr> = Vec::new();

    for signature in signatures {
        let Some(signer) = verifier.recover_signer(digest, signature.as_slice())? else {
            continue;
        };
        let Some(identity) = validators.identity_for_signer(&signer)? else {
            continue;
        };
        if !validators.is_active(&identity)? || attesters.contains(&identity) {
            continue;
        }
        attesters.push(identity);
    }

    Ok(attesters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use cosmwasm_std::StdResult;
    use std::collections::HashMap;

    /// Treats byte 0 of the signature as the signer; 0xff never recovers
    struct StubVerifier;

    impl SignatureVerifier for StubVerifier {
        fn recover_signer(
            &self,
            _digest: &[u8; 32],
            signature: &[u8],
        ) -> Result<Option<[u8; 20]>, ContractError> {
            match signature.first() {
                None => Err(ContractError::InvalidSignature),
                Some(0xff) => Ok(None),
                Some(b) => Ok(Some([*b; 20])),
            }
        }
    }

    struct StubValidators {
        signers: HashMap<[u8; 20], (Addr, bool)>,
        required: u32,
    }

    impl StubValidators {
        fn new(entries: &[(u8, &str, bool)]) -> Self {
            let signers = entries
                .iter()
                .map(|(b, name, active)| ([*b; 20], (Addr::unchecked(*name), *active)))
                .collect();
            Self { signers, required: 2 }
        }
    }

    impl ValidatorSet for StubValidators {
        fn is_active(&self, identity: &Addr) -> StdResult<bool> {
            Ok(self
                .signers
                .values()
                .any(|(addr, active)| addr == identity && *active))
        }

        fn identity_for_signer(&self, signer: &[u8; 20]) -> StdResult<Option<Addr>> {
            Ok(self.signers.get(signer).map(|(addr, _)| addr.clone()))
        }

        fn required_validations(&self) -> StdResult<u32> {
            Ok(self.required)
        }
    }

    fn sigs(bytes: &[u8]) -> Vec<Binary> {
        bytes.iter().map(|b| Binary::from(vec![*b])).collect()
    }

    #[test]
    fn test_counts_distinct_active_validators() {
        let validators = StubValidators::new(&[(1, "alice", true), (2, "bob", true), (3, "carol", false)]);
        let attesters =
            collect_attestations(&StubVerifier, &validators, &[0u8; 32], &sigs(&[1, 3, 9, 2, 0xff]))
                .unwrap();
        assert_eq!(attesters, vec![Addr::unchecked("alice"), Addr::unchecked("bob")]);
    }

    #[test]
    fn test_duplicates_count_once() {
        let validators = StubValidators::new(&[(1, "alice", true), (2, "bob", true)]);
        let attesters =
            collect_attestations(&StubVerifier, &validators, &[0u8; 32], &sigs(&[1, 1, 1, 1]))
                .unwrap();
        assert_eq!(attesters.len(), 1);
        assert!(attesters.len() < validators.required as usize);
    }

    #[test]
    fn test_malformed_entry_rejects_all() {
        let validators = StubValidators::new(&[(1, "alice", true)]);
        let mut signatures = sigs(&[1]);
        signatures.push(Binary::default());
        let err = collect_attestations(&StubVerifier, &validators, &[0u8; 32], &signatures)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature);
    }

    #[test]
    fn test_secp256k1_verifier_rejects_bad_shapes() {
        let api = MockApi::default();
        let verifier = Secp256k1Verifier::new(&api);
        let digest = [7u8; 32];

        assert_eq!(
            verifier.recover_signer(&digest, &[0u8; 64]).unwrap_err(),
            ContractError::InvalidSignature
        );

        let mut bad_v = [1u8; 65];
        bad_v[64] = 2;
        assert_eq!(
            verifier.recover_signer(&digest, &bad_v).unwrap_err(),
            ContractError::InvalidSignature
        );
    }

    #[test]
    fn test_secp256k1_verifier_unrecoverable_is_discarded() {
        let api = MockApi::default();
        let verifier = Secp256k1Verifier::new(&api);

        // r = s = 0 is not a valid signature
        let mut signature = [0u8; 65];
        signature[64] = 27;
        assert_eq!(verifier.recover_signer(&[7u8; 32], &signature).unwrap(), None);
    }
}
