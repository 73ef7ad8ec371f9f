//! Validator registry
//!
//! Tracks the validator set and the quorum threshold. Validators are never
//! deleted: removal deactivates the record, and adding the same identity
//! again re-activates it.
//!
//! The consensus engine and the inbound processor read the registry through
//! the [`ValidatorSet`] trait so they can be exercised against in-memory
//! doubles.

use cosmwasm_std::{Addr, StdResult, Storage, Timestamp};

use crate::error::ContractError;
use crate::hash::signer_to_hex;
use crate::state::{
    Validator, ACTIVE_VALIDATOR_COUNT, REQUIRED_VALIDATIONS, VALIDATORS, VALIDATOR_ORDER,
    VALIDATOR_SIGNERS,
};

/// Read access to the active validator set
pub trait ValidatorSet {
    /// Whether `identity` is a registered, active validator
    fn is_active(&self, identity: &Addr) -> StdResult<bool>;

    /// Validator identity bound to an attestation signer, if any
    fn identity_for_signer(&self, signer: &[u8; 20]) -> StdResult<Option<Addr>>;

    /// Current quorum threshold
    fn required_validations(&self) -> StdResult<u32>;
}

/// [`ValidatorSet`] backed by contract storage
pub struct StoredValidatorSet<'a> {
    storage: &'a dyn Storage,
}

impl<'a> StoredValidatorSet<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }
}

impl<'a> ValidatorSet for StoredValidatorSet<'a> {
    fn is_active(&self, identity: &Addr) -> StdResult<bool> {
        is_validator(self.storage, identity)
    }

    fn identity_for_signer(&self, signer: &[u8; 20]) -> StdResult<Option<Addr>> {
        VALIDATOR_SIGNERS.may_load(self.storage, signer.as_slice())
    }

    fn required_validations(&self) -> StdResult<u32> {
        REQUIRED_VALIDATIONS.load(self.storage)
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// Register or re-activate a validator and bind its attestation signer.
///
/// Returns true when the call changed the active count.
pub fn add_validator(
    storage: &mut dyn Storage,
    identity: &Addr,
    signer: [u8; 20],
    now: Timestamp,
) -> Result<bool, ContractError> {
    // A signer may only belong to one active validator
    if let Some(holder) = VALIDATOR_SIGNERS.may_load(storage, signer.as_slice())? {
        if &holder != identity && is_validator(storage, &holder)? {
            return Err(ContractError::InvalidSigner {
                reason: format!(
                    "{} is already bound to validator {}",
                    signer_to_hex(&signer),
                    holder
                ),
            });
        }
    }

    let existing = VALIDATORS.may_load(storage, identity)?;
    let activated = match existing {
        Some(mut validator) => {
            if validator.signer != signer {
                release_signer(storage, &validator)?;
                validator.signer = signer;
            }
            let activated = !validator.active;
            validator.active = true;
            VALIDATORS.save(storage, identity, &validator)?;
            activated
        }
        None => {
            let validator = Validator {
                identity: identity.clone(),
                signer,
                active: true,
                added_at: now,
            };
            VALIDATORS.save(storage, identity, &validator)?;

            let mut order = VALIDATOR_ORDER.may_load(storage)?.unwrap_or_default();
            order.push(identity.clone());
            VALIDATOR_ORDER.save(storage, &order)?;
            true
        }
    };

    VALIDATOR_SIGNERS.save(storage, signer.as_slice(), identity)?;

    if activated {
        ACTIVE_VALIDATOR_COUNT.update(storage, |count| -> StdResult<_> { Ok(count + 1) })?;
    }

    Ok(activated)
}

/// Deactivate a validator without dropping below the quorum threshold
pub fn remove_validator(storage: &mut dyn Storage, identity: &Addr) -> Result<(), ContractError> {
    let mut validator = match VALIDATORS.may_load(storage, identity)? {
        Some(validator) if validator.active => validator,
        _ => {
            return Err(ContractError::ValidatorNotRegistered {
                address: identity.to_string(),
            })
        }
    };

    let active = ACTIVE_VALIDATOR_COUNT.load(storage)?;
    let required = REQUIRED_VALIDATIONS.load(storage)?;
    if active.saturating_sub(1) < required {
        return Err(ContractError::CannotRemoveBelowThreshold { active, required });
    }

    validator.active = false;
    VALIDATORS.save(storage, identity, &validator)?;
    ACTIVE_VALIDATOR_COUNT.save(storage, &(active - 1))?;

    Ok(())
}

/// Set the quorum threshold; must be within `1..=active`
pub fn set_required_validations(storage: &mut dyn Storage, required: u32) -> Result<(), ContractError> {
    let active = ACTIVE_VALIDATOR_COUNT.load(storage)?;
    if required == 0 || required > active {
        return Err(ContractError::InvalidThreshold { required, active });
    }
    REQUIRED_VALIDATIONS.save(storage, &required)?;
    Ok(())
}

fn release_signer(storage: &mut dyn Storage, validator: &Validator) -> StdResult<()> {
    let key = validator.signer.as_slice();
    if VALIDATOR_SIGNERS.may_load(storage, key)?.as_ref() == Some(&validator.identity) {
        VALIDATOR_SIGNERS.remove(storage, key);
    }
    Ok(())
}

// ============================================================================
// Reads
// ============================================================================

pub fn is_validator(storage: &dyn Storage, identity: &Addr) -> StdResult<bool> {
    Ok(VALIDATORS
        .may_load(storage, identity)?
        .map(|v| v.active)
        .unwrap_or(false))
}

/// Active validators in insertion order
pub fn list_validators(storage: &dyn Storage) -> StdResult<Vec<Validator>> {
    let order = VALIDATOR_ORDER.may_load(storage)?.unwrap_or_default();
    let mut validators = Vec::with_capacity(order.len());
    for identity in order {
        let validator = VALIDATORS.load(storage, &identity)?;
        if validator.active {
            validators.push(validator);
        }
    }
    Ok(validators)
}

pub fn active_count(storage: &dyn Storage) -> StdResult<u32> {
    Ok(ACTIVE_VALIDATOR_COUNT.may_load(storage)?.unwrap_or_default())
}
