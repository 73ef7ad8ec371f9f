//! Caller capability checks

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::registry::{StoredValidatorSet, ValidatorSet};
use crate::state::{CONFIG, RELAYERS};

/// Roles a caller can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Contract admin
    Admin,
    /// Active validator
    Validator,
    /// Registered relayer
    Relayer,
}

/// Fail unless `caller` holds `capability`
pub fn ensure_capability(
    storage: &dyn Storage,
    caller: &Addr,
    capability: Capability,
) -> Result<(), ContractError> {
    match capability {
        Capability::Admin => {
            let config = CONFIG.load(storage)?;
            if *caller != config.admin {
                return Err(ContractError::Unauthorized);
            }
        }
        Capability::Validator => {
            if !StoredValidatorSet::new(storage).is_active(caller)? {
                return Err(ContractError::NotAnActiveValidator {
                    address: caller.to_string(),
                });
            }
        }
        Capability::Relayer => {
            let is_relayer = RELAYERS.may_load(storage, caller)?.unwrap_or(false);
            if !is_relayer {
                return Err(ContractError::NotARelayer {
                    address: caller.to_string(),
                });
            }
        }
    }
    Ok(())
}
