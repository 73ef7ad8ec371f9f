//! Bank ledger adapter
//!
//! Balances live in the chain's bank module. A debit is the native funds
//! attached to the message; a credit is a `BankMsg::Send` returned with the
//! response and executed atomically with the contract's state changes.

use cosmwasm_std::{coin, Addr, BankMsg, CosmosMsg, MessageInfo, Uint128};

use crate::error::ContractError;

/// Require exactly `amount` of `denom` attached to the message
pub fn debit(info: &MessageInfo, denom: &str, amount: Uint128) -> Result<(), ContractError> {
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }

    let matches = info.funds.len() == 1
        && info.funds[0].denom == denom
        && info.funds[0].amount == amount;
    if !matches {
        let got = info
            .funds
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        return Err(ContractError::FundsMismatch {
            expected: format!("{}{}", amount, denom),
            got,
        });
    }

    Ok(())
}

/// Pay `amount` of `denom` out of the contract
pub fn credit(recipient: &Addr, denom: &str, amount: Uint128) -> CosmosMsg {
    CosmosMsg::Bank(BankMsg::Send {
        to_address: recipient.to_string(),
        amount: vec![coin(amount.u128(), denom)],
    })
}
