use cosmwasm_std::Uint128;
use ethabi::{Function, Token};

use crate::{
    error::{ContractError, ContractResult},
    msg::TransferRequest,
};

/// Decode `(address sender, address token, uint256 amount, string receiver)`.
///
/// `data` is the call data without the 4-byte selector.
pub fn parse_transfer_request(function: &Function, data: &[u8]) -> ContractResult<TransferRequest> {
    let decode_err = |reason: String| ContractError::Decode {
        method: function.name.clone(),
        reason,
    };

    let tokens = function.decode_input(data).map_err(|err| decode_err(err.to_string()))?;

    let [sender, token, amount, receiver]: [Token; 4] = tokens.try_into().map_err(|tokens: Vec<Token>| {
        decode_err(format!("invalid number of arguments; expected 4; got {}", tokens.len()))
    })?;

    let sender = sender
        .into_address()
        .ok_or_else(|| decode_err("invalid sender address".into()))?;

    let token = token
        .into_address()
        .ok_or_else(|| decode_err("invalid token address".into()))?;

    let amount = amount
        .into_uint()
        .ok_or_else(|| decode_err("invalid amount".into()))?;

    // coin amounts are 128-bit
    if amount.bits() > 128 {
        return Err(decode_err(format!("amount {amount} does not fit in 128 bits")));
    }

    let receiver = receiver
        .into_string()
        .ok_or_else(|| decode_err("invalid receiver".into()))?;

    Ok(TransferRequest {
        sender,
        token,
        amount: Uint128::new(amount.low_u128()),
        receiver,
    })
}

// ----------------------------------- Tests -----------------------------------
