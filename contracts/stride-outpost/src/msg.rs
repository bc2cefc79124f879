use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Uint128};
use ethabi::Address;
use outpost::{
    liquid_stake_memo, parse_address, redeem_memo, validate_channel_id, validate_port_id,
    DenomTrace, LIQUID_STAKE_EVENT, LIQUID_STAKE_METHOD, REDEEM_EVENT, REDEEM_METHOD,
};

use crate::error::{ContractError, ContractResult};

/// Per-deployment configuration, fixed when the precompile is constructed.
#[cw_serde]
pub struct OutpostConfig {
    /// Hex address the precompile is registered at
    pub address: String,

    /// Port of the ICS-20 transfer module, normally `transfer`
    pub port_id: String,

    /// Channel connecting this chain to Stride
    pub channel_id: String,

    /// The native denom that can be liquid staked, e.g. `aevmos`
    pub denom: String,

    /// Bech32 prefix of account addresses on this chain, e.g. `evmos`
    pub bech32_prefix: String,
}

impl OutpostConfig {
    /// Validate the config, returning the parsed precompile address.
    pub fn validate(&self) -> ContractResult<Address> {
        let invalid = |reason: String| ContractError::InvalidConfig {
            reason,
        };

        validate_port_id(&self.port_id).map_err(|err| invalid(err.to_string()))?;
        validate_channel_id(&self.channel_id).map_err(|err| invalid(err.to_string()))?;

        if self.denom.trim().is_empty() {
            return Err(invalid("denom cannot be empty".into()));
        }

        if self.bech32_prefix.trim().is_empty() {
            return Err(invalid("bech32 prefix cannot be empty".into()));
        }

        parse_address(&self.address).map_err(|err| invalid(err.to_string()))
    }
}

/// The EVM call frame the precompile is invoked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// The account that signed the transaction
    pub origin: Address,

    /// The account or contract that called the precompile directly
    pub caller: Address,
}

/// Decoded arguments of `liquidStake` and `redeem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub sender: Address,
    pub token: Address,
    pub amount: Uint128,
    pub receiver: String,
}

/// The operation the Autopilot middleware on Stride is instructed to perform
/// with the transferred tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Native tokens are sent to Stride and liquid staked
    LiquidStake,

    /// stTokens are sent back to Stride and redeemed for native tokens
    Redeem,
}

impl Action {
    /// Name of the ABI method
    pub fn method(&self) -> &'static str {
        match self {
            Action::LiquidStake => LIQUID_STAKE_METHOD,
            Action::Redeem => REDEEM_METHOD,
        }
    }

    /// Name of the action-specific ABI event
    pub fn event(&self) -> &'static str {
        match self {
            Action::LiquidStake => LIQUID_STAKE_EVENT,
            Action::Redeem => REDEEM_EVENT,
        }
    }

    /// The denom whose token pair the request's token must match.
    ///
    /// For redemptions this is the voucher of the stToken that came back from
    /// Stride over the configured channel, e.g. `st` + `aevmos`.
    pub fn denom(&self, cfg: &OutpostConfig) -> String {
        match self {
            Action::LiquidStake => cfg.denom.clone(),
            Action::Redeem => {
                DenomTrace::new(&cfg.port_id, &cfg.channel_id, format!("st{}", cfg.denom)).ibc_denom()
            },
        }
    }

    /// `sender` is the bech32 address of the sender on this chain, which is
    /// where redeemed tokens are returned to.
    pub fn memo(&self, receiver: &str, sender: &str) -> StdResult<String> {
        match self {
            Action::LiquidStake => liquid_stake_memo(receiver),
            Action::Redeem => redeem_memo(receiver, sender),
        }
    }
}

// ----------------------------------- Tests -----------------------------------
