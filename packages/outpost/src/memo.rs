use {
    cosmwasm_schema::cw_serde,
    cosmwasm_std::{StdError, StdResult},
};

/// Stakeibc action that liquid stakes the transferred tokens on Stride
pub const LIQUID_STAKE_ACTION: &str = "LiquidStake";

/// Stakeibc action that redeems the transferred stTokens for native tokens
pub const REDEEM_STAKE_ACTION: &str = "RedeemStake";

/// Memo understood by Stride's Autopilot middleware.
///
/// The layout is owned by Autopilot; the field names and their order here are
/// what it parses, so they must not change:
///
/// ```json
/// {
///   "autopilot": {
///     "receiver": "stride1...",
///     "stakeibc": {
///       "stride_address": "stride1...",
///       "action": "LiquidStake"
///     }
///   }
/// }
/// ```
#[cw_serde]
pub struct AutopilotMemo {
    pub autopilot: AutopilotMetadata,
}

#[cw_serde]
pub struct AutopilotMetadata {
    pub receiver: String,
    pub stakeibc: StakeibcMetadata,
}

#[cw_serde]
pub struct StakeibcMetadata {
    pub stride_address: String,
    pub action: String,
    /// Where the redeemed native tokens are to be sent back to. Only used by
    /// the `RedeemStake` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibc_receiver: Option<String>,
}

impl AutopilotMemo {
    pub fn new(action: impl Into<String>, receiver: impl Into<String>) -> Self {
        let receiver = receiver.into();
        Self {
            autopilot: AutopilotMetadata {
                receiver: receiver.clone(),
                stakeibc: StakeibcMetadata {
                    stride_address: receiver,
                    action: action.into(),
                    ibc_receiver: None,
                },
            },
        }
    }

    pub fn with_ibc_receiver(mut self, ibc_receiver: impl Into<String>) -> Self {
        self.autopilot.stakeibc.ibc_receiver = Some(ibc_receiver.into());
        self
    }

    pub fn to_json_string(&self) -> StdResult<String> {
        serde_json::to_string(self).map_err(|err| StdError::serialize_err("AutopilotMemo", err))
    }
}

/// Memo instructing Autopilot to liquid stake the tokens for `receiver`.
pub fn liquid_stake_memo(receiver: &str) -> StdResult<String> {
    AutopilotMemo::new(LIQUID_STAKE_ACTION, receiver).to_json_string()
}

/// Memo instructing Autopilot to redeem the stTokens of `receiver`, sending the
/// native tokens back to `ibc_receiver` on this chain.
pub fn redeem_memo(receiver: &str, ibc_receiver: &str) -> StdResult<String> {
    AutopilotMemo::new(REDEEM_STAKE_ACTION, receiver)
        .with_ibc_receiver(ibc_receiver)
        .to_json_string()
}

// ----------------------------------- Tests -----------------------------------
