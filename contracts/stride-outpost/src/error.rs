use cosmwasm_std::StdError;
use outpost::{AuthzError, TransferError};

pub type ContractResult<T> = Result<T, ContractError>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("invalid precompile config: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("precompile ABI error: {reason}")]
    Abi {
        reason: String,
    },

    #[error("failed to decode arguments of `{method}`: {reason}")]
    Decode {
        method: String,
        reason: String,
    },

    #[error("no method found for selector `0x{selector}`")]
    UnknownMethod {
        selector: String,
    },

    #[error("method `{method}` is disabled")]
    MethodDisabled {
        method: String,
    },

    #[error("origin address `{origin}` is not the same as sender address `{sender}`")]
    ForbiddenSender {
        origin: String,
        sender: String,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthzError),

    #[error("token pair not found for denom `{denom}`")]
    TokenPairNotFound {
        denom: String,
    },

    #[error("unsupported token `{token}`: the only supported token contract is `{expected}`")]
    UnsupportedToken {
        token: String,
        expected: String,
    },

    #[error("invalid transfer: {0}")]
    InvalidTransfer(#[from] TransferError),

    #[error("transfer execution failed: {0}")]
    TransferExecution(StdError),

    #[error("failed to update grant: {0}")]
    GrantUpdate(StdError),

    #[error("failed to emit `{event}` event: {reason}")]
    EventEmission {
        event: String,
        reason: String,
    },
}
