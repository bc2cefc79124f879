mod abi;
mod address;
mod authz;
mod coins;
mod keepers;
mod memo;
mod transfer;

pub use crate::{
    abi::{
        load_abi, IBC_TRANSFER_EVENT, LIQUID_STAKE_EVENT, LIQUID_STAKE_METHOD, REDEEM_EVENT,
        REDEEM_METHOD,
    },
    address::{hex_address, parse_address, to_bech32},
    authz::{
        AcceptResponse, Allocation, AuthzError, Grant, TransferAuthorization,
        TRANSFER_MSG_TYPE_URL,
    },
    coins::Coins,
    keepers::{AuthzKeeper, Keepers, Log, StateDb, TokenPair, TokenPairRegistry, TransferKeeper},
    memo::{
        liquid_stake_memo, redeem_memo, AutopilotMemo, AutopilotMetadata, StakeibcMetadata,
        LIQUID_STAKE_ACTION, REDEEM_STAKE_ACTION,
    },
    transfer::{
        validate_channel_id, validate_port_id, DenomTrace, Height, MsgTransfer,
        MsgTransferResponse, TransferError, DEFAULT_TIMEOUT_HEIGHT, MAXIMUM_MEMO_LENGTH,
        MAXIMUM_RECEIVER_LENGTH, TRANSFER_PORT,
    },
};
