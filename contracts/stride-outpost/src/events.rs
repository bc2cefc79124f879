use ethabi::{Address, Contract, Hash, Token, Uint};
use outpost::{Log, MsgTransfer, StateDb, IBC_TRANSFER_EVENT};
use sha3::{Digest, Keccak256};

use crate::{
    error::{ContractError, ContractResult},
    msg::{Action, TransferRequest},
};

/// Where and when the logs are emitted.
pub struct LogContext<'a> {
    pub abi: &'a Contract,
    pub address: Address,
    pub block_number: u64,
}

/// `IBCTransfer(address indexed sender, string indexed receiver, string
/// sourcePort, string sourceChannel, string denom, uint256 amount, string
/// memo, uint64 sequence)`
pub fn emit_ibc_transfer(
    state_db: &mut dyn StateDb,
    ctx: &LogContext,
    sender: &Address,
    msg: &MsgTransfer,
    sequence: u64,
) -> ContractResult<()> {
    emit(state_db, ctx, IBC_TRANSFER_EVENT, vec![address_topic(sender), string_topic(&msg.receiver)], &[
        Token::String(msg.source_port.clone()),
        Token::String(msg.source_channel.clone()),
        Token::String(msg.token.denom.clone()),
        Token::Uint(Uint::from(msg.token.amount.u128())),
        Token::String(msg.memo.clone()),
        Token::Uint(Uint::from(sequence)),
    ])
}

/// `LiquidStake(address indexed sender, address indexed token, uint256 amount)`
/// or `Redeem(address indexed sender, address indexed token, string receiver,
/// uint256 amount)`
pub fn emit_action(
    state_db: &mut dyn StateDb,
    ctx: &LogContext,
    action: Action,
    sender: &Address,
    req: &TransferRequest,
) -> ContractResult<()> {
    let topics = vec![address_topic(sender), address_topic(&req.token)];
    let amount = Token::Uint(Uint::from(req.amount.u128()));

    let data = match action {
        Action::LiquidStake => vec![amount],
        Action::Redeem => vec![Token::String(req.receiver.clone()), amount],
    };

    emit(state_db, ctx, action.event(), topics, &data)
}

fn emit(
    state_db: &mut dyn StateDb,
    ctx: &LogContext,
    name: &str,
    indexed: Vec<Hash>,
    data: &[Token],
) -> ContractResult<()> {
    let emission_err = |reason: String| ContractError::EventEmission {
        event: name.into(),
        reason,
    };

    let event = ctx.abi.event(name).map_err(|err| emission_err(err.to_string()))?;

    let mut topics = Vec::with_capacity(indexed.len() + 1);
    topics.push(event.signature());
    topics.extend(indexed);

    state_db
        .add_log(Log {
            address: ctx.address,
            topics,
            data: ethabi::encode(data),
            block_number: ctx.block_number,
        })
        .map_err(|err| emission_err(err.to_string()))
}

/// Indexed addresses are left-padded to 32 bytes.
fn address_topic(address: &Address) -> Hash {
    let mut topic = Hash::zero();
    topic.as_bytes_mut()[12..].copy_from_slice(address.as_bytes());
    topic
}

/// Indexed strings are stored as their Keccak-256 hash.
fn string_topic(value: &str) -> Hash {
    Hash::from_slice(&Keccak256::digest(value.as_bytes()))
}

// ----------------------------------- Tests -----------------------------------
