use cosmwasm_std::{Coin, Empty, MemoryStorage, Order, StdError, StdResult, Uint128};
use cw_storage_plus::{Item, Map};
use cw_utils::Expiration;
use ethabi::Address;
use outpost::{
    AuthzKeeper, Grant, Keepers, Log, MsgTransfer, MsgTransferResponse, StateDb, TokenPair,
    TokenPairRegistry, TransferAuthorization, TransferKeeper, TRANSFER_MSG_TYPE_URL,
};

// denom => token pair
pub const TOKEN_PAIRS: Map<&str, TokenPair> = Map::new("token_pairs");

// (grantee, granter, msg_type_url) => grant
pub const GRANTS: Map<(&[u8], &[u8], &str), Grant> = Map::new("grants");

// (port_id, channel_id) => ()
pub const OPEN_CHANNELS: Map<(&str, &str), Empty> = Map::new("open_chans");

// (port_id, channel_id) => next sequence
pub const NEXT_SEQUENCES: Map<(&str, &str), u64> = Map::new("next_seqs");

// (address, denom) => amount
pub const BALANCES: Map<(&str, &str), Uint128> = Map::new("balances");

// (channel_id, sequence) => transfer
pub const PACKETS: Map<(&str, u64), MsgTransfer> = Map::new("packets");

// number of transfers rejected, for asserting that nothing was sent
pub const REJECTED: Item<u64> = Item::new("rejected");

#[derive(Default)]
pub struct MockTokenPairs {
    storage: MemoryStorage,
}

impl MockTokenPairs {
    pub fn register(&mut self, pair: TokenPair) -> StdResult<()> {
        TOKEN_PAIRS.save(&mut self.storage, &pair.denom, &pair)
    }
}

impl TokenPairRegistry for MockTokenPairs {
    fn token_pair(&self, denom: &str) -> StdResult<Option<TokenPair>> {
        TOKEN_PAIRS.may_load(&self.storage, denom)
    }
}

#[derive(Default)]
pub struct MockAuthz {
    storage: MemoryStorage,
}

impl MockAuthz {
    /// Grant `grantee` the right to transfer `granter`'s tokens.
    pub fn grant_transfer(
        &mut self,
        grantee: &Address,
        granter: &Address,
        authorization: TransferAuthorization,
        expiration: Expiration,
    ) -> StdResult<()> {
        self.save_grant(grantee, granter, &authorization, expiration)
    }

    pub fn transfer_grant(&self, grantee: &Address, granter: &Address) -> StdResult<Option<Grant>> {
        self.grant(grantee, granter, TRANSFER_MSG_TYPE_URL)
    }
}

impl AuthzKeeper for MockAuthz {
    fn grant(&self, grantee: &Address, granter: &Address, msg_type_url: &str) -> StdResult<Option<Grant>> {
        GRANTS.may_load(&self.storage, (grantee.as_bytes(), granter.as_bytes(), msg_type_url))
    }

    fn save_grant(
        &mut self,
        grantee: &Address,
        granter: &Address,
        authorization: &TransferAuthorization,
        expiration: Expiration,
    ) -> StdResult<()> {
        GRANTS.save(
            &mut self.storage,
            (grantee.as_bytes(), granter.as_bytes(), TRANSFER_MSG_TYPE_URL),
            &Grant {
                authorization: authorization.clone(),
                expiration,
            },
        )
    }

    fn delete_grant(&mut self, grantee: &Address, granter: &Address, msg_type_url: &str) -> StdResult<()> {
        let key = (grantee.as_bytes(), granter.as_bytes(), msg_type_url);

        if !GRANTS.has(&self.storage, key) {
            return Err(StdError::not_found("grant"));
        }

        GRANTS.remove(&mut self.storage, key);
        Ok(())
    }
}

/// Escrows the sender's balance and records the packet, like the ICS-20
/// transfer module does when the sending chain is the token's source.
#[derive(Default)]
pub struct MockTransfer {
    storage: MemoryStorage,
}

impl MockTransfer {
    pub fn open_channel(&mut self, port_id: &str, channel_id: &str) -> StdResult<()> {
        OPEN_CHANNELS.save(&mut self.storage, (port_id, channel_id), &Empty {})
    }

    pub fn close_channel(&mut self, port_id: &str, channel_id: &str) {
        OPEN_CHANNELS.remove(&mut self.storage, (port_id, channel_id));
    }

    pub fn set_balance(&mut self, address: &str, coin: Coin) -> StdResult<()> {
        BALANCES.save(&mut self.storage, (address, coin.denom.as_str()), &coin.amount)
    }

    pub fn balance(&self, address: &str, denom: &str) -> StdResult<Uint128> {
        Ok(BALANCES.may_load(&self.storage, (address, denom))?.unwrap_or_default())
    }

    /// All packets sent so far, ordered by channel and sequence.
    pub fn packets(&self) -> StdResult<Vec<(u64, MsgTransfer)>> {
        PACKETS
            .range(&self.storage, None, None, Order::Ascending)
            .map(|item| {
                let ((_, sequence), msg) = item?;
                Ok((sequence, msg))
            })
            .collect()
    }

    pub fn rejected(&self) -> StdResult<u64> {
        Ok(REJECTED.may_load(&self.storage)?.unwrap_or(0))
    }

    fn try_transfer(&mut self, msg: &MsgTransfer) -> StdResult<MsgTransferResponse> {
        let channel = (msg.source_port.as_str(), msg.source_channel.as_str());

        if !OPEN_CHANNELS.has(&self.storage, channel) {
            return Err(StdError::generic_err(format!(
                "channel {}/{} not found or closed",
                msg.source_port, msg.source_channel,
            )));
        }

        let balance = self.balance(&msg.sender, &msg.token.denom)?;
        let Ok(balance_after) = balance.checked_sub(msg.token.amount) else {
            return Err(StdError::generic_err(format!(
                "insufficient funds: {balance}{} is smaller than {}",
                msg.token.denom, msg.token,
            )));
        };

        let sequence = NEXT_SEQUENCES.may_load(&self.storage, channel)?.unwrap_or(1);

        BALANCES.save(&mut self.storage, (msg.sender.as_str(), msg.token.denom.as_str()), &balance_after)?;
        NEXT_SEQUENCES.save(&mut self.storage, channel, &(sequence + 1))?;
        PACKETS.save(&mut self.storage, (msg.source_channel.as_str(), sequence), msg)?;

        Ok(MsgTransferResponse {
            sequence,
        })
    }
}

impl TransferKeeper for MockTransfer {
    fn transfer(&mut self, msg: &MsgTransfer) -> StdResult<MsgTransferResponse> {
        match self.try_transfer(msg) {
            Ok(res) => Ok(res),
            Err(err) => {
                // the counter lives outside the transfer's own state changes
                let rejected = self.rejected()?;
                REJECTED.save(&mut self.storage, &(rejected + 1))?;
                Err(err)
            },
        }
    }
}

#[derive(Default)]
pub struct MockStateDb {
    logs: Vec<Log>,
    reject: bool,
}

impl MockStateDb {
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Make every subsequent `add_log` call fail.
    pub fn reject_logs(&mut self) {
        self.reject = true;
    }
}

impl StateDb for MockStateDb {
    fn add_log(&mut self, log: Log) -> StdResult<()> {
        if self.reject {
            return Err(StdError::generic_err("state db rejected the log"));
        }

        self.logs.push(log);
        Ok(())
    }
}

/// All the mock keepers of one chain.
#[derive(Default)]
pub struct MockChain {
    pub token_pairs: MockTokenPairs,
    pub authz: MockAuthz,
    pub transfer: MockTransfer,
    pub state_db: MockStateDb,
}

impl MockChain {
    pub fn keepers(&mut self) -> Keepers<'_> {
        Keepers {
            token_pairs: &self.token_pairs,
            authz: &mut self.authz,
            transfer: &mut self.transfer,
            state_db: &mut self.state_db,
        }
    }
}

// ----------------------------------- Tests -----------------------------------
