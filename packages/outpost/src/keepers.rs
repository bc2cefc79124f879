use {
    crate::{
        address::parse_address,
        authz::{Grant, TransferAuthorization},
        transfer::{MsgTransfer, MsgTransferResponse},
    },
    cosmwasm_schema::cw_serde,
    cosmwasm_std::StdResult,
    cw_utils::Expiration,
    ethabi::{Address, Hash},
};

// ------------------------------- token pairs --------------------------------

/// Registered mapping between a native denom and the ERC-20 contract wrapping
/// it.
#[cw_serde]
pub struct TokenPair {
    /// Hex address of the ERC-20 contract
    pub erc20_address: String,
    pub denom: String,
}

impl TokenPair {
    pub fn erc20_contract(&self) -> StdResult<Address> {
        parse_address(&self.erc20_address)
    }
}

pub trait TokenPairRegistry {
    /// The token pair registered for a native denom, if any.
    fn token_pair(&self, denom: &str) -> StdResult<Option<TokenPair>>;
}

// ---------------------------------- authz -----------------------------------

/// Grants are keyed by (grantee, granter, message type URL).
pub trait AuthzKeeper {
    /// The grant, if one exists. Expired grants may be returned; it is up to the
    /// caller to check the expiration.
    fn grant(&self, grantee: &Address, granter: &Address, msg_type_url: &str) -> StdResult<Option<Grant>>;

    fn save_grant(
        &mut self,
        grantee: &Address,
        granter: &Address,
        authorization: &TransferAuthorization,
        expiration: Expiration,
    ) -> StdResult<()>;

    fn delete_grant(&mut self, grantee: &Address, granter: &Address, msg_type_url: &str) -> StdResult<()>;
}

// --------------------------------- transfer ---------------------------------

pub trait TransferKeeper {
    /// Escrow or burn the tokens and send the ICS-20 packet. Either everything
    /// happens or nothing does.
    fn transfer(&mut self, msg: &MsgTransfer) -> StdResult<MsgTransferResponse>;
}

// ----------------------------------- evm ------------------------------------

/// An EVM log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<Hash>,
    pub data: Vec<u8>,
    pub block_number: u64,
}

pub trait StateDb {
    fn add_log(&mut self, log: Log) -> StdResult<()>;
}

// ---------------------------------- bundle ----------------------------------

/// Everything a precompile call reads from or writes to, besides its own
/// configuration.
pub struct Keepers<'a> {
    pub token_pairs: &'a dyn TokenPairRegistry,
    pub authz: &'a mut dyn AuthzKeeper,
    pub transfer: &'a mut dyn TransferKeeper,
    pub state_db: &'a mut dyn StateDb,
}
