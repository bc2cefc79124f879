use {
    crate::{coins::Coins, transfer::MsgTransfer},
    cosmwasm_schema::cw_serde,
    cosmwasm_std::{Coin, Uint128},
    cw_utils::Expiration,
};

/// Message type the transfer authorizations are granted for
pub const TRANSFER_MSG_TYPE_URL: &str = "/ibc.applications.transfer.v1.MsgTransfer";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AuthzError {
    #[error("authorization to {grantee} for address {granter} does not exist")]
    NotFound {
        grantee: String,
        granter: String,
    },

    #[error("authorization to {grantee} for address {granter} expired at {expiration}")]
    Expired {
        grantee: String,
        granter: String,
        expiration: Expiration,
    },

    #[error("requested port `{port_id}` and channel `{channel_id}` allocation does not exist")]
    AllocationNotFound {
        port_id: String,
        channel_id: String,
    },

    #[error("receiver `{receiver}` is not in the allow list")]
    ReceiverNotAllowed {
        receiver: String,
    },

    #[error("requested amount `{requested}` is more than the spend limit `{limit}`")]
    SpendLimitExceeded {
        requested: Coin,
        limit: Coins,
    },

    #[error("authorization not accepted")]
    NotAccepted,
}

/// A grant stored by the authz module: a granter allows a grantee to execute a
/// message type on its behalf, until the grant expires.
#[cw_serde]
pub struct Grant {
    pub authorization: TransferAuthorization,
    pub expiration: Expiration,
}

/// ICS-20 transfer authorization: spend limits and receiver allow lists per
/// source port and channel.
#[cw_serde]
pub struct TransferAuthorization {
    pub allocations: Vec<Allocation>,
}

#[cw_serde]
pub struct Allocation {
    pub source_port: String,
    pub source_channel: String,
    /// A spend limit of `Uint128::MAX` for a denom means unbounded
    pub spend_limit: Vec<Coin>,
    /// Empty means any receiver is allowed
    pub allow_list: Vec<String>,
}

/// Outcome of checking a message against an authorization.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptResponse {
    pub accept: bool,
    /// The authorization is exhausted and the grant is to be deleted
    pub delete: bool,
    /// The authorization with the spent amount deducted, to be saved in place
    /// of the current one
    pub updated: Option<TransferAuthorization>,
}

impl Allocation {
    fn matches(&self, msg: &MsgTransfer) -> bool {
        self.source_port == msg.source_port && self.source_channel == msg.source_channel
    }

    fn allows_receiver(&self, receiver: &str) -> bool {
        self.allow_list.is_empty() || self.allow_list.iter().any(|allowed| allowed == receiver)
    }
}

impl TransferAuthorization {
    /// Check whether the transfer is within the authorization, and compute what
    /// the authorization becomes once the transfer is executed.
    ///
    /// Only the first allocation matching the message's port and channel is
    /// considered.
    pub fn accept(&self, msg: &MsgTransfer) -> Result<AcceptResponse, AuthzError> {
        let Some(index) = self.allocations.iter().position(|allocation| allocation.matches(msg)) else {
            return Err(AuthzError::AllocationNotFound {
                port_id: msg.source_port.clone(),
                channel_id: msg.source_channel.clone(),
            });
        };

        let allocation = &self.allocations[index];

        if !allocation.allows_receiver(&msg.receiver) {
            return Err(AuthzError::ReceiverNotAllowed {
                receiver: msg.receiver.clone(),
            });
        }

        let mut limit_left = Coins::try_from(allocation.spend_limit.clone()).map_err(|_| {
            AuthzError::SpendLimitExceeded {
                requested: msg.token.clone(),
                limit: Coins::empty(),
            }
        })?;

        // unbounded spend limits are never deducted from
        if limit_left.amount_of(&msg.token.denom) == Uint128::MAX {
            return Ok(AcceptResponse {
                accept: true,
                delete: false,
                updated: None,
            });
        }

        if limit_left.deduct(&msg.token).is_err() {
            return Err(AuthzError::SpendLimitExceeded {
                requested: msg.token.clone(),
                limit: limit_left,
            });
        }

        let mut allocations = self.allocations.clone();

        if limit_left.is_empty() {
            allocations.remove(index);

            if allocations.is_empty() {
                return Ok(AcceptResponse {
                    accept: true,
                    delete: true,
                    updated: None,
                });
            }
        } else {
            allocations[index].spend_limit = limit_left.into();
        }

        Ok(AcceptResponse {
            accept: true,
            delete: false,
            updated: Some(TransferAuthorization {
                allocations,
            }),
        })
    }
}

// ----------------------------------- Tests -----------------------------------
