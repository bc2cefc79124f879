use {
    cosmwasm_schema::cw_serde,
    cosmwasm_std::Coin,
    sha2::{Digest, Sha256},
    subtle_encoding::bech32,
};

/// Port the ICS-20 transfer module is bound to
pub const TRANSFER_PORT: &str = "transfer";

/// Maximum length of the receiver address, in bytes
pub const MAXIMUM_RECEIVER_LENGTH: usize = 2048;

/// Maximum length of the memo, in bytes
pub const MAXIMUM_MEMO_LENGTH: usize = 32768;

/// Timeout height attached to every outgoing transfer. The timestamp timeout is
/// left disabled (zero).
pub const DEFAULT_TIMEOUT_HEIGHT: Height = Height {
    revision_number: 100,
    revision_height: 100,
};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TransferError {
    #[error("invalid {kind} identifier `{id}`: {reason}")]
    InvalidIdentifier {
        kind: String,
        id: String,
        reason: String,
    },

    #[error("invalid denom `{denom}`")]
    InvalidDenom {
        denom: String,
    },

    #[error("transfer amount must be positive")]
    NonPositiveAmount,

    #[error("invalid sender address `{sender}`: {reason}")]
    InvalidSender {
        sender: String,
        reason: String,
    },

    #[error("missing recipient address")]
    EmptyReceiver,

    #[error("recipient address must not exceed {max} bytes, found {len}")]
    ReceiverTooLong {
        len: usize,
        max: usize,
    },

    #[error("memo must not exceed {max} bytes, found {len}")]
    MemoTooLong {
        len: usize,
        max: usize,
    },
}

#[cw_serde]
#[derive(Copy, Eq)]
pub struct Height {
    pub revision_number: u64,
    pub revision_height: u64,
}

/// ICS-20 fungible token transfer, as understood by the transfer module
/// (`/ibc.applications.transfer.v1.MsgTransfer`)
#[cw_serde]
pub struct MsgTransfer {
    pub source_port: String,
    pub source_channel: String,
    pub token: Coin,
    /// Bech32 account address of the sender on this chain
    pub sender: String,
    /// Address on the counterparty chain. Not validated on this side beyond
    /// being non-empty.
    pub receiver: String,
    pub timeout_height: Height,
    /// Nanoseconds since the unix epoch. Zero disables the timestamp timeout.
    pub timeout_timestamp: u64,
    pub memo: String,
}

#[cw_serde]
pub struct MsgTransferResponse {
    /// Sequence number of the packet that was sent
    pub sequence: u64,
}

impl MsgTransfer {
    pub fn new(
        source_port: impl Into<String>,
        source_channel: impl Into<String>,
        token: Coin,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            source_port: source_port.into(),
            source_channel: source_channel.into(),
            token,
            sender: sender.into(),
            receiver: receiver.into(),
            timeout_height: DEFAULT_TIMEOUT_HEIGHT,
            timeout_timestamp: 0,
            memo: memo.into(),
        }
    }

    /// Stateless checks the transfer module would otherwise reject the message
    /// for.
    pub fn validate_basic(&self) -> Result<(), TransferError> {
        validate_port_id(&self.source_port)?;
        validate_channel_id(&self.source_channel)?;

        if !is_valid_denom(&self.token.denom) {
            return Err(TransferError::InvalidDenom {
                denom: self.token.denom.clone(),
            });
        }

        if self.token.amount.is_zero() {
            return Err(TransferError::NonPositiveAmount);
        }

        if let Err(err) = bech32::decode(&self.sender) {
            return Err(TransferError::InvalidSender {
                sender: self.sender.clone(),
                reason: err.to_string(),
            });
        }

        if self.receiver.trim().is_empty() {
            return Err(TransferError::EmptyReceiver);
        }

        if self.receiver.len() > MAXIMUM_RECEIVER_LENGTH {
            return Err(TransferError::ReceiverTooLong {
                len: self.receiver.len(),
                max: MAXIMUM_RECEIVER_LENGTH,
            });
        }

        if self.memo.len() > MAXIMUM_MEMO_LENGTH {
            return Err(TransferError::MemoTooLong {
                len: self.memo.len(),
                max: MAXIMUM_MEMO_LENGTH,
            });
        }

        Ok(())
    }
}

/// The path a token took to arrive at the current chain, and its denom on the
/// chain where it was originally issued.
///
/// Unlike ICS-999, ICS-20 prefixes the latest hop to the path, e.g. a token
/// issued as `stevmos` on Stride and received here over `transfer/channel-25`
/// has the path `transfer/channel-25`.
#[cw_serde]
pub struct DenomTrace {
    pub path: String,
    pub base_denom: String,
}

impl DenomTrace {
    pub fn new(port_id: &str, channel_id: &str, base_denom: impl Into<String>) -> Self {
        Self {
            path: format!("{port_id}/{channel_id}"),
            base_denom: base_denom.into(),
        }
    }

    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            return self.base_denom.clone();
        }

        format!("{}/{}", self.path, self.base_denom)
    }

    /// Hash the full path. The resulting hash is the voucher token's denom on
    /// this chain: `ibc/{UPPERCASE_HEX(SHA256(path/base_denom))}`.
    ///
    /// Native tokens have no path; their denom is returned as is.
    pub fn ibc_denom(&self) -> String {
        if self.path.is_empty() {
            return self.base_denom.clone();
        }

        let hash = Sha256::digest(self.full_path().as_bytes());
        format!("ibc/{}", hex::encode_upper(hash))
    }
}

/// Port identifiers are between 2 and 128 characters long.
pub fn validate_port_id(id: &str) -> Result<(), TransferError> {
    validate_identifier("port", id, 2, 128)
}

/// Channel identifiers are between 8 and 64 characters long, e.g. `channel-0`.
pub fn validate_channel_id(id: &str) -> Result<(), TransferError> {
    validate_identifier("channel", id, 8, 64)
}

fn validate_identifier(kind: &str, id: &str, min: usize, max: usize) -> Result<(), TransferError> {
    let invalid = |reason: String| TransferError::InvalidIdentifier {
        kind: kind.into(),
        id: id.into(),
        reason,
    };

    if id.trim().is_empty() {
        return Err(invalid("identifier cannot be blank".into()));
    }

    if id.len() < min || id.len() > max {
        return Err(invalid(format!("length must be between {min} and {max}, found {}", id.len())));
    }

    let is_allowed = |c: char| c.is_ascii_alphanumeric() || ".-_+#[]<>".contains(c);
    if !id.chars().all(is_allowed) {
        return Err(invalid("must only contain alphanumerics and `.-_+#[]<>`".into()));
    }

    Ok(())
}

// [a-zA-Z][a-zA-Z0-9/:._-]{2,127}, and `ibc/` denoms must carry a SHA-256 hash
fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_ascii_alphabetic() || denom.len() < 3 || denom.len() > 128 {
        return false;
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c)) {
        return false;
    }

    match denom.strip_prefix("ibc/") {
        Some(hash) => hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit()),
        None => true,
    }
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;

    use super::*;

    fn mock_msg() -> MsgTransfer {
        MsgTransfer::new(
            TRANSFER_PORT,
            "channel-25",
            coin(1000, "aevmos"),
            "evmos1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3ruxvg8",
            "stride1xyz",
            "",
        )
    }

    #[test]
    fn validating_msg_transfer() {
        struct TestCase {
            mutate: fn(&mut MsgTransfer),
            expect_err: Option<fn(&TransferError) -> bool>,
        }

        let testcases = [
            // valid message
            TestCase {
                mutate: |_| {},
                expect_err: None,
            },

            // bad channel
            TestCase {
                mutate: |msg| msg.source_channel = "ch-0".into(),
                expect_err: Some(|err| matches!(err, TransferError::InvalidIdentifier { .. })),
            },

            // bad port
            TestCase {
                mutate: |msg| msg.source_port = "trans/fer".into(),
                expect_err: Some(|err| matches!(err, TransferError::InvalidIdentifier { .. })),
            },

            // zero amount
            TestCase {
                mutate: |msg| msg.token = coin(0, "aevmos"),
                expect_err: Some(|err| *err == TransferError::NonPositiveAmount),
            },

            // bad denom
            TestCase {
                mutate: |msg| msg.token = coin(1, "1evmos"),
                expect_err: Some(|err| matches!(err, TransferError::InvalidDenom { .. })),
            },

            // ibc denom without a proper hash
            TestCase {
                mutate: |msg| msg.token = coin(1, "ibc/ABCD"),
                expect_err: Some(|err| matches!(err, TransferError::InvalidDenom { .. })),
            },

            // sender is not bech32
            TestCase {
                mutate: |msg| msg.sender = "0x1111111111111111111111111111111111111111".into(),
                expect_err: Some(|err| matches!(err, TransferError::InvalidSender { .. })),
            },

            // blank receiver
            TestCase {
                mutate: |msg| msg.receiver = "   ".into(),
                expect_err: Some(|err| *err == TransferError::EmptyReceiver),
            },

            // receiver too long
            TestCase {
                mutate: |msg| msg.receiver = "a".repeat(MAXIMUM_RECEIVER_LENGTH + 1),
                expect_err: Some(|err| matches!(err, TransferError::ReceiverTooLong { .. })),
            },

            // memo too long
            TestCase {
                mutate: |msg| msg.memo = "m".repeat(MAXIMUM_MEMO_LENGTH + 1),
                expect_err: Some(|err| matches!(err, TransferError::MemoTooLong { .. })),
            },
        ];

        for testcase in testcases {
            let mut msg = mock_msg();
            (testcase.mutate)(&mut msg);

            match (msg.validate_basic(), testcase.expect_err) {
                (Ok(()), None) => (),
                (Err(err), Some(check)) => assert!(check(&err), "unexpected error: {err}"),
                (res, _) => panic!("unexpected result for {msg:?}: {res:?}"),
            }
        }
    }

    #[test]
    fn new_msg_uses_default_timeout() {
        let msg = mock_msg();
        assert_eq!(msg.timeout_height, DEFAULT_TIMEOUT_HEIGHT);
        assert_eq!(msg.timeout_timestamp, 0);
    }

    #[test]
    fn hashing_denom_trace() {
        let trace = DenomTrace::new("transfer", "channel-0", "uatom");
        assert_eq!(trace.full_path(), "transfer/channel-0/uatom");
        assert_eq!(
            trace.ibc_denom(),
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2",
        );

        // native tokens have no path
        let native = DenomTrace {
            path: String::new(),
            base_denom: "aevmos".into(),
        };
        assert_eq!(native.ibc_denom(), "aevmos");
    }
}
