use ethabi::Address;
use outpost::hex_address;

use crate::{
    error::{ContractError, ContractResult},
    msg::CallContext,
};

/// Who is transferring whose funds.
///
/// The sender declared in the call arguments is reconciled against the actual
/// call frame:
///
/// - if the caller is the declared sender, the funds are the origin's (a
///   contract may declare itself as the sender to act for the origin);
/// - otherwise the declared sender must be the origin itself;
/// - anything else is an attempt to move someone else's funds.
///
/// Whenever the caller is not the origin, the caller acts on the origin's
/// behalf and needs an authz grant from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOrigin {
    /// The origin called the precompile itself. No grant is needed.
    Direct {
        sender: Address,
    },

    /// A contract called the precompile on behalf of the origin. The contract
    /// (grantee) must hold a grant from the sender (granter).
    Delegated {
        sender: Address,
        grantee: Address,
    },

    /// The declared sender is neither the caller nor the origin.
    Forbidden {
        origin: Address,
        sender: Address,
    },
}

impl CallOrigin {
    pub fn classify(ctx: &CallContext, declared_sender: Address) -> Self {
        let sender = if ctx.caller == declared_sender {
            ctx.origin
        } else if declared_sender != ctx.origin {
            return CallOrigin::Forbidden {
                origin: ctx.origin,
                sender: declared_sender,
            };
        } else {
            declared_sender
        };

        if ctx.caller == ctx.origin {
            CallOrigin::Direct {
                sender,
            }
        } else {
            CallOrigin::Delegated {
                sender,
                grantee: ctx.caller,
            }
        }
    }

    /// The account whose funds are transferred.
    pub fn sender(&self) -> ContractResult<Address> {
        match self {
            CallOrigin::Direct { sender } | CallOrigin::Delegated { sender, .. } => Ok(*sender),
            CallOrigin::Forbidden { origin, sender } => Err(ContractError::ForbiddenSender {
                origin: hex_address(origin),
                sender: hex_address(sender),
            }),
        }
    }
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Address = Address::repeat_byte(0x11);
    const CONTRACT: Address = Address::repeat_byte(0x22);
    const STRANGER: Address = Address::repeat_byte(0x33);

    fn ctx(caller: Address) -> CallContext {
        CallContext {
            origin: ORIGIN,
            caller,
        }
    }

    #[test]
    fn direct_call() {
        let origin = CallOrigin::classify(&ctx(ORIGIN), ORIGIN);
        assert_eq!(
            origin,
            CallOrigin::Direct {
                sender: ORIGIN,
            },
        );
        assert_eq!(origin.sender().unwrap(), ORIGIN);
    }

    #[test]
    fn delegated_call() {
        // contract declares the origin as sender
        let origin = CallOrigin::classify(&ctx(CONTRACT), ORIGIN);
        assert_eq!(
            origin,
            CallOrigin::Delegated {
                sender: ORIGIN,
                grantee: CONTRACT,
            },
        );

        // contract declares itself as sender; the funds are still the origin's
        let origin = CallOrigin::classify(&ctx(CONTRACT), CONTRACT);
        assert_eq!(
            origin,
            CallOrigin::Delegated {
                sender: ORIGIN,
                grantee: CONTRACT,
            },
        );
        assert_eq!(origin.sender().unwrap(), ORIGIN);
    }

    #[test]
    fn impersonation() {
        for caller in [ORIGIN, CONTRACT] {
            let origin = CallOrigin::classify(&ctx(caller), STRANGER);
            assert_eq!(
                origin,
                CallOrigin::Forbidden {
                    origin: ORIGIN,
                    sender: STRANGER,
                },
            );
            assert!(matches!(origin.sender(), Err(ContractError::ForbiddenSender { .. })));
        }
    }
}
