use cosmwasm_std::BlockInfo;
use cw_utils::Expiration;
use ethabi::Address;
use outpost::{
    hex_address, AcceptResponse, AuthzError, AuthzKeeper, MsgTransfer, TRANSFER_MSG_TYPE_URL,
};

use crate::{
    error::{ContractError, ContractResult},
    origin::CallOrigin,
};

/// Whether a grant was consulted to authorize the transfer, and if so, what it
/// is to become once the transfer succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum GrantDecision {
    NotRequired,
    Consulted {
        grantee: Address,
        granter: Address,
        response: AcceptResponse,
        expiration: Expiration,
    },
}

/// Check that a delegated caller holds a grant covering the transfer.
///
/// Nothing is written here; the outcome is applied by `update_grant_if_needed`
/// after the transfer has gone through.
pub fn check_and_accept(
    authz: &dyn AuthzKeeper,
    block: &BlockInfo,
    origin: &CallOrigin,
    msg: &MsgTransfer,
) -> ContractResult<GrantDecision> {
    let (grantee, granter) = match origin {
        CallOrigin::Direct { .. } => return Ok(GrantDecision::NotRequired),
        CallOrigin::Delegated { sender, grantee } => (*grantee, *sender),
        CallOrigin::Forbidden { origin: tx_origin, sender } => {
            return Err(ContractError::ForbiddenSender {
                origin: hex_address(tx_origin),
                sender: hex_address(sender),
            });
        },
    };

    let Some(grant) = authz.grant(&grantee, &granter, TRANSFER_MSG_TYPE_URL)? else {
        return Err(AuthzError::NotFound {
            grantee: hex_address(&grantee),
            granter: hex_address(&granter),
        }
        .into());
    };

    if grant.expiration.is_expired(block) {
        return Err(AuthzError::Expired {
            grantee: hex_address(&grantee),
            granter: hex_address(&granter),
            expiration: grant.expiration,
        }
        .into());
    }

    let response = grant.authorization.accept(msg)?;
    if !response.accept {
        return Err(AuthzError::NotAccepted.into());
    }

    tracing::debug!(
        grantee = hex_address(&grantee),
        granter = hex_address(&granter),
        delete = response.delete,
        "Accepted transfer authorization"
    );

    Ok(GrantDecision::Consulted {
        grantee,
        granter,
        response,
        expiration: grant.expiration,
    })
}

/// Save or delete the consulted grant. Must only be called once the transfer
/// has succeeded.
pub fn update_grant_if_needed(authz: &mut dyn AuthzKeeper, decision: GrantDecision) -> ContractResult<()> {
    let GrantDecision::Consulted { grantee, granter, response, expiration } = decision else {
        return Ok(());
    };

    if response.delete {
        authz
            .delete_grant(&grantee, &granter, TRANSFER_MSG_TYPE_URL)
            .map_err(ContractError::GrantUpdate)?;
    } else if let Some(updated) = response.updated {
        authz
            .save_grant(&grantee, &granter, &updated, expiration)
            .map_err(ContractError::GrantUpdate)?;
    }

    Ok(())
}

// ----------------------------------- Tests -----------------------------------
