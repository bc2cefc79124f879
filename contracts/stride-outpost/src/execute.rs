use cosmwasm_std::{Env, Response};
use ethabi::{Token, Uint};
use outpost::{hex_address, to_bech32, Keepers, MsgTransfer};

use crate::{
    authz::{check_and_accept, update_grant_if_needed},
    contract::Precompile,
    error::{ContractError, ContractResult},
    events::{emit_action, emit_ibc_transfer, LogContext},
    msg::{Action, CallContext, TransferRequest},
    origin::CallOrigin,
    token::resolve_coin,
};

impl Precompile {
    /// Send native tokens to Stride with a memo that has Autopilot liquid
    /// stake them for the receiver.
    pub fn liquid_stake(
        &self,
        keepers: Keepers,
        env: &Env,
        ctx: &CallContext,
        req: TransferRequest,
    ) -> ContractResult<Response> {
        self.transfer_with_memo(keepers, env, ctx, Action::LiquidStake, req)
    }

    /// Send stTokens back to Stride with a memo that has Autopilot redeem them,
    /// returning the native tokens to the sender.
    pub fn redeem(
        &self,
        keepers: Keepers,
        env: &Env,
        ctx: &CallContext,
        req: TransferRequest,
    ) -> ContractResult<Response> {
        self.transfer_with_memo(keepers, env, ctx, Action::Redeem, req)
    }

    /// ICS-20 transfer carrying an Autopilot memo for the given action.
    ///
    /// Nothing is rolled back here on failure. Every error aborts the call and
    /// the EVM reverts whatever the keepers have written.
    fn transfer_with_memo(
        &self,
        keepers: Keepers,
        env: &Env,
        ctx: &CallContext,
        action: Action,
        req: TransferRequest,
    ) -> ContractResult<Response> {
        let origin = CallOrigin::classify(ctx, req.sender);
        let sender = origin.sender()?;
        let sender_bech32 = to_bech32(&self.cfg.bech32_prefix, &sender);

        let coin = resolve_coin(keepers.token_pairs, &action.denom(&self.cfg), &req.token, req.amount)?;

        let memo = action.memo(&req.receiver, &sender_bech32)?;

        let msg = MsgTransfer::new(
            &self.cfg.port_id,
            &self.cfg.channel_id,
            coin,
            &sender_bech32,
            &req.receiver,
            memo,
        );
        msg.validate_basic()?;

        let decision = check_and_accept(&*keepers.authz, &env.block, &origin, &msg)?;

        let res = keepers.transfer.transfer(&msg).map_err(|err| {
            tracing::warn!(err = err.to_string(), sender = sender_bech32, "Transfer failed");
            ContractError::TransferExecution(err)
        })?;

        update_grant_if_needed(&mut *keepers.authz, decision)?;

        let log_ctx = LogContext {
            abi: &self.abi,
            address: self.address,
            block_number: env.block.height,
        };
        emit_ibc_transfer(&mut *keepers.state_db, &log_ctx, &sender, &msg, res.sequence)?;
        emit_action(&mut *keepers.state_db, &log_ctx, action, &sender, &req)?;

        // (uint64 nextSequence, bool success)
        let output = ethabi::encode(&[Token::Uint(Uint::from(res.sequence)), Token::Bool(true)]);

        tracing::info!(
            method = action.method(),
            sender = sender_bech32,
            receiver = req.receiver,
            sequence = res.sequence,
            "Performed memo transfer"
        );

        Ok(Response::new()
            .set_data(output)
            .add_attribute("method", action.method())
            .add_attribute("sender", hex_address(&sender))
            .add_attribute("receiver", &req.receiver)
            .add_attribute("coin", msg.token.to_string())
            .add_attribute("channel_id", &msg.source_channel)
            .add_attribute("sequence", res.sequence.to_string()))
    }
}
