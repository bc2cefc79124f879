use cosmwasm_std::{Env, Response};
use ethabi::{Address, Contract, Function};
use outpost::{load_abi, Keepers, LIQUID_STAKE_METHOD, REDEEM_METHOD};

use crate::{
    args::parse_transfer_request,
    error::{ContractError, ContractResult},
    msg::{CallContext, OutpostConfig},
};

/// The Stride outpost precompile.
///
/// Immutable once constructed; every call gets the keepers it reads from and
/// writes to passed in.
#[derive(Debug, Clone)]
pub struct Precompile {
    pub(crate) cfg: OutpostConfig,
    pub(crate) address: Address,
    pub(crate) abi: Contract,
}

impl Precompile {
    pub fn new(cfg: OutpostConfig) -> ContractResult<Self> {
        let address = cfg.validate()?;

        let abi = load_abi().map_err(|err| ContractError::Abi {
            reason: err.to_string(),
        })?;

        Ok(Self {
            cfg,
            address,
            abi,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &OutpostConfig {
        &self.cfg
    }

    pub fn abi(&self) -> &Contract {
        &self.abi
    }

    /// Whether the method changes state. Both methods do.
    pub fn is_transaction(&self, method: &str) -> bool {
        matches!(method, LIQUID_STAKE_METHOD | REDEEM_METHOD)
    }

    /// Entry point of the EVM: dispatch the call data to the method its
    /// selector names. On success, the response data is the ABI-encoded return
    /// value.
    pub fn run(
        &self,
        keepers: Keepers,
        env: &Env,
        ctx: &CallContext,
        input: &[u8],
    ) -> ContractResult<Response> {
        let Some((selector, data)) = split_selector(input) else {
            return Err(ContractError::UnknownMethod {
                selector: hex_selector(input),
            });
        };

        let function = self.function_by_selector(selector)?;

        match function.name.as_str() {
            LIQUID_STAKE_METHOD => {
                let req = parse_transfer_request(function, data)?;
                self.liquid_stake(keepers, env, ctx, req)
            },
            // implemented, but not reachable from the EVM until redemptions are
            // enabled for this chain
            REDEEM_METHOD => Err(ContractError::MethodDisabled {
                method: REDEEM_METHOD.into(),
            }),
            _ => Err(ContractError::UnknownMethod {
                selector: hex_selector(selector),
            }),
        }
    }

    fn function_by_selector(&self, selector: &[u8]) -> ContractResult<&Function> {
        self.abi
            .functions()
            .find(|function| function.short_signature() == selector)
            .ok_or_else(|| ContractError::UnknownMethod {
                selector: hex_selector(selector),
            })
    }
}

fn split_selector(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if input.len() < 4 {
        return None;
    }

    Some(input.split_at(4))
}

fn hex_selector(selector: &[u8]) -> String {
    selector.iter().map(|byte| format!("{byte:02x}")).collect()
}
