pub mod args;
pub mod authz;
pub mod contract;
pub mod error;
pub mod events;
pub mod execute;
pub mod msg;
pub mod origin;
pub mod token;

pub use crate::{
    contract::Precompile,
    error::{ContractError, ContractResult},
    msg::{Action, CallContext, OutpostConfig, TransferRequest},
};
