use ethabi::Contract;

pub const LIQUID_STAKE_METHOD: &str = "liquidStake";
pub const REDEEM_METHOD: &str = "redeem";

pub const IBC_TRANSFER_EVENT: &str = "IBCTransfer";
pub const LIQUID_STAKE_EVENT: &str = "LiquidStake";
pub const REDEEM_EVENT: &str = "Redeem";

const ABI_JSON: &str = include_str!("abi.json");

/// Load the Solidity interface the precompile exposes: the `liquidStake` and
/// `redeem` methods, and the events they emit.
pub fn load_abi() -> Result<Contract, ethabi::Error> {
    Contract::load(ABI_JSON.as_bytes())
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use ethabi::{short_signature, ParamType};

    use super::*;

    #[test]
    fn loading_abi() {
        let abi = load_abi().unwrap();

        let inputs = [ParamType::Address, ParamType::Address, ParamType::Uint(256), ParamType::String];
        for method in [LIQUID_STAKE_METHOD, REDEEM_METHOD] {
            let function = abi.function(method).unwrap();
            assert_eq!(function.short_signature(), short_signature(method, &inputs));
            assert_eq!(function.outputs.len(), 2);
        }

        for event in [IBC_TRANSFER_EVENT, LIQUID_STAKE_EVENT, REDEEM_EVENT] {
            assert!(abi.event(event).is_ok());
        }
    }

    #[test]
    fn indexed_event_params() {
        let abi = load_abi().unwrap();

        let indexed = |name: &str| {
            abi.event(name)
                .unwrap()
                .inputs
                .iter()
                .filter(|param| param.indexed)
                .map(|param| param.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(indexed(IBC_TRANSFER_EVENT), ["sender", "receiver"]);
        assert_eq!(indexed(LIQUID_STAKE_EVENT), ["sender", "token"]);
        assert_eq!(indexed(REDEEM_EVENT), ["sender", "token"]);
    }
}
