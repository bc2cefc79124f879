use cosmwasm_std::{Coin, Uint128};
use ethabi::Address;
use outpost::{hex_address, TokenPairRegistry};

use crate::error::{ContractError, ContractResult};

/// Resolve the coin to transfer: the request's token must be the ERC-20
/// contract registered for `denom`.
///
/// Only one token is supported per action, so any other ERC-20 contract is
/// rejected even if it has a token pair of its own.
pub fn resolve_coin(
    token_pairs: &dyn TokenPairRegistry,
    denom: &str,
    token: &Address,
    amount: Uint128,
) -> ContractResult<Coin> {
    // the pair of the configured denom should always exist; a missing pair
    // means the chain is misconfigured
    let Some(pair) = token_pairs.token_pair(denom)? else {
        return Err(ContractError::TokenPairNotFound {
            denom: denom.into(),
        });
    };

    let expected = pair.erc20_contract()?;
    if *token != expected {
        return Err(ContractError::UnsupportedToken {
            token: hex_address(token),
            expected: hex_address(&expected),
        });
    }

    Ok(Coin {
        denom: pair.denom,
        amount,
    })
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;
    use mock_keepers::MockTokenPairs;
    use outpost::TokenPair;

    use super::*;

    const WEVMOS: &str = "0xd4949664cd82660aae99bedc034a0dea8a0bd517";

    fn mock_token_pairs() -> MockTokenPairs {
        let mut token_pairs = MockTokenPairs::default();
        token_pairs
            .register(TokenPair {
                erc20_address: WEVMOS.into(),
                denom: "aevmos".into(),
            })
            .unwrap();
        token_pairs
    }

    #[test]
    fn resolving_registered_token() {
        let token_pairs = mock_token_pairs();
        let wevmos = outpost::parse_address(WEVMOS).unwrap();

        let coin_res = resolve_coin(&token_pairs, "aevmos", &wevmos, Uint128::new(1000)).unwrap();
        assert_eq!(coin_res, coin(1000, "aevmos"));
    }

    #[test]
    fn rejecting_unsupported_token() {
        let token_pairs = mock_token_pairs();

        let err = resolve_coin(&token_pairs, "aevmos", &Address::repeat_byte(0x99), Uint128::new(1000))
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::UnsupportedToken {
                token: "0x9999999999999999999999999999999999999999".into(),
                expected: WEVMOS.into(),
            },
        );
    }

    #[test]
    fn missing_token_pair() {
        let token_pairs = MockTokenPairs::default();
        let wevmos = outpost::parse_address(WEVMOS).unwrap();

        let err = resolve_coin(&token_pairs, "aevmos", &wevmos, Uint128::new(1000)).unwrap_err();
        assert_eq!(
            err,
            ContractError::TokenPairNotFound {
                denom: "aevmos".into(),
            },
        );
    }
}
