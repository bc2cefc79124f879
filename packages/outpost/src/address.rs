use {
    cosmwasm_std::{StdError, StdResult},
    ethabi::Address,
    subtle_encoding::bech32,
};

/// Parse a hex string, with or without the `0x` prefix, into a 20-byte EVM
/// address.
pub fn parse_address(address: &str) -> StdResult<Address> {
    let hex_str = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if hex_str.len() != 40 {
        return Err(StdError::generic_err(format!(
            "invalid address `{address}`: expected 40 hex characters, got {}",
            hex_str.len(),
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|err| StdError::generic_err(format!("invalid address `{address}`: {err}")))?;

    Ok(Address::from_slice(&bytes))
}

/// Full lowercase hex representation with the `0x` prefix.
pub fn hex_address(address: &Address) -> String {
    format!("{address:#x}")
}

/// The Cosmos SDK account address sharing the same 20 bytes as the EVM
/// address, e.g. `evmos1...`.
pub fn to_bech32(prefix: &str, address: &Address) -> String {
    bech32::encode(prefix, address.as_bytes())
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_address() -> Address {
        let mut address = Address::zero();
        address.0[18] = 0xde;
        address.0[19] = 0xad;
        address
    }

    #[test]
    fn parsing_addresses() {
        let expected = dead_address();

        for input in [
            "0x000000000000000000000000000000000000dEaD",
            "0X000000000000000000000000000000000000dead",
            "000000000000000000000000000000000000DEAD",
        ] {
            assert_eq!(parse_address(input).unwrap(), expected);
        }

        // too short
        assert!(parse_address("0xdead").is_err());

        // not hex
        assert!(parse_address("0x00000000000000000000000000000000000zdead").is_err());
    }

    #[test]
    fn formatting_hex() {
        let address = dead_address();
        assert_eq!(hex_address(&address), "0x000000000000000000000000000000000000dead");
    }

    #[test]
    fn bech32_round_trip() {
        let address = Address::repeat_byte(0x11);

        let bech = to_bech32("evmos", &address);
        assert!(bech.starts_with("evmos1"));

        let (hrp, data) = bech32::decode(&bech).unwrap();
        assert_eq!(hrp, "evmos");
        assert_eq!(data, address.as_bytes());
    }
}
