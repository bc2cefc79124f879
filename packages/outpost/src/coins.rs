use {
    cosmwasm_std::{Coin, OverflowError, Uint128},
    std::{collections::BTreeMap, fmt},
};

// denom => amount
//
// zero amounts are never stored, so an empty map means no coins at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coins(BTreeMap<String, Uint128>);

// duplicate denoms are summed up; zero amounts are dropped
impl TryFrom<Vec<Coin>> for Coins {
    type Error = OverflowError;

    fn try_from(coin_vec: Vec<Coin>) -> Result<Self, Self::Error> {
        let mut coins = Self::empty();
        for coin in coin_vec {
            coins.add(coin)?;
        }
        Ok(coins)
    }
}

// NOTE: the output vec is guaranteed to be ordered alphabetically ascendingly
// by the denoms
impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins
            .0
            .into_iter()
            .map(|(denom, amount)| Coin {
                denom,
                amount,
            })
            .collect()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }

        let s = self
            .0
            .iter()
            .map(|(denom, amount)| format!("{amount}{denom}"))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{s}")
    }
}

impl Coins {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn amount_of(&self, denom: &str) -> Uint128 {
        self.0.get(denom).copied().unwrap_or_default()
    }

    pub fn add(&mut self, new_coin: Coin) -> Result<(), OverflowError> {
        if new_coin.amount.is_zero() {
            return Ok(());
        }

        let amount = self.0.entry(new_coin.denom).or_insert_with(Uint128::zero);
        *amount = amount.checked_add(new_coin.amount)?;
        Ok(())
    }

    /// Deduct a coin. Errors if the deduction would make the amount negative,
    /// which includes deducting a denom that isn't held at all.
    pub fn deduct(&mut self, coin: &Coin) -> Result<(), OverflowError> {
        let remaining = self.amount_of(&coin.denom).checked_sub(coin.amount)?;

        if remaining.is_zero() {
            self.0.remove(&coin.denom);
        } else {
            self.0.insert(coin.denom.clone(), remaining);
        }

        Ok(())
    }
}

// ----------------------------------- Tests -----------------------------------

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;

    use super::*;

    #[test]
    fn adding() {
        let mut coins = Coins::empty();

        coins.add(coin(12345, "aevmos")).unwrap();
        coins.add(coin(23456, "uatom")).unwrap();
        coins.add(coin(0, "ustrd")).unwrap();
        coins.add(coin(88888, "aevmos")).unwrap();

        let vec: Vec<Coin> = coins.into();

        assert_eq!(vec, vec![coin(12345 + 88888, "aevmos"), coin(23456, "uatom")]);
    }

    #[test]
    fn deducting() {
        let mut coins = Coins::try_from(vec![coin(100, "aevmos"), coin(50, "uatom")]).unwrap();

        coins.deduct(&coin(40, "aevmos")).unwrap();
        assert_eq!(coins.amount_of("aevmos"), Uint128::new(60));

        // deducting everything removes the denom
        coins.deduct(&coin(50, "uatom")).unwrap();
        assert_eq!(coins.to_string(), "60aevmos");

        // more than available
        assert!(coins.deduct(&coin(61, "aevmos")).is_err());

        // denom not held
        assert!(coins.deduct(&coin(1, "ustrd")).is_err());

        coins.deduct(&coin(60, "aevmos")).unwrap();
        assert!(coins.is_empty());
        assert_eq!(coins.to_string(), "[]");
    }

    #[test]
    fn comparing() {
        let coins1 = Coins::try_from(vec![
            coin(23456, "uatom"),
            coin(88888, "aevmos"),
        ])
        .unwrap();

        let mut coins2 = coins1.clone();
        assert_eq!(coins1, coins2);

        coins2.add(coin(1, "aevmos")).unwrap();
        assert_ne!(coins1, coins2);
    }
}
