use std::collections::HashMap;

use super::Ledger;
use crate::error::{MintError, MintResult};
use crate::mining::{Address, U256};

/// A simple in-memory balance book over a HashMap.
/// Keyed by holder address; tracks the running total supply.
#[derive(Debug)]
pub struct Balances {
    contract: Address,
    map: HashMap<Address, U256>,
    total_supply: U256,
}

impl Balances {
    /// `contract` is the token's own address; it may never receive a mint.
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            map: HashMap::new(),
            total_supply: U256::zero(),
        }
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.map.get(holder).copied().unwrap_or_else(U256::zero)
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Number of holders with a recorded balance.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Ledger for Balances {
    fn mint(&mut self, amount: U256, recipient: &Address) -> MintResult<()> {
        if recipient.is_zero() || *recipient == self.contract {
            return Err(MintError::RecipientRejected(*recipient));
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(MintError::Overflow)?;
        let balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(MintError::Overflow)?;

        self.total_supply = supply;
        self.map.insert(*recipient, balance);
        Ok(())
    }
}
