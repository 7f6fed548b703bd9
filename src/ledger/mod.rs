pub mod balances;

pub use balances::Balances;

use crate::error::MintResult;
use crate::mining::{Address, U256};

pub const TOKEN_NAME: &str = "Spring Token";
pub const TOKEN_SYMBOL: &str = "SPRING";
pub const TOKEN_DECIMALS: u8 = 18;

/// Receiver of mint instructions. Never reads mining state.
///
/// `mint` is all-or-nothing: on error no balance or supply changes.
pub trait Ledger {
    fn mint(&mut self, amount: U256, recipient: &Address) -> MintResult<()>;
}
