use std::fmt;
use std::str::FromStr;

use uint::construct_uint;

construct_uint! {
    /// Unsigned 256-bit integer (4 x 64-bit little-endian limbs).
    pub struct U256(4);
}

impl U256 {
    /// Parse either a `0x`-prefixed hex string or a plain decimal string.
    pub fn parse(s: &str) -> Option<U256> {
        let s = s.trim();
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
            Some(_) => None,
            None => U256::from_dec_str(s).ok(),
        }
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.to_big_endian(&mut out);
        out
    }

    /// Narrow to u64, saturating instead of panicking.
    pub fn saturating_u64(&self) -> u64 {
        if self.bits() > 64 {
            u64::MAX
        } else {
            self.low_u64()
        }
    }
}

macro_rules! fixed_bytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix("0x").unwrap_or(s);
                let mut out = [0u8; $len];
                hex::decode_to_slice(s, &mut out)?;
                Ok($name(out))
            }
        }
    };
}

fixed_bytes!(
    /// Identity of a solver, the owner, or the token itself.
    Address,
    20
);
fixed_bytes!(
    /// Rotating seed every proof-of-work solution must commit to.
    Challenge,
    32
);
fixed_bytes!(
    /// Output of the proof-of-work hash.
    Digest,
    32
);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Address whose last byte is `n`, handy for fixtures and defaults.
    pub fn from_low_u8(n: u8) -> Address {
        let mut out = [0u8; 20];
        out[19] = n;
        Address(out)
    }
}

impl Digest {
    /// The digest read as a big-endian unsigned integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }
}

/// A nonce submitted on behalf of a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub nonce: U256,
    pub solver: Address,
}

/// The two claim entry points share one validation routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRequest {
    Direct(Solution),
    /// Older clients compute the digest off-engine and assert it.
    LegacyWithDigest { solution: Solution, digest: Digest },
}

impl ClaimRequest {
    pub fn direct(nonce: U256, solver: Address) -> Self {
        ClaimRequest::Direct(Solution { nonce, solver })
    }

    pub fn legacy(nonce: U256, solver: Address, digest: Digest) -> Self {
        ClaimRequest::LegacyWithDigest {
            solution: Solution { nonce, solver },
            digest,
        }
    }

    pub fn solution(&self) -> &Solution {
        match self {
            ClaimRequest::Direct(solution) => solution,
            ClaimRequest::LegacyWithDigest { solution, .. } => solution,
        }
    }

    pub fn asserted_digest(&self) -> Option<&Digest> {
        match self {
            ClaimRequest::Direct(_) => None,
            ClaimRequest::LegacyWithDigest { digest, .. } => Some(digest),
        }
    }
}
