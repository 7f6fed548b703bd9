//! Error types for claims and administrative calls.

use thiserror::Error;

use crate::mining::{Address, Digest};

/// Every way a claim or an admin write can be refused. All of them leave
/// mining state and the ledger untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    /// Digest not below the current target.
    #[error("Digest {digest} does not meet the mining target")]
    InvalidProof { digest: Digest },

    /// Legacy claim asserted a digest the engine could not reproduce.
    #[error("Challenge digest does not match expected digest: asserted {asserted}, computed {computed}")]
    DigestMismatch { asserted: Digest, computed: Digest },

    /// Scheduled reward at the claim time is zero.
    #[error("Reward has reached zero")]
    RewardExhausted,

    /// Null, burn or self address as mint recipient.
    #[error("Recipient {0} cannot receive minted tokens")]
    RecipientRejected(Address),

    /// Amount or supply arithmetic would wrap.
    #[error("Integer overflow")]
    Overflow,

    /// Admin call from anyone but the owner.
    #[error("Caller {0} is not authorized")]
    Unauthorized(Address),
}

impl MintError {
    /// Stable machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            MintError::InvalidProof { .. } => "invalid_proof",
            MintError::DigestMismatch { .. } => "digest_mismatch",
            MintError::RewardExhausted => "reward_exhausted",
            MintError::RecipientRejected(_) => "recipient_rejected",
            MintError::Overflow => "overflow",
            MintError::Unauthorized(_) => "unauthorized",
        }
    }
}

/// Result type for mining operations.
pub type MintResult<T> = Result<T, MintError>;
