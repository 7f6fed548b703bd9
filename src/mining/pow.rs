use sha2::{Digest as _, Sha256};

use super::types::{Address, Challenge, ClaimRequest, Digest, U256};
use crate::error::{MintError, MintResult};

/// The one-way function combining challenge, solver and nonce.
pub trait PowHash {
    fn digest(&self, challenge: &Challenge, solver: &Address, nonce: &U256) -> Digest;
}

/// SHA-256 over `challenge || solver || nonce` (nonce as 32 big-endian bytes).
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Pow;

impl PowHash for Sha256Pow {
    fn digest(&self, challenge: &Challenge, solver: &Address, nonce: &U256) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(challenge.as_bytes());
        hasher.update(solver.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize()[..]);
        Digest(out)
    }
}

/// A digest counts only if it is strictly below the target.
pub fn meets_target(digest: &Digest, target: U256) -> bool {
    digest.to_u256() < target
}

/// Check a claim against the live challenge and target.
///
/// Returns the recomputed digest on success. The legacy variant must also
/// agree with the digest the client asserted.
pub fn validate<H: PowHash>(
    hasher: &H,
    challenge: &Challenge,
    target: U256,
    request: &ClaimRequest,
) -> MintResult<Digest> {
    let solution = request.solution();
    let computed = hasher.digest(challenge, &solution.solver, &solution.nonce);

    if let Some(asserted) = request.asserted_digest() {
        if *asserted != computed {
            return Err(MintError::DigestMismatch {
                asserted: *asserted,
                computed,
            });
        }
    }

    if !meets_target(&computed, target) {
        return Err(MintError::InvalidProof { digest: computed });
    }
    Ok(computed)
}

/// Challenge for the next round, bound to the digest that closed this one.
pub fn next_challenge(challenge: &Challenge, digest: &Digest) -> Challenge {
    let mut hasher = Sha256::new();
    hasher.update(challenge.as_bytes());
    hasher.update(digest.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize()[..]);
    Challenge(out)
}

/// Search nonces `start, start + 1, ..` for one whose digest meets `target`.
/// Gives up after `max_attempts` tries.
pub fn solve<H: PowHash>(
    hasher: &H,
    challenge: &Challenge,
    solver: &Address,
    target: U256,
    start: U256,
    max_attempts: u64,
) -> Option<(U256, Digest)> {
    let mut nonce = start;
    for _ in 0..max_attempts {
        let digest = hasher.digest(challenge, solver, &nonce);
        if meets_target(&digest, target) {
            return Some((nonce, digest));
        }
        nonce = nonce.overflowing_add(U256::one()).0;
    }
    None
}
