//! Environment-driven configuration. `.env` is loaded by `main` before
//! this runs.

use std::env;

use sha2::{Digest as _, Sha256};
use thiserror::Error;

use crate::mining::{Address, Challenge, MAXIMUM_TARGET, U256};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

fn invalid(var: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// The only identity allowed to make administrative writes.
    pub owner: Address,
    /// The token's own address; never a valid mint recipient.
    pub contract: Address,
    /// Bearer secret that maps an HTTP caller to `owner`. `None` disables
    /// the admin routes.
    pub admin_token: Option<String>,
    pub genesis_time: u64,
    pub initial_challenge: Challenge,
    /// Unclamped; the mining state clamps it on install.
    pub mining_target: U256,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take defaults, malformed
    /// ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match var("PORT") {
            Some(v) => v.parse().map_err(|e| invalid("PORT", e))?,
            None => 8080,
        };
        let owner = match var("OWNER_ADDRESS") {
            Some(v) => v.parse().map_err(|e| invalid("OWNER_ADDRESS", e))?,
            None => Address::from_low_u8(0x01),
        };
        let contract = match var("CONTRACT_ADDRESS") {
            Some(v) => v.parse().map_err(|e| invalid("CONTRACT_ADDRESS", e))?,
            None => Address::from_low_u8(0xff),
        };
        let genesis_time = match var("GENESIS_TIME") {
            Some(v) => v.parse().map_err(|e| invalid("GENESIS_TIME", e))?,
            None => chrono::Utc::now().timestamp().max(0) as u64,
        };
        let initial_challenge = match var("INITIAL_CHALLENGE") {
            Some(v) => v.parse().map_err(|e| invalid("INITIAL_CHALLENGE", e))?,
            None => derive_challenge(&owner, genesis_time),
        };
        let mining_target = match var("MINING_TARGET") {
            Some(v) => U256::parse(&v)
                .ok_or_else(|| invalid("MINING_TARGET", "expected decimal or 0x hex"))?,
            None => MAXIMUM_TARGET,
        };

        let config = Self {
            host,
            port,
            owner,
            contract,
            admin_token: var("ADMIN_TOKEN"),
            genesis_time,
            initial_challenge,
            mining_target,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract.is_zero() {
            return Err(invalid("CONTRACT_ADDRESS", "must not be the zero address"));
        }
        if self.owner == self.contract {
            return Err(invalid("OWNER_ADDRESS", "must differ from CONTRACT_ADDRESS"));
        }
        Ok(())
    }
}

/// Seed challenge for a deployment: `SHA-256(owner || genesis_time as u64 BE)`.
pub fn derive_challenge(owner: &Address, genesis_time: u64) -> Challenge {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_bytes());
    hasher.update(genesis_time.to_be_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize()[..]);
    Challenge(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[("GENESIS_TIME", "1600000000")]).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.owner, Address::from_low_u8(1));
        assert_eq!(cfg.contract, Address::from_low_u8(0xff));
        assert_eq!(cfg.admin_token, None);
        assert_eq!(cfg.genesis_time, 1_600_000_000);
        assert_eq!(cfg.mining_target, MAXIMUM_TARGET);
        assert_eq!(
            cfg.initial_challenge,
            derive_challenge(&cfg.owner, 1_600_000_000)
        );
    }

    #[test]
    fn explicit_values() {
        let cfg = load(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("OWNER_ADDRESS", "0x00000000000000000000000000000000000000aa"),
            ("ADMIN_TOKEN", "s3cret"),
            ("GENESIS_TIME", "42"),
            (
                "INITIAL_CHALLENGE",
                "b17a56f9742c832695ad12aeb474ca05a826717d3a5f3f9d79889e4c3eee506b",
            ),
            ("MINING_TARGET", "0x10000"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.owner, Address::from_low_u8(0xaa));
        assert_eq!(cfg.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(cfg.genesis_time, 42);
        assert_eq!(cfg.initial_challenge.as_bytes()[0], 0xb1);
        assert_eq!(cfg.mining_target, U256::from(65_536u64));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = load(&[("PORT", "  "), ("ADMIN_TOKEN", "")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.admin_token, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        let var_of = |pairs: &[(&str, &str)]| match load(pairs) {
            Err(ConfigError::Invalid { var, .. }) => var,
            Ok(_) => panic!("expected error for {pairs:?}"),
        };
        assert_eq!(var_of(&[("PORT", "eighty")]), "PORT");
        assert_eq!(var_of(&[("OWNER_ADDRESS", "0x1234")]), "OWNER_ADDRESS");
        assert_eq!(var_of(&[("GENESIS_TIME", "-5")]), "GENESIS_TIME");
        assert_eq!(var_of(&[("INITIAL_CHALLENGE", "zz")]), "INITIAL_CHALLENGE");
        assert_eq!(var_of(&[("MINING_TARGET", "lots")]), "MINING_TARGET");
        assert_eq!(
            var_of(&[("CONTRACT_ADDRESS", "0x0000000000000000000000000000000000000000")]),
            "CONTRACT_ADDRESS"
        );
        assert_eq!(
            var_of(&[("OWNER_ADDRESS", "0x00000000000000000000000000000000000000ff")]),
            "OWNER_ADDRESS"
        );
    }

    #[test]
    fn derived_challenge_depends_on_inputs() {
        let a = derive_challenge(&Address::from_low_u8(1), 1);
        assert_ne!(a, derive_challenge(&Address::from_low_u8(2), 1));
        assert_ne!(a, derive_challenge(&Address::from_low_u8(1), 2));
    }
}
