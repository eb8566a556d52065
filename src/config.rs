// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Settings are loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APP_NAME` | Service name shown in API docs | `Relational Ledger` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `ENVIRONMENT` | `development` or `production` | `development` |
//! | `DEBUG` | Verbose logging (always on in development) | `false` |
//! | `DATA_DIR` | Directory holding `ledger.redb` | `./data` |
//! | `NUMBER_PRECISION` | Total significant digits of an amount | `18` |
//! | `NUMBER_SCALE` | Fractional digits of an amount | `6` |
//! | `MIN_TRANSACTION_SIZE` | Smallest accepted amount | `0.000001` |
//! | `MAX_TRANSACTION_SIZE` | Largest accepted amount | `2997` |
//! | `TRANSACTION_FEE` | Fee recorded with each transaction | `0` |
//! | `SIGNATURE_MIN_HEX_LEN` | Shortest accepted signature hex | `16` |
//! | `SIGNATURE_MAX_HEX_LEN` | Longest accepted signature hex (P-384 DER) | `208` |
//! | `PUBLIC_KEY_MAX_LEN` | Longest accepted PEM public key | `1024` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `relational_ledger=info,tower_http=info` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::logging::LogFormat;

pub const APP_NAME_ENV: &str = "APP_NAME";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";
pub const DEBUG_ENV: &str = "DEBUG";

/// Environment variable name for the database directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const NUMBER_PRECISION_ENV: &str = "NUMBER_PRECISION";
pub const NUMBER_SCALE_ENV: &str = "NUMBER_SCALE";
pub const MIN_TRANSACTION_SIZE_ENV: &str = "MIN_TRANSACTION_SIZE";
pub const MAX_TRANSACTION_SIZE_ENV: &str = "MAX_TRANSACTION_SIZE";
pub const TRANSACTION_FEE_ENV: &str = "TRANSACTION_FEE";
pub const SIGNATURE_MIN_HEX_LEN_ENV: &str = "SIGNATURE_MIN_HEX_LEN";
pub const SIGNATURE_MAX_HEX_LEN_ENV: &str = "SIGNATURE_MAX_HEX_LEN";
pub const PUBLIC_KEY_MAX_LEN_ENV: &str = "PUBLIC_KEY_MAX_LEN";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// File name of the embedded database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "ledger.redb";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("inconsistent settings: {0}")]
    Inconsistent(String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(format!("expected development or production, got {other}")),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub debug: bool,
    pub data_dir: PathBuf,
    pub number_precision: u32,
    pub number_scale: u32,
    pub min_transaction_size: Decimal,
    pub max_transaction_size: Decimal,
    pub transaction_fee: Decimal,
    pub signature_min_hex_len: usize,
    pub signature_max_hex_len: usize,
    pub public_key_max_len: usize,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "Relational Ledger".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            debug: true,
            data_dir: PathBuf::from("./data"),
            number_precision: 18,
            number_scale: 6,
            min_transaction_size: Decimal::new(1, 6),
            max_transaction_size: Decimal::new(2997, 0),
            transaction_fee: Decimal::ZERO,
            signature_min_hex_len: 16,
            signature_max_hex_len: 208,
            public_key_max_len: 1024,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &'static str| lookup(name).map(|v| v.trim().to_string());

        let environment = parse_or(get(ENVIRONMENT_ENV), ENVIRONMENT_ENV, defaults.environment)?;
        let debug = match get(DEBUG_ENV) {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                name: DEBUG_ENV,
                value,
                reason: "expected true or false".to_string(),
            })?,
            None => false,
        };

        let settings = Self {
            name: get(APP_NAME_ENV).unwrap_or(defaults.name),
            host: get(HOST_ENV).unwrap_or(defaults.host),
            port: parse_or(get(PORT_ENV), PORT_ENV, defaults.port)?,
            environment,
            debug: debug || environment == Environment::Development,
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.data_dir),
            number_precision: parse_or(
                get(NUMBER_PRECISION_ENV),
                NUMBER_PRECISION_ENV,
                defaults.number_precision,
            )?,
            number_scale: parse_or(get(NUMBER_SCALE_ENV), NUMBER_SCALE_ENV, defaults.number_scale)?,
            min_transaction_size: parse_or(
                get(MIN_TRANSACTION_SIZE_ENV),
                MIN_TRANSACTION_SIZE_ENV,
                defaults.min_transaction_size,
            )?,
            max_transaction_size: parse_or(
                get(MAX_TRANSACTION_SIZE_ENV),
                MAX_TRANSACTION_SIZE_ENV,
                defaults.max_transaction_size,
            )?,
            transaction_fee: parse_or(
                get(TRANSACTION_FEE_ENV),
                TRANSACTION_FEE_ENV,
                defaults.transaction_fee,
            )?,
            signature_min_hex_len: parse_or(
                get(SIGNATURE_MIN_HEX_LEN_ENV),
                SIGNATURE_MIN_HEX_LEN_ENV,
                defaults.signature_min_hex_len,
            )?,
            signature_max_hex_len: parse_or(
                get(SIGNATURE_MAX_HEX_LEN_ENV),
                SIGNATURE_MAX_HEX_LEN_ENV,
                defaults.signature_max_hex_len,
            )?,
            public_key_max_len: parse_or(
                get(PUBLIC_KEY_MAX_LEN_ENV),
                PUBLIC_KEY_MAX_LEN_ENV,
                defaults.public_key_max_len,
            )?,
            log_format: get(LOG_FORMAT_ENV)
                .map(|v| LogFormat::from_str_lossy(&v))
                .unwrap_or(defaults.log_format),
        };

        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.number_scale > self.number_precision {
            return Err(ConfigError::Inconsistent(format!(
                "{NUMBER_SCALE_ENV} ({}) exceeds {NUMBER_PRECISION_ENV} ({})",
                self.number_scale, self.number_precision
            )));
        }
        if self.number_precision > 28 {
            return Err(ConfigError::Inconsistent(format!(
                "{NUMBER_PRECISION_ENV} must be at most 28"
            )));
        }
        if self.min_transaction_size <= Decimal::ZERO {
            return Err(ConfigError::Inconsistent(format!(
                "{MIN_TRANSACTION_SIZE_ENV} must be positive"
            )));
        }
        if self.min_transaction_size > self.max_transaction_size {
            return Err(ConfigError::Inconsistent(format!(
                "{MIN_TRANSACTION_SIZE_ENV} exceeds {MAX_TRANSACTION_SIZE_ENV}"
            )));
        }
        if self.transaction_fee < Decimal::ZERO {
            return Err(ConfigError::Inconsistent(format!(
                "{TRANSACTION_FEE_ENV} must not be negative"
            )));
        }
        if self.signature_min_hex_len > self.signature_max_hex_len {
            return Err(ConfigError::Inconsistent(format!(
                "{SIGNATURE_MIN_HEX_LEN_ENV} exceeds {SIGNATURE_MAX_HEX_LEN_ENV}"
            )));
        }
        Ok(())
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = format!("{}:{}", self.host, self.port);
        value.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            name: HOST_ENV,
            value,
            reason: e.to_string(),
        })
    }

    /// Full path of the embedded database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = load(&[]).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.number_scale, 6);
        assert_eq!(settings.min_transaction_size.to_string(), "0.000001");
        assert_eq!(settings.max_transaction_size.to_string(), "2997");
        assert_eq!(settings.database_path(), PathBuf::from("./data/ledger.redb"));
        assert!(settings.debug, "development forces debug");
    }

    #[test]
    fn production_respects_debug_flag() {
        let settings = load(&[("ENVIRONMENT", "production")]).unwrap();
        assert!(!settings.debug);

        let settings = load(&[("ENVIRONMENT", "production"), ("DEBUG", "true")]).unwrap();
        assert!(settings.debug);
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = load(&[
            ("PORT", "9000"),
            ("MAX_TRANSACTION_SIZE", "10.5"),
            ("LOG_FORMAT", "JSON"),
            ("DATA_DIR", "/var/lib/ledger"),
        ])
        .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.max_transaction_size, Decimal::new(105, 1));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/var/lib/ledger/ledger.redb")
        );
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = load(&[("PORT", "99999")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));

        let err = load(&[("ENVIRONMENT", "staging")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "ENVIRONMENT", .. }));

        let err = load(&[("DEBUG", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "DEBUG", .. }));
    }

    #[test]
    fn inconsistent_bounds_are_rejected() {
        assert!(matches!(
            load(&[("MIN_TRANSACTION_SIZE", "5000")]),
            Err(ConfigError::Inconsistent(_))
        ));
        assert!(matches!(
            load(&[("NUMBER_SCALE", "20")]),
            Err(ConfigError::Inconsistent(_))
        ));
        assert!(matches!(
            load(&[("SIGNATURE_MIN_HEX_LEN", "200")]),
            Err(ConfigError::Inconsistent(_))
        ));
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let settings = load(&[("HOST", "127.0.0.1"), ("PORT", "3000")]).unwrap();
        assert_eq!(settings.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }
}
