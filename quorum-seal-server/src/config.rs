use quorum_seal::{
    constants::{
        DEFAULT_KEY_BITS, DEFAULT_MODULUS, DEFAULT_PUBLIC_EXPONENT, FORMAT_VERSION,
        KEY_FRAMING_BYTES,
    },
    sharing::PrimeField,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::Level;

use crate::{
    constants::{MAX_KEY_BITS, MIN_KEY_BITS, MIN_PUBLIC_EXPONENT},
    QuorumSealServerError,
};

/// Service configuration with all fields ready to use
#[derive(Debug, Clone)]
pub struct Config {
    /// RSA modulus size for new secrets.
    pub key_bits: usize,
    pub public_exponent: u64,
    /// Written into every configuration and share file.
    pub format_version: u32,
    /// Field all secrets are shared over.
    pub field: PrimeField,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, QuorumSealServerError> {
        let config_string = std::fs::read_to_string(&config_path).map_err(|e| {
            QuorumSealServerError::FileIo(e, config_path.as_ref().to_path_buf())
        })?;
        let config_file = ConfigFile::from_str(&config_string)?;
        Self::from_config_file(config_file)
    }

    pub fn from_config_file(config: ConfigFile) -> Result<Self, QuorumSealServerError> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&config.key_bits) || config.key_bits % 8 != 0 {
            return Err(QuorumSealServerError::InvalidConfig(format!(
                "key_bits must be a multiple of 8 between {MIN_KEY_BITS} and {MAX_KEY_BITS}"
            )));
        }
        if config.public_exponent < MIN_PUBLIC_EXPONENT || config.public_exponent % 2 == 0 {
            return Err(QuorumSealServerError::InvalidConfig(format!(
                "public_exponent must be odd and at least {MIN_PUBLIC_EXPONENT}"
            )));
        }
        if config.format_version != FORMAT_VERSION {
            return Err(QuorumSealServerError::InvalidConfig(format!(
                "format_version {} is not supported",
                config.format_version
            )));
        }

        let modulus = config.modulus.as_deref().unwrap_or(DEFAULT_MODULUS);
        let field = PrimeField::from_decimal(modulus)
            .map_err(|e| QuorumSealServerError::InvalidConfig(e.to_string()))?;

        // An encoded private key has at most `key_bits / 8 + KEY_FRAMING_BYTES`
        // bytes and must be a field element.
        let encoded_bits = (config.key_bits / 8 + KEY_FRAMING_BYTES) * 8;
        if field.modulus().bits() <= encoded_bits {
            return Err(QuorumSealServerError::InvalidConfig(format!(
                "modulus must be larger than 2^{encoded_bits} for {}-bit keys",
                config.key_bits
            )));
        }

        Ok(Self {
            key_bits: config.key_bits,
            public_exponent: config.public_exponent,
            format_version: config.format_version,
            field,
            logging: config.logging,
        })
    }
}

/// Service configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct ConfigFile {
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,
    #[serde(default = "default_public_exponent")]
    pub public_exponent: u64,
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Decimal prime. The built-in modulus is used if this is not set.
    pub modulus: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_key_bits() -> usize {
    DEFAULT_KEY_BITS
}

fn default_public_exponent() -> u64 {
    DEFAULT_PUBLIC_EXPONENT
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl FromStr for ConfigFile {
    type Err = QuorumSealServerError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub stdout_log_level: Level,
    pub log_files: Option<LoggingFileConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stdout_log_level: Level::INFO,
            log_files: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct LoggingFileConfig {
    pub quorum_seal_logs_file_name: PathBuf,
    pub all_logs_file_name: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_str() {
        let config_str = r#"
            key_bits = 2048
            public_exponent = 65537
            format_version = 1
            modulus = "170141183460469231731687303715884105727"

            [logging]
            stdout_log_level = "DEBUG"

            [logging.log_files]
            quorum_seal_logs_file_name = "./dev/logs/server.log"
            all_logs_file_name = "./dev/logs/all.log"
        "#;

        // Destructure so the test breaks when fields are added
        let ConfigFile {
            key_bits,
            public_exponent,
            format_version,
            modulus,
            logging,
        } = ConfigFile::from_str(config_str).unwrap();

        assert_eq!(key_bits, 2048);
        assert_eq!(public_exponent, 65537);
        assert_eq!(format_version, 1);
        assert_eq!(
            modulus.as_deref(),
            Some("170141183460469231731687303715884105727")
        );
        let expected_log = LoggingConfig {
            stdout_log_level: Level::DEBUG,
            log_files: Some(LoggingFileConfig {
                quorum_seal_logs_file_name: "./dev/logs/server.log".parse().unwrap(),
                all_logs_file_name: "./dev/logs/all.log".parse().unwrap(),
            }),
        };
        assert_eq!(logging, expected_log);
    }

    #[test]
    fn defaults_use_built_in_modulus() {
        let config = Config::from_config_file(ConfigFile::from_str("").unwrap()).unwrap();
        assert_eq!(config.key_bits, DEFAULT_KEY_BITS);
        assert_eq!(config.public_exponent, DEFAULT_PUBLIC_EXPONENT);
        assert_eq!(config.format_version, FORMAT_VERSION);
        assert_eq!(config.field.modulus().bits(), 4224);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ConfigFile::from_str("port = 1113").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        for config_str in [
            "key_bits = 512",
            "key_bits = 8192",
            "key_bits = 2047",
            "public_exponent = 3",
            "public_exponent = 65535",
            "public_exponent = 65536",
            "public_exponent = 65538",
            "format_version = 2",
            r#"modulus = "170141183460469231731687303715884105725""#,
            // Prime, but too small for 1024-bit keys.
            r#"
                key_bits = 1024
                modulus = "170141183460469231731687303715884105727"
            "#,
        ] {
            let config_file = ConfigFile::from_str(config_str).unwrap();
            assert!(
                matches!(
                    Config::from_config_file(config_file),
                    Err(QuorumSealServerError::InvalidConfig(_))
                ),
                "{config_str}"
            );
        }
    }
}
