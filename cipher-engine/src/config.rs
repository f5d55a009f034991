//! Engine-wide settings loaded from JSON.
//!
//! Every field has a default, so `{}` and partial files are valid.

use crate::errors::CipherError;
use crate::normalizer::NormalizationPolicy;
use crate::rabin::RabinConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: NormalizationPolicy,
    pub rabin: RabinConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CipherError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.rabin.validate()?;
        log::debug!("Loaded engine config: {:?}", config);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CipherError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{CaseHandling, UnknownCharHandling, WhitespaceHandling};

    #[test]
    fn test_empty_object_is_default() -> Result<(), CipherError> {
        assert_eq!(EngineConfig::from_json_str("{}")?, EngineConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_config() -> Result<(), CipherError> {
        let config = EngineConfig::from_json_str(
            r#"{
                "policy": { "case_handling": "LOWER", "whitespace_handling": "STRIP" },
                "rabin": { "prime_bits": 64 }
            }"#,
        )?;

        assert_eq!(config.policy.case_handling, CaseHandling::Lower);
        assert_eq!(config.policy.unknown_char_handling, UnknownCharHandling::Error);
        assert_eq!(config.policy.whitespace_handling, WhitespaceHandling::Strip);
        assert_eq!(config.rabin.prime_bits, 64);
        assert_eq!(config.rabin.max_attempts, RabinConfig::default().max_attempts);
        Ok(())
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ policy: "),
            Err(CipherError::SerializationError(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"policy":{"case_handling":"TITLE"}}"#),
            Err(CipherError::SerializationError(_))
        ));
    }

    #[test]
    fn test_rejects_tiny_primes() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"rabin":{"prime_bits":8}}"#),
            Err(CipherError::KeyGenerationError(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() -> Result<(), CipherError> {
        let mut config = EngineConfig::default();
        config.policy.unknown_char_handling = UnknownCharHandling::PassThrough;
        let json = config.to_json()?;
        assert!(json.contains("PASS_THROUGH"));
        assert_eq!(EngineConfig::from_json_str(&json)?, config);
        Ok(())
    }
}
