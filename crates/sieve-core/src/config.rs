//! Query-layer configuration.
//!
//! Configuration is plain data loaded from TOML; every field has a default,
//! so an empty document yields the stock behavior.

use crate::{MAX_PAGE_SIZE, db::request::CriteriaOperator};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid filter config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("escape_char '{0}' is a LIKE wildcard")]
    WildcardEscapeChar(char),

    #[error("max_page_size must be greater than zero")]
    ZeroMaxPageSize,
}

///
/// FilterConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Page size substituted when a request asks for `size <= 0`.
    pub max_page_size: u32,

    /// Operator used when a wire request omits `criteriaOperator`.
    pub default_criteria_operator: CriteriaOperator,

    /// Escape character for CONTAIN patterns.
    pub escape_char: char,
}

impl FilterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroMaxPageSize);
        }
        if matches!(self.escape_char, '%' | '_') {
            return Err(ConfigError::WildcardEscapeChar(self.escape_char));
        }

        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            default_criteria_operator: CriteriaOperator::And,
            escape_char: '\\',
        }
    }
}
