use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// UnsupportedOperator
/// A wire token that names no operator.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unsupported operator token '{token}'")]
pub struct UnsupportedOperator {
    pub token: String,
}

///
/// Operator
///
/// Closed set of criterion operators. Each maps 1:1 to a wire token.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Contain,
    ContainWithWildcard,
    NotContain,
    NotContainWithWildcard,
    Equals,
    NotEqual,
    In,
    NotIn,
    GreaterThan,
    LesserThan,
    GreaterEquals,
    LesserEquals,
    True,
    False,
    Null,
    NotNull,
}

impl Operator {
    pub const ALL: [Self; 16] = [
        Self::Contain,
        Self::ContainWithWildcard,
        Self::NotContain,
        Self::NotContainWithWildcard,
        Self::Equals,
        Self::NotEqual,
        Self::In,
        Self::NotIn,
        Self::GreaterThan,
        Self::LesserThan,
        Self::GreaterEquals,
        Self::LesserEquals,
        Self::True,
        Self::False,
        Self::Null,
        Self::NotNull,
    ];

    /// Wire token for this operator.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Contain => "like",
            Self::ContainWithWildcard => "like_with_wildcard",
            Self::NotContain => "!like",
            Self::NotContainWithWildcard => "!like_with_wildcard",
            Self::Equals => "=",
            Self::NotEqual => "!=",
            Self::In => "in",
            Self::NotIn => "!in",
            Self::GreaterThan => ">",
            Self::LesserThan => "<",
            Self::GreaterEquals => ">=",
            Self::LesserEquals => "<=",
            Self::True => "is_true",
            Self::False => "is_false",
            Self::Null => "is_null",
            Self::NotNull => "!is_null",
        }
    }

    /// Reverse token lookup; unknown tokens are an error, never a default.
    pub fn from_token(token: &str) -> Result<Self, UnsupportedOperator> {
        Self::ALL
            .into_iter()
            .find(|operator| operator.token() == token)
            .ok_or_else(|| UnsupportedOperator {
                token: token.to_string(),
            })
    }

    /// Whether the operator needs at least one value.
    #[must_use]
    pub const fn requires_values(self) -> bool {
        !matches!(self, Self::True | Self::False | Self::Null | Self::NotNull)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operator {
    type Err = UnsupportedOperator;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::from_token(token)
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;

        Self::from_token(&token).map_err(de::Error::custom)
    }
}
