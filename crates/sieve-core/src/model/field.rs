use std::fmt;

///
/// FieldModel
/// Runtime field metadata used by the compiler and the storage layer.
///

#[derive(Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as used in criterion columns and sort directives.
    pub name: &'static str,
    /// Native column type.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// FieldKind
///
/// Closed set of native column types a model can declare.
/// Coercion and storage binding both dispatch on this with exhaustive matches.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Enum(&'static EnumModel),
    Float,
    Int,
    Text,
    Timestamp,
    Uuid,
}

impl FieldKind {
    /// How raw criterion values are coerced before they reach storage.
    #[must_use]
    pub const fn coercion(self) -> CoercionKind {
        match self {
            Self::Timestamp => CoercionKind::Date,
            Self::Uuid => CoercionKind::Identifier,
            Self::Enum(_) => CoercionKind::Enum,
            Self::Bool | Self::Float | Self::Int | Self::Text => CoercionKind::Passthrough,
        }
    }

    /// Whether ordering comparisons are defined for this column type.
    #[must_use]
    pub const fn is_orderable(self) -> bool {
        !matches!(self, Self::Bool)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Enum(_) => "enum",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(model) => write!(f, "enum {}", model.name),
            other => f.write_str(other.label()),
        }
    }
}

///
/// CoercionKind
///
/// Coercion family of a field kind: date, identifier, enum, or passthrough.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoercionKind {
    Date,
    Identifier,
    Enum,
    Passthrough,
}

///
/// EnumModel
/// Enumeration metadata: variant names in ordinal order.
///

#[derive(Debug, Eq, PartialEq)]
pub struct EnumModel {
    pub name: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumModel {
    /// Ordinal of the variant with this exact symbolic name.
    #[must_use]
    pub fn ordinal_of(&self, name: &str) -> Option<u32> {
        self.variants
            .iter()
            .position(|variant| *variant == name)
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Symbolic name of the variant at this ordinal.
    #[must_use]
    pub fn variant_at(&self, ordinal: u32) -> Option<&'static str> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| self.variants.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::ACTIVITY_STATUS;

    #[test]
    fn coercion_kind_follows_field_kind() {
        assert_eq!(FieldKind::Timestamp.coercion(), CoercionKind::Date);
        assert_eq!(FieldKind::Uuid.coercion(), CoercionKind::Identifier);
        assert_eq!(
            FieldKind::Enum(&ACTIVITY_STATUS).coercion(),
            CoercionKind::Enum
        );
        assert_eq!(FieldKind::Int.coercion(), CoercionKind::Passthrough);
        assert_eq!(FieldKind::Text.coercion(), CoercionKind::Passthrough);
    }

    #[test]
    fn enum_model_lookups_are_symmetric() {
        let ordinal = ACTIVITY_STATUS.ordinal_of("INACTIVE").expect("variant");
        assert_eq!(ACTIVITY_STATUS.variant_at(ordinal), Some("INACTIVE"));
        assert_eq!(ACTIVITY_STATUS.ordinal_of("inactive"), None);
        assert_eq!(ACTIVITY_STATUS.variant_at(99), None);
    }
}
