use crate::model::{field::FieldModel, relation::RelationModel};

///
/// EntityModel
/// Runtime model for one entity: its scalar fields and its relationships.
///

#[derive(Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name used in error messages.
    pub entity_name: &'static str,
    /// Primary key field name (points at an entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered scalar field list.
    pub fields: &'static [FieldModel],
    /// Relationships that criteria may join through.
    pub relations: &'static [RelationModel],
}

impl EntityModel {
    /// Look up a scalar field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look up a relationship by name.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&'static RelationModel> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::{ADDRESS_MODEL, AUTHOR_MODEL};

    #[test]
    fn fields_and_relations_resolve_by_name() {
        assert!(AUTHOR_MODEL.has_field("age"));
        assert!(!AUTHOR_MODEL.has_field("address"));

        let relation = AUTHOR_MODEL
            .relation("address")
            .expect("author has an address relation");
        assert_eq!(relation.target, &ADDRESS_MODEL);
        assert!(AUTHOR_MODEL.relation("city").is_none());
    }
}
