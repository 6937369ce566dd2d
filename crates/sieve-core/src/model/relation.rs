use crate::model::entity::EntityModel;
use std::fmt;

///
/// RelationModel
/// A navigable relationship from one entity to another.
///

pub struct RelationModel {
    /// Relationship name as used in dot-separated field paths.
    pub name: &'static str,
    /// Entity on the far side of the relationship.
    pub target: &'static EntityModel,
    pub cardinality: Cardinality,
}

// Targets compare by path so cyclic relationship graphs never recurse.
impl PartialEq for RelationModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.cardinality == other.cardinality
            && self.target.path == other.target.path
    }
}

impl Eq for RelationModel {}

impl fmt::Debug for RelationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationModel")
            .field("name", &self.name)
            .field("target", &self.target.path)
            .field("cardinality", &self.cardinality)
            .finish()
    }
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    One,
    Many,
}
