use crate::{
    db::query::{
        CompileError,
        predicate::{FieldRef, Join, JoinId, Source},
    },
    model::entity::EntityModel,
};

///
/// QueryContext
///
/// Field resolution capability handed to the compiler for one query.
/// The compiler never sees entity types; it only resolves names through this.
///

pub trait QueryContext {
    /// Root entity of the query.
    fn model(&self) -> &'static EntityModel;

    /// Resolve a column on a source to a typed handle.
    fn get(&self, source: Source, field: &str) -> Result<FieldRef, CompileError>;

    /// Left-outer-join a relationship off a source; returns the joined source.
    fn join(&mut self, source: Source, relation: &str) -> Result<Source, CompileError>;
}

///
/// QueryRoot
///
/// Request-scoped `QueryContext` over a static entity model.
/// Every `join` call opens a new join; joins are handed to the
/// specification when compilation finishes.
///

#[derive(Debug)]
pub struct QueryRoot {
    model: &'static EntityModel,
    joins: Vec<Join>,
}

impl QueryRoot {
    #[must_use]
    pub const fn new(model: &'static EntityModel) -> Self {
        Self {
            model,
            joins: Vec::new(),
        }
    }

    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    #[must_use]
    pub fn into_joins(self) -> Vec<Join> {
        self.joins
    }

    fn entity_of(&self, source: Source) -> &'static EntityModel {
        match source {
            Source::Root => self.model,
            Source::Join(id) => self
                .joins
                .get(id.index())
                .map_or(self.model, Join::entity),
        }
    }
}

impl QueryContext for QueryRoot {
    fn model(&self) -> &'static EntityModel {
        self.model
    }

    fn get(&self, source: Source, field: &str) -> Result<FieldRef, CompileError> {
        let entity = self.entity_of(source);
        let model = entity
            .field(field)
            .ok_or_else(|| CompileError::UnknownField {
                entity: entity.entity_name,
                field: field.to_string(),
            })?;

        Ok(FieldRef {
            source,
            name: model.name,
            kind: model.kind,
        })
    }

    fn join(&mut self, source: Source, relation: &str) -> Result<Source, CompileError> {
        let entity = self.entity_of(source);
        let relation = entity
            .relation(relation)
            .ok_or_else(|| CompileError::UnknownRelation {
                entity: entity.entity_name,
                relation: relation.to_string(),
            })?;

        let id = JoinId(self.joins.len());
        self.joins.push(Join {
            id,
            parent: source,
            relation,
        });

        Ok(Source::Join(id))
    }
}
