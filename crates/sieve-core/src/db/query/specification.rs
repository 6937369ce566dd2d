use crate::{
    config::FilterConfig,
    db::{
        query::{
            CompileError, Compiler, QueryContext, QueryRoot,
            predicate::{Join, Predicate},
        },
        request::{CriteriaOperator, Criterion, FilterRequest},
    },
    model::entity::EntityModel,
};

///
/// Specification
///
/// A compiled filter: an optional predicate plus the joins it reads from.
/// `None` means unfiltered.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Specification {
    predicate: Option<Predicate>,
    joins: Vec<Join>,
}

impl Specification {
    /// A specification that filters nothing.
    #[must_use]
    pub const fn unfiltered() -> Self {
        Self {
            predicate: None,
            joins: Vec::new(),
        }
    }

    /// Compile a request's criteria groups against an entity model.
    pub fn from_request(
        model: &'static EntityModel,
        request: &FilterRequest,
        config: &FilterConfig,
    ) -> Result<Self, CompileError> {
        let mut builder = SpecificationBuilder::new(model, config);
        let predicate = builder.request_predicate(request)?;

        Ok(builder.finish(predicate))
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.predicate.is_none()
    }
}

///
/// SpecificationBuilder
///
/// Combines compiled criteria into one predicate over a single query root,
/// so every predicate it builds shares one join list.
///

#[derive(Debug)]
pub struct SpecificationBuilder {
    root: QueryRoot,
    compiler: Compiler,
    default_operator: CriteriaOperator,
}

impl SpecificationBuilder {
    #[must_use]
    pub const fn new(model: &'static EntityModel, config: &FilterConfig) -> Self {
        Self {
            root: QueryRoot::new(model),
            compiler: Compiler::new(config.escape_char),
            default_operator: config.default_criteria_operator,
        }
    }

    /// AND of every criterion; empty input is always-true.
    pub fn build_and(&mut self, criteria: &[Criterion]) -> Result<Predicate, CompileError> {
        if criteria.is_empty() {
            return Ok(Predicate::True);
        }

        Ok(Predicate::And(self.compile_all(criteria)?))
    }

    /// OR of every criterion; empty input is always-false.
    pub fn build_or(&mut self, criteria: &[Criterion]) -> Result<Predicate, CompileError> {
        if criteria.is_empty() {
            return Ok(Predicate::False);
        }

        Ok(Predicate::Or(self.compile_all(criteria)?))
    }

    /// Top-level predicate for a request, or `None` when it has no criteria.
    ///
    /// AND-group alone: combined by the criteria operator.
    /// OR-group alone: combined by OR.
    /// Both: AND-group and OR-group joined by the criteria operator.
    pub fn request_predicate(
        &mut self,
        request: &FilterRequest,
    ) -> Result<Option<Predicate>, CompileError> {
        let operator = request.criteria_operator.unwrap_or(self.default_operator);

        let predicate = match (request.criteria.is_empty(), request.or_criteria.is_empty()) {
            (true, true) => None,
            (false, true) => Some(match operator {
                CriteriaOperator::And => self.build_and(&request.criteria)?,
                CriteriaOperator::Or => self.build_or(&request.criteria)?,
            }),
            (true, false) => Some(self.build_or(&request.or_criteria)?),
            (false, false) => {
                let and_group = self.build_and(&request.criteria)?;
                let or_group = self.build_or(&request.or_criteria)?;

                Some(combine(and_group, or_group, operator))
            }
        };

        Ok(predicate)
    }

    /// Combine two optional predicates; a missing side yields the other.
    #[must_use]
    pub fn merge(
        left: Option<Predicate>,
        right: Option<Predicate>,
        operator: CriteriaOperator,
    ) -> Option<Predicate> {
        match (left, right) {
            (Some(left), Some(right)) => Some(combine(left, right, operator)),
            (left, right) => left.or(right),
        }
    }

    /// Seal the builder into a specification carrying every join opened.
    #[must_use]
    pub fn finish(self, predicate: Option<Predicate>) -> Specification {
        Specification {
            predicate,
            joins: self.root.into_joins(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &'static EntityModel {
        self.root.model()
    }

    fn compile_all(&mut self, criteria: &[Criterion]) -> Result<Vec<Predicate>, CompileError> {
        criteria
            .iter()
            .map(|criterion| self.compiler.compile(criterion, &mut self.root))
            .collect()
    }
}

fn combine(left: Predicate, right: Predicate, operator: CriteriaOperator) -> Predicate {
    match operator {
        CriteriaOperator::And => left & right,
        CriteriaOperator::Or => left | right,
    }
}
