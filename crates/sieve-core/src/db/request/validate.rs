use crate::db::request::{Criterion, FilterRequest};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ValidateError
/// Shape errors rejected before any compilation happens.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("{group} criterion #{index} has a blank column")]
    BlankColumn { group: CriteriaGroup, index: usize },

    #[error("sort directive #{index} has a blank column")]
    BlankSortColumn { index: usize },
}

///
/// CriteriaGroup
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CriteriaGroup {
    And,
    Or,
}

impl fmt::Display for CriteriaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("criteria"),
            Self::Or => f.write_str("orCriteria"),
        }
    }
}

impl FilterRequest {
    /// Reject blank columns in either criteria group or the sort list.
    ///
    /// Field existence is not checked here; that needs the entity model.
    pub fn validate(&self) -> Result<(), ValidateError> {
        validate_group(&self.criteria, CriteriaGroup::And)?;
        validate_group(&self.or_criteria, CriteriaGroup::Or)?;

        if let Some(index) = self
            .sort
            .iter()
            .position(|sort| sort.column.trim().is_empty())
        {
            return Err(ValidateError::BlankSortColumn { index });
        }

        Ok(())
    }
}

fn validate_group(criteria: &[Criterion], group: CriteriaGroup) -> Result<(), ValidateError> {
    match criteria
        .iter()
        .position(|criterion| criterion.column.trim().is_empty())
    {
        Some(index) => Err(ValidateError::BlankColumn { group, index }),
        None => Ok(()),
    }
}
