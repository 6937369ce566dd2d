use crate::{
    model::{entity::EntityModel, field::FieldKind, relation::RelationModel},
    value::Value,
};
use derive_more::Display;
use std::ops::{BitAnd, BitOr};

///
/// JoinId
/// Position of a join in its specification's join list.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("j{_0}")]
pub struct JoinId(pub(crate) usize);

impl JoinId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// Source
/// Where a field reference reads from: the root row or a joined row.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    Root,
    Join(JoinId),
}

///
/// Join
///
/// One left-outer join hop. Nested joins chain off their parent join,
/// so `parent` always names the root or an earlier join.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Join {
    pub id: JoinId,
    pub parent: Source,
    pub relation: &'static RelationModel,
}

impl Join {
    /// Entity on the far side of this join.
    #[must_use]
    pub const fn entity(&self) -> &'static EntityModel {
        self.relation.target
    }
}

///
/// FieldRef
/// A resolved, typed handle to one column on one source.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldRef {
    pub source: Source,
    pub name: &'static str,
    pub kind: FieldKind,
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
}

impl CompareOp {
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
        }
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub field: FieldRef,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(field: FieldRef, op: CompareOp, value: Value) -> Self {
        Self { field, op, value }
    }
}

///
/// LikePredicate
///
/// Case-insensitive LIKE: the column is read as text and lower-cased
/// before it is matched against `pattern`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LikePredicate {
    pub field: FieldRef,
    pub pattern: String,
    pub escape: Option<char>,
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    Like(LikePredicate),
    IsNull { field: FieldRef },
    IsNotNull { field: FieldRef },
    IsTrue { field: FieldRef },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub const fn compare(field: FieldRef, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value))
    }

    #[must_use]
    pub fn like(field: FieldRef, pattern: impl Into<String>, escape: Option<char>) -> Self {
        Self::Like(LikePredicate {
            field,
            pattern: pattern.into(),
            escape,
        })
    }

    /// Visit every field reference in the tree.
    pub fn for_each_field(&self, f: &mut impl FnMut(&FieldRef)) {
        match self {
            Self::True | Self::False => {}
            Self::And(preds) | Self::Or(preds) => {
                for pred in preds {
                    pred.for_each_field(f);
                }
            }
            Self::Not(inner) => inner.for_each_field(f),
            Self::Compare(cmp) => f(&cmp.field),
            Self::Like(like) => f(&like.field),
            Self::IsNull { field } | Self::IsNotNull { field } | Self::IsTrue { field } => f(field),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}
