//! Row evaluation of bound predicates with SQL three-valued logic.
//!
//! A root row matches when at least one assignment of its joined rows makes
//! the predicate TRUE. Joins are left-outer: an empty relationship yields a
//! single all-NULL joined row. Assignments are searched per join and a
//! branch is dropped once the predicate can no longer become TRUE.

use crate::{
    db::query::predicate::{CompareOp, ComparePredicate, FieldRef, Join, Predicate, Source},
    db::store::like::like_matches,
    traits::EntityValue,
    value::{Value, strict_ordering},
};
use std::{cmp::Ordering, collections::BTreeSet};

///
/// Truth
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    const ALL: [Self; 3] = [Self::True, Self::False, Self::Unknown];

    const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    const fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::True => 0b001,
            Self::False => 0b010,
            Self::Unknown => 0b100,
        }
    }
}

///
/// Outcomes
/// Truth values a predicate can still take while some joins are unassigned.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Outcomes(u8);

impl Outcomes {
    const NONE: Self = Self(0);
    const ANY: Self = Self(0b111);

    const fn exact(truth: Truth) -> Self {
        Self(truth.bit())
    }

    const fn with(self, truth: Truth) -> Self {
        Self(self.0 | truth.bit())
    }

    const fn contains(self, truth: Truth) -> bool {
        self.0 & truth.bit() != 0
    }

    const fn can_be_true(self) -> bool {
        self.contains(Truth::True)
    }

    const fn is_certainly_true(self) -> bool {
        self.0 == Truth::True.bit()
    }

    fn members(self) -> impl Iterator<Item = Truth> {
        Truth::ALL
            .into_iter()
            .filter(move |truth| self.contains(*truth))
    }

    fn map(self, f: impl Fn(Truth) -> Truth) -> Self {
        self.members().fold(Self::NONE, |acc, truth| acc.with(f(truth)))
    }

    fn combine(self, other: Self, f: impl Fn(Truth, Truth) -> Truth) -> Self {
        self.members().fold(Self::NONE, |acc, left| {
            other
                .members()
                .fold(acc, |acc, right| acc.with(f(left, right)))
        })
    }
}

///
/// Slot
/// Assignment state of one join while a root row is evaluated.
///

#[derive(Clone, Copy)]
enum Slot<'a> {
    Pending,
    Empty,
    Row(&'a dyn EntityValue),
}

///
/// Row
/// The root row plus one slot per join.
///

struct Row<'a> {
    root: &'a dyn EntityValue,
    joined: Vec<Slot<'a>>,
}

impl<'a> Row<'a> {
    fn source(&self, source: Source) -> Option<&'a dyn EntityValue> {
        match source {
            Source::Root => Some(self.root),
            Source::Join(id) => match self.joined.get(id.index()) {
                Some(Slot::Row(row)) => Some(*row),
                _ => None,
            },
        }
    }

    fn is_pending(&self, field: &FieldRef) -> bool {
        match field.source {
            Source::Root => false,
            Source::Join(id) => matches!(self.joined.get(id.index()), Some(Slot::Pending)),
        }
    }

    fn value(&self, field: &FieldRef) -> Value {
        self.source(field.source)
            .and_then(|row| row.get_value(field.name))
            .unwrap_or(Value::Null)
    }
}

///
/// Matcher
///
/// Evaluation plan for one bound predicate, built once per scan.
///
/// OR branches are searched one at a time, and AND operands that share no
/// join are searched independently, so unrelated to-many joins never
/// multiply into one another.
///

pub(crate) struct Matcher<'p> {
    joins: &'p [Join],
    plan: Plan<'p>,
}

impl<'p> Matcher<'p> {
    pub(crate) fn new(predicate: &'p Predicate, joins: &'p [Join]) -> Self {
        Self {
            joins,
            plan: Plan::build(predicate, joins),
        }
    }

    /// Whether the root row satisfies the predicate under some join assignment.
    pub(crate) fn matches(&self, root: &dyn EntityValue) -> bool {
        let mut row = Row {
            root,
            joined: vec![Slot::Pending; self.joins.len()],
        };

        self.plan.matches(self.joins, &mut row)
    }
}

///
/// Plan
///

enum Plan<'p> {
    All(Vec<Self>),
    Any(Vec<Self>),
    Exists {
        preds: Vec<&'p Predicate>,
        joins: Vec<usize>,
    },
}

impl<'p> Plan<'p> {
    fn build(predicate: &'p Predicate, joins: &[Join]) -> Self {
        match predicate {
            Predicate::Or(preds) => {
                Self::Any(preds.iter().map(|pred| Self::build(pred, joins)).collect())
            }
            Predicate::And(preds) => Self::All(
                separable_groups(preds, joins)
                    .into_iter()
                    .map(|(members, used)| match members.as_slice() {
                        [single] => Self::build(*single, joins),
                        _ => Self::Exists {
                            preds: members,
                            joins: used.into_iter().collect(),
                        },
                    })
                    .collect(),
            ),
            _ => Self::Exists {
                preds: vec![predicate],
                joins: referenced_joins(predicate, joins).into_iter().collect(),
            },
        }
    }

    fn matches(&self, joins: &[Join], row: &mut Row<'_>) -> bool {
        match self {
            Self::All(plans) => plans.iter().all(|plan| plan.matches(joins, row)),
            Self::Any(plans) => plans.iter().any(|plan| plan.matches(joins, row)),
            Self::Exists { preds, joins: order } => exists(preds, order, joins, row),
        }
    }
}

// Split conjuncts into groups whose join sets are pairwise disjoint.
fn separable_groups<'p>(
    preds: &'p [Predicate],
    joins: &[Join],
) -> Vec<(Vec<&'p Predicate>, BTreeSet<usize>)> {
    let mut groups: Vec<(Vec<&'p Predicate>, BTreeSet<usize>)> = Vec::new();

    for pred in preds {
        let mut members = vec![pred];
        let mut used = referenced_joins(pred, joins);

        let mut index = 0;
        while index < groups.len() {
            if groups[index].1.is_disjoint(&used) {
                index += 1;
            } else {
                let (other_members, other_used) = groups.swap_remove(index);
                members.extend(other_members);
                used.extend(other_used);
            }
        }

        groups.push((members, used));
    }

    groups
}

// Joins a predicate reads, including every parent join they chain off.
fn referenced_joins(predicate: &Predicate, joins: &[Join]) -> BTreeSet<usize> {
    let mut used = BTreeSet::new();

    predicate.for_each_field(&mut |field| {
        let mut source = field.source;
        while let Source::Join(id) = source {
            if !used.insert(id.index()) {
                break;
            }
            source = joins.get(id.index()).map_or(Source::Root, |join| join.parent);
        }
    });

    used
}

// Depth-first search over the listed joins (parents first), abandoning a
// branch as soon as the conjunction can no longer become TRUE.
fn exists(preds: &[&Predicate], order: &[usize], joins: &[Join], row: &mut Row<'_>) -> bool {
    let reachable = preds.iter().fold(Outcomes::exact(Truth::True), |acc, pred| {
        acc.combine(outcomes(pred, row), Truth::and)
    });
    if reachable.is_certainly_true() {
        return true;
    }
    if !reachable.can_be_true() {
        return false;
    }

    let Some((&index, rest)) = order.split_first() else {
        return false;
    };
    let Some(join) = joins.get(index) else {
        return false;
    };

    let related = row
        .source(join.parent)
        .map_or_else(Vec::new, |parent| parent.related(join.relation.name));

    let hit = if related.is_empty() {
        row.joined[index] = Slot::Empty;
        exists(preds, rest, joins, row)
    } else {
        related.into_iter().any(|candidate| {
            row.joined[index] = Slot::Row(candidate);
            exists(preds, rest, joins, row)
        })
    };
    row.joined[index] = Slot::Pending;

    hit
}

fn outcomes(predicate: &Predicate, row: &Row<'_>) -> Outcomes {
    match predicate {
        Predicate::And(preds) => preds.iter().fold(Outcomes::exact(Truth::True), |acc, pred| {
            acc.combine(outcomes(pred, row), Truth::and)
        }),
        Predicate::Or(preds) => preds.iter().fold(Outcomes::exact(Truth::False), |acc, pred| {
            acc.combine(outcomes(pred, row), Truth::or)
        }),
        Predicate::Not(inner) => outcomes(inner, row).map(Truth::not),
        leaf => {
            let mut pending = false;
            leaf.for_each_field(&mut |field| pending |= row.is_pending(field));

            if pending {
                Outcomes::ANY
            } else {
                Outcomes::exact(evaluate(leaf, row))
            }
        }
    }
}

fn evaluate(predicate: &Predicate, row: &Row<'_>) -> Truth {
    match predicate {
        Predicate::True => Truth::True,
        Predicate::False => Truth::False,
        Predicate::And(preds) => {
            let mut acc = Truth::True;
            for pred in preds {
                match evaluate(pred, row) {
                    Truth::False => return Truth::False,
                    Truth::Unknown => acc = Truth::Unknown,
                    Truth::True => {}
                }
            }
            acc
        }
        Predicate::Or(preds) => {
            let mut acc = Truth::False;
            for pred in preds {
                match evaluate(pred, row) {
                    Truth::True => return Truth::True,
                    Truth::Unknown => acc = Truth::Unknown,
                    Truth::False => {}
                }
            }
            acc
        }
        Predicate::Not(inner) => evaluate(inner, row).not(),
        Predicate::Compare(cmp) => evaluate_compare(cmp, row),
        Predicate::Like(like) => match row.value(&like.field).render_text() {
            Some(text) => Truth::from_bool(like_matches(
                &text.to_lowercase(),
                &like.pattern,
                like.escape,
            )),
            None => Truth::Unknown,
        },
        Predicate::IsNull { field } => Truth::from_bool(row.value(field).is_null()),
        Predicate::IsNotNull { field } => Truth::from_bool(!row.value(field).is_null()),
        Predicate::IsTrue { field } => match row.value(field) {
            Value::Bool(value) => Truth::from_bool(value),
            Value::Null => Truth::Unknown,
            _ => Truth::False,
        },
    }
}

fn evaluate_compare(cmp: &ComparePredicate, row: &Row<'_>) -> Truth {
    let actual = row.value(&cmp.field);
    if actual.is_null() || cmp.value.is_null() {
        return Truth::Unknown;
    }

    if cmp.op == CompareOp::In {
        let Value::List(items) = &cmp.value else {
            return Truth::Unknown;
        };
        let found = items
            .iter()
            .any(|item| strict_ordering(&actual, item) == Some(Ordering::Equal));

        return Truth::from_bool(found);
    }

    let Some(ordering) = strict_ordering(&actual, &cmp.value) else {
        return Truth::Unknown;
    };

    Truth::from_bool(match cmp.op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
        CompareOp::In => false,
    })
}
