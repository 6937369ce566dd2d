use crate::db::query::predicate::{
    ComparePredicate, FieldRef, LikePredicate, Predicate, Source,
};
use std::fmt;

// SQL-flavoured rendering for logs and assertions; not meant to be parsed.

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Join(id) => write!(f, "{id}"),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.source, self.name)
    }
}

impl fmt::Display for ComparePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.symbol(), self.value)
    }
}

impl fmt::Display for LikePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LOWER({}) LIKE '{}'",
            self.field,
            self.pattern.replace('\'', "''")
        )?;
        if let Some(escape) = self.escape {
            write!(f, " ESCAPE '{escape}'")?;
        }

        Ok(())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(preds) => write_group(f, preds, "AND", "TRUE"),
            Self::Or(preds) => write_group(f, preds, "OR", "FALSE"),
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::Compare(cmp) => write!(f, "{cmp}"),
            Self::Like(like) => write!(f, "{like}"),
            Self::IsNull { field } => write!(f, "{field} IS NULL"),
            Self::IsNotNull { field } => write!(f, "{field} IS NOT NULL"),
            Self::IsTrue { field } => write!(f, "{field} IS TRUE"),
        }
    }
}

fn write_group(
    f: &mut fmt::Formatter<'_>,
    preds: &[Predicate],
    joiner: &str,
    empty: &str,
) -> fmt::Result {
    match preds {
        [] => f.write_str(empty),
        [single] => write!(f, "{single}"),
        _ => {
            f.write_str("(")?;
            for (index, pred) in preds.iter().enumerate() {
                if index > 0 {
                    write!(f, " {joiner} ")?;
                }
                write!(f, "{pred}")?;
            }
            f.write_str(")")
        }
    }
}
