mod ast;
mod render;

pub use ast::{
    CompareOp, ComparePredicate, FieldRef, Join, JoinId, LikePredicate, Predicate, Source,
};
