use crate::{FIELD_SEPARATOR, PATH_SEPARATOR, db::query::CompileError};

///
/// FieldPath
///
/// A criterion column split into relationship hops and the sibling
/// field names at the final hop.
///
/// `address.city,street` → hops `[address]`, fields `[city, street]`.
///

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct FieldPath<'a> {
    pub(crate) hops: Vec<&'a str>,
    pub(crate) fields: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    pub(crate) fn parse(column: &'a str) -> Result<Self, CompileError> {
        let invalid = || CompileError::InvalidPath {
            path: column.to_string(),
        };

        let mut segments: Vec<&str> = column.split(PATH_SEPARATOR).map(str::trim).collect();
        let last = segments.pop().ok_or_else(invalid)?;

        let fields: Vec<&str> = last.split(FIELD_SEPARATOR).map(str::trim).collect();
        if segments.iter().chain(&fields).any(|segment| segment.is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            hops: segments,
            fields,
        })
    }
}
