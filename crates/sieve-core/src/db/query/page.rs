use crate::{
    FIELD_SEPARATOR,
    config::FilterConfig,
    db::request::{FilterRequest, SortDirection},
};
use tracing::debug;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for OrderDirection {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

///
/// OrderSpec
/// Sort keys in priority order; each key is a dot-separated field path.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// PageRequest
///
/// Storage-facing paging and ordering: zero-based page index, a positive
/// page size, and the sort keys.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub order: OrderSpec,
}

impl PageRequest {
    /// Translate a request's paging and sort directives.
    ///
    /// `size <= 0` becomes the configured maximum; a directive column
    /// `a,b` expands to one key per field with the directive's direction.
    #[must_use]
    pub fn from_request(request: &FilterRequest, config: &FilterConfig) -> Self {
        let fields = request
            .sort
            .iter()
            .flat_map(|sort| {
                let direction = OrderDirection::from(sort.direction);
                sort.column
                    .split(FIELD_SEPARATOR)
                    .map(str::trim)
                    .filter(|column| !column.is_empty())
                    .map(move |column| (column.to_string(), direction))
            })
            .collect();

        let page = Self {
            page: request.page,
            size: request.normalized_size(config.max_page_size),
            order: OrderSpec { fields },
        };
        debug!(page = page.page, size = page.size, order = ?page.order.fields, "page request");

        page
    }

    /// Unsorted page with a positive size.
    #[must_use]
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            order: OrderSpec::default(),
        }
    }

    /// Rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page).saturating_mul(u64::from(self.size))
    }
}
