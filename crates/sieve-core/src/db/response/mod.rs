use serde::Serialize;

///
/// Page
/// One page of query results plus the total count across all pages.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<E> Page<E> {
    #[must_use]
    pub const fn new(items: Vec<E>, total: u64, page: u32, size: u32) -> Self {
        Self {
            items,
            total,
            page,
            size,
        }
    }

    //
    // Metadata
    //

    /// Number of pages needed for `total` rows; zero when there are no rows.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }

        self.total.div_ceil(u64::from(self.size))
    }

    #[must_use]
    pub const fn number_of_elements(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page).saturating_add(1) < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    //
    // Items
    //

    /// Convert every item, keeping the page metadata.
    #[must_use]
    pub fn map<V>(self, f: impl FnMut(E) -> V) -> Page<V> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<E> {
        self.items
    }
}
