use crate::{
    db::{
        query::{PageRequest, Specification},
        response::Page,
        store::{Repository, StoreError, bind::bind, eval::Matcher, order},
    },
    traits::EntityKind,
};
use tracing::debug;

///
/// MemoryRepository
///
/// Reference storage layer over an insertion-ordered `Vec`.
/// Unsorted pages come back in insertion order.
///

#[derive(Clone, Debug)]
pub struct MemoryRepository<E: EntityKind> {
    rows: Vec<E>,
}

impl<E: EntityKind> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<E: EntityKind> MemoryRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        let mut repository = Self::new();
        for row in rows {
            repository.save(row);
        }

        repository
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, key: &E::Key) -> Option<usize> {
        self.rows.iter().position(|row| row.key() == *key)
    }

    // Rows matching the specification, in insertion order.
    fn matching(&self, spec: &Specification) -> Result<Vec<&E>, StoreError> {
        let Some(predicate) = spec.predicate() else {
            return Ok(self.rows.iter().collect());
        };
        let bound = bind(predicate)?;
        let matcher = Matcher::new(&bound, spec.joins());

        Ok(self
            .rows
            .iter()
            .filter(|row| matcher.matches(*row))
            .collect())
    }
}

impl<E: EntityKind> Repository<E> for MemoryRepository<E> {
    fn save(&mut self, entity: E) -> E {
        match self.position(&entity.key()) {
            Some(index) => self.rows[index] = entity.clone(),
            None => self.rows.push(entity.clone()),
        }

        entity
    }

    fn find_by_id(&self, key: &E::Key) -> Option<E> {
        self.position(key).map(|index| self.rows[index].clone())
    }

    fn find_all(&self) -> Vec<E> {
        self.rows.clone()
    }

    fn delete_by_id(&mut self, key: &E::Key) {
        if let Some(index) = self.position(key) {
            self.rows.remove(index);
        }
    }

    fn find_page(&self, spec: &Specification, page: &PageRequest) -> Result<Page<E>, StoreError> {
        let keys = order::resolve(E::MODEL, &page.order)?;
        let mut rows = self.matching(spec)?;
        let total = rows.len() as u64;

        order::sort_rows(&mut rows, &keys);

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size).unwrap_or(usize::MAX);
        let items: Vec<E> = rows
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();

        debug!(
            entity = E::MODEL.entity_name,
            total,
            returned = items.len(),
            "memory page"
        );

        Ok(Page::new(items, total, page.page, page.size))
    }

    fn count(&self, spec: &Specification) -> Result<u64, StoreError> {
        Ok(self.matching(spec)?.len() as u64)
    }
}
