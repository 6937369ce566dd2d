//! Module: db::service
//! Responsibility: the per-entity service surface (CRUD pass-throughs, filter, count).
//! Does not own: query compilation or storage semantics.
//! Boundary: every filter/count call routes through `QueryExecutor`.

use crate::{
    config::FilterConfig,
    db::{
        executor::QueryExecutor,
        query::Specification,
        request::{CriteriaOperator, FilterRequest},
        response::Page,
        store::Repository,
    },
    error::Error,
    obs::sink::{ExecKind, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// EntityService
///
/// Implementors supply a repository and a config; every operation is
/// provided on top of those.
///

pub trait EntityService<E: EntityKind> {
    type Repository: Repository<E>;

    fn repository(&self) -> &Self::Repository;

    fn repository_mut(&mut self) -> &mut Self::Repository;

    fn config(&self) -> &FilterConfig;

    fn executor(&self) -> QueryExecutor<'_, E, Self::Repository> {
        QueryExecutor::new(self.repository(), self.config())
    }

    // ---------------------------------------------------------------------
    // CRUD pass-throughs
    // ---------------------------------------------------------------------

    fn create(&mut self, entity: E) -> E {
        let mut span = Span::<E>::new(ExecKind::Save);
        span.set_rows(1);

        self.repository_mut().save(entity)
    }

    fn create_all(&mut self, entities: Vec<E>) -> Vec<E> {
        let mut span = Span::<E>::new(ExecKind::Save);
        span.set_rows(entities.len() as u64);

        self.repository_mut().save_all(entities)
    }

    fn get(&self, key: &E::Key) -> Option<E> {
        self.repository().find_by_id(key)
    }

    /// Entities for every key that exists; missing keys are skipped.
    fn get_many(&self, keys: &[E::Key]) -> Vec<E> {
        self.repository().find_all_by_id(keys)
    }

    fn get_all(&self) -> Vec<E> {
        self.repository().find_all()
    }

    /// Delete by key; a missing key is a no-op.
    fn delete(&mut self, key: &E::Key) {
        let mut span = Span::<E>::new(ExecKind::Delete);
        if self.repository().exists_by_id(key) {
            span.set_rows(1);
        }

        self.repository_mut().delete_by_id(key);
    }

    fn exists_by_id(&self, key: &E::Key) -> bool {
        self.repository().exists_by_id(key)
    }

    // ---------------------------------------------------------------------
    // Filtering
    // ---------------------------------------------------------------------

    fn filter(&self, request: &FilterRequest) -> Result<Page<E>, Error> {
        self.executor().execute(request)
    }

    /// Filter by a caller-built specification; the request supplies paging and sort.
    fn filter_with(&self, spec: &Specification, request: &FilterRequest) -> Result<Page<E>, Error> {
        self.executor().execute_with(spec, request)
    }

    /// Filter and convert each row into a view type.
    fn filter_as<V>(&self, request: &FilterRequest) -> Result<Page<V>, Error>
    where
        V: From<E>,
    {
        Ok(self.filter(request)?.map(V::from))
    }

    fn filter_merged(
        &self,
        search: &FilterRequest,
        default: &FilterRequest,
        operator: CriteriaOperator,
    ) -> Result<Page<E>, Error> {
        self.executor().execute_merged(search, default, operator)
    }

    fn count(&self, request: &FilterRequest) -> Result<u64, Error> {
        self.executor().count(request)
    }

    fn count_specification(&self, spec: Option<&Specification>) -> Result<u64, Error> {
        self.executor().count_specification(spec)
    }

    fn count_merged(
        &self,
        search: &FilterRequest,
        default: &FilterRequest,
        operator: CriteriaOperator,
    ) -> Result<u64, Error> {
        self.executor().count_merged(search, default, operator)
    }
}

///
/// Service
/// Owns a repository and a config; the stock `EntityService`.
///

#[derive(Debug)]
pub struct Service<E, R>
where
    E: EntityKind,
    R: Repository<E>,
{
    repository: R,
    config: FilterConfig,
    _marker: PhantomData<E>,
}

impl<E, R> Service<E, R>
where
    E: EntityKind,
    R: Repository<E>,
{
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, FilterConfig::default())
    }

    #[must_use]
    pub const fn with_config(repository: R, config: FilterConfig) -> Self {
        Self {
            repository,
            config,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn into_repository(self) -> R {
        self.repository
    }
}

impl<E, R> EntityService<E> for Service<E, R>
where
    E: EntityKind,
    R: Repository<E>,
{
    type Repository = R;

    fn repository(&self) -> &R {
        &self.repository
    }

    fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }
}
