//! Module: db::executor
//! Responsibility: run a filter request end to end against a repository.
//! Does not own: predicate construction (query) or row evaluation (store).
//! Boundary: storage type mismatches become one `IllegalArgument` error here.

use crate::{
    config::FilterConfig,
    db::{
        query::{CompileError, PageRequest, Specification, SpecificationBuilder},
        request::{CriteriaOperator, FilterRequest},
        response::Page,
        store::{Repository, StoreError},
    },
    error::Error,
    obs::sink::{self, ExecKind, MetricsEvent, PlanKind, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;
use tracing::{debug, warn};

///
/// QueryExecutor
///
/// Borrows a repository and a config for the duration of one or more calls.
/// Holds no state between calls.
///

pub struct QueryExecutor<'a, E, R>
where
    E: EntityKind,
    R: Repository<E> + ?Sized,
{
    repository: &'a R,
    config: &'a FilterConfig,
    _marker: PhantomData<E>,
}

impl<'a, E, R> QueryExecutor<'a, E, R>
where
    E: EntityKind,
    R: Repository<E> + ?Sized,
{
    #[must_use]
    pub const fn new(repository: &'a R, config: &'a FilterConfig) -> Self {
        Self {
            repository,
            config,
            _marker: PhantomData,
        }
    }

    //
    // Planning
    //

    /// Validate a request and compile its criteria.
    pub fn specification(&self, request: &FilterRequest) -> Result<Specification, Error> {
        request.validate()?;

        Specification::from_request(E::MODEL, request, self.config)
            .map_err(Self::compile_failed)
    }

    #[must_use]
    pub fn page_request(&self, request: &FilterRequest) -> PageRequest {
        PageRequest::from_request(request, self.config)
    }

    /// Specification combining a search and a default request, plus the
    /// request whose paging applies.
    ///
    /// Without search criteria the default request stands alone; with
    /// neither, the result is unfiltered and paged by the search request.
    pub fn merged_specification<'r>(
        &self,
        search: &'r FilterRequest,
        default: &'r FilterRequest,
        operator: CriteriaOperator,
    ) -> Result<(Specification, &'r FilterRequest), Error> {
        search.validate()?;
        default.validate()?;

        let mut builder = SpecificationBuilder::new(E::MODEL, self.config);
        let compiled = builder
            .request_predicate(search)
            .and_then(|search_predicate| {
                let default_predicate = builder.request_predicate(default)?;
                Ok((search_predicate, default_predicate))
            })
            .map_err(Self::compile_failed)?;

        let (predicate, paging) = match compiled {
            (Some(search_predicate), default_predicate) => (
                SpecificationBuilder::merge(Some(search_predicate), default_predicate, operator),
                search,
            ),
            (None, Some(default_predicate)) => (Some(default_predicate), default),
            (None, None) => (None, search),
        };

        Ok((builder.finish(predicate), paging))
    }

    //
    // Execution
    //

    /// Filter, sort, and page the repository by a request.
    pub fn execute(&self, request: &FilterRequest) -> Result<Page<E>, Error> {
        let spec = self.specification(request)?;

        self.find_page(&spec, &self.page_request(request))
    }

    /// Page the repository by a prebuilt specification; `request` supplies
    /// only paging and sort.
    pub fn execute_with(
        &self,
        spec: &Specification,
        request: &FilterRequest,
    ) -> Result<Page<E>, Error> {
        request.validate()?;

        self.find_page(spec, &self.page_request(request))
    }

    /// Filter by a search request merged with a default request.
    pub fn execute_merged(
        &self,
        search: &FilterRequest,
        default: &FilterRequest,
        operator: CriteriaOperator,
    ) -> Result<Page<E>, Error> {
        let (spec, paging) = self.merged_specification(search, default, operator)?;

        self.find_page(&spec, &self.page_request(paging))
    }

    /// Number of rows matching a request's criteria; paging is ignored.
    pub fn count(&self, request: &FilterRequest) -> Result<u64, Error> {
        let spec = self.specification(request)?;

        self.count_specification(Some(&spec))
    }

    /// Number of rows matching a specification; `None` counts every row.
    pub fn count_specification(&self, spec: Option<&Specification>) -> Result<u64, Error> {
        let unfiltered = Specification::unfiltered();
        let spec = spec.unwrap_or(&unfiltered);

        let mut span = Span::<E>::new(ExecKind::Count);
        record_plan(spec);

        let total = self
            .repository
            .count(spec)
            .map_err(Self::storage_failed)?;
        span.set_rows(total);

        Ok(total)
    }

    pub fn count_merged(
        &self,
        search: &FilterRequest,
        default: &FilterRequest,
        operator: CriteriaOperator,
    ) -> Result<u64, Error> {
        let (spec, _) = self.merged_specification(search, default, operator)?;

        self.count_specification(Some(&spec))
    }

    fn find_page(&self, spec: &Specification, page: &PageRequest) -> Result<Page<E>, Error> {
        let mut span = Span::<E>::new(ExecKind::Filter);
        record_plan(spec);

        let result = self
            .repository
            .find_page(spec, page)
            .map_err(Self::storage_failed)?;
        span.set_rows(result.items.len() as u64);

        debug!(
            entity = E::MODEL.entity_name,
            page = result.page,
            size = result.size,
            total = result.total,
            "filter executed"
        );

        Ok(result)
    }

    //
    // Failures
    //

    fn compile_failed(err: CompileError) -> Error {
        sink::record(MetricsEvent::CompileFailed {
            entity_path: E::MODEL.path,
        });
        debug!(entity = E::MODEL.entity_name, error = %err, "criteria rejected");

        err.into()
    }

    fn storage_failed(err: StoreError) -> Error {
        if matches!(err, StoreError::TypeMismatch { .. }) {
            sink::record(MetricsEvent::TypeMismatch {
                entity_path: E::MODEL.path,
            });
            warn!(
                entity = E::MODEL.entity_name,
                cause = %err,
                "storage rejected operator or value for column type"
            );
        }

        err.into()
    }
}

fn record_plan(spec: &Specification) {
    let kind = if spec.is_unfiltered() {
        PlanKind::FullScan
    } else {
        PlanKind::Filtered
    };

    sink::record(MetricsEvent::Plan { kind });
}
