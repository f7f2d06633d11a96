//! Page fetch orchestration

use super::types::{Page, PageRequest};
use crate::config::PagerConfig;
use crate::cursor::{generate_cursor, parse_cursor_values};
use crate::error::{Error, Result};
use crate::query::{build_range_filter, sort_keys, ComparisonOp};
use crate::record::Record;
use crate::store::{Counter, FetchQuery, Fetcher};
use crate::types::{CursorKind, Direction};
use std::fmt;
use std::sync::Arc;

/// Keyset paginator over one record type
///
/// Holds the storage collaborators and shared configuration. Every call to
/// [`paginate`](Self::paginate) is independent; nothing is kept between
/// pages except what the caller passes back in the cursor tokens.
pub struct Paginator<R: Send + 'static> {
    counter: Option<Arc<dyn Counter>>,
    fetcher: Arc<dyn Fetcher<R>>,
    config: PagerConfig,
}

impl<R: Send + 'static> fmt::Debug for Paginator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("counter", &self.counter.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: Record + Send + 'static> Paginator<R> {
    /// Create a paginator using one store for both counting and fetching
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: Counter + Fetcher<R> + 'static,
    {
        Self {
            counter: Some(store.clone() as Arc<dyn Counter>),
            fetcher: store as Arc<dyn Fetcher<R>>,
            config: PagerConfig::default(),
        }
    }

    /// Start building a paginator from separate collaborators
    pub fn builder() -> PaginatorBuilder<R> {
        PaginatorBuilder::new()
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Fetch one page
    pub async fn paginate(&self, request: &PageRequest) -> Result<Page<R>> {
        let limit = self.validate(request)?;

        let id_field = self.config.id_field.as_str();
        let sort_field = request
            .sort_field
            .as_deref()
            .filter(|field| !field.is_empty())
            .unwrap_or(id_field);
        let tiebreak = sort_field != id_field;

        let cursor = match request.cursor() {
            (Some(token), _) => Some((CursorKind::Next, token)),
            (None, Some(token)) => Some((CursorKind::Previous, token)),
            (None, None) => None,
        };
        let kind = cursor.map(|(kind, _)| kind);
        let direction = kind.map_or(Direction::Forward, CursorKind::direction);

        // Backward pages are fetched nearest-first, then flipped
        let fetch_sort = match direction {
            Direction::Forward => request.sort,
            Direction::Backward => request.sort.reverse(),
        };

        let mut filters = vec![request.filter.clone()];
        if let Some((kind, token)) = cursor {
            let values = parse_cursor_values(token, tiebreak)
                .map_err(|e| Error::cursor_parse(kind, e))?;
            let op = ComparisonOp::for_page(request.sort, direction);
            filters.push(build_range_filter(tiebreak, sort_field, id_field, op, &values)?);
        }

        let total = if request.count_total {
            Some(self.count(request).await?)
        } else {
            None
        };

        let query = FetchQuery {
            collection: request.collection.clone(),
            filters,
            sort: sort_keys(sort_field, id_field, fetch_sort),
            limit: limit.saturating_add(1),
            collation: request
                .collation
                .clone()
                .or_else(|| self.config.collation.clone()),
            projection: request.projection.clone(),
        };

        tracing::debug!(
            collection = %query.collection,
            limit = query.limit,
            sort = %display_sort(&query),
            cursor = ?kind,
            "fetching page"
        );

        let mut records = self.fetcher.fetch(&query).await?;
        let has_more = records.len() > limit;
        records.truncate(limit);
        if direction == Direction::Backward {
            records.reverse();
        }

        let (more_before, more_after) = match kind {
            None => (false, has_more),
            Some(CursorKind::Next) => (true, has_more),
            Some(CursorKind::Previous) => (has_more, true),
        };

        let previous = match records.first() {
            Some(first) if more_before => Some(generate_cursor(first, sort_field, id_field, tiebreak)?),
            _ => None,
        };
        let next = match records.last() {
            Some(last) if more_after => Some(generate_cursor(last, sort_field, id_field, tiebreak)?),
            _ => None,
        };

        tracing::trace!(
            records = records.len(),
            has_next = next.is_some(),
            has_previous = previous.is_some(),
            "page assembled"
        );

        Ok(Page {
            records,
            has_next: next.is_some(),
            has_previous: previous.is_some(),
            next,
            previous,
            total,
        })
    }

    /// Check the request and return the effective page size
    fn validate(&self, request: &PageRequest) -> Result<usize> {
        if request.limit < 1 {
            return Err(Error::invalid_argument("a limit of at least 1 is required"));
        }
        if request.collection.is_empty() {
            return Err(Error::invalid_argument("collection name can't be empty"));
        }
        if let (Some(_), Some(_)) = request.cursor() {
            return Err(Error::invalid_argument(
                "next and previous cursors can't both be set",
            ));
        }
        if request.count_total && self.counter.is_none() {
            return Err(Error::invalid_argument(
                "a count collaborator is required to count the total",
            ));
        }

        match self.config.max_page_size {
            Some(max) if request.limit > max => {
                tracing::warn!(
                    requested = request.limit,
                    max,
                    "page size exceeds maximum, clamping"
                );
                Ok(max)
            }
            _ => Ok(request.limit),
        }
    }

    /// Count with the base filter only; the cursor range doesn't apply
    async fn count(&self, request: &PageRequest) -> Result<u64> {
        let counter = self
            .counter
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("a count collaborator is required to count the total"))?;

        tracing::debug!(collection = %request.collection, "counting total");
        counter
            .count(&request.collection, std::slice::from_ref(&request.filter))
            .await
    }
}

fn display_sort(query: &FetchQuery) -> String {
    query
        .sort
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Builder for a [`Paginator`] with separate collaborators
pub struct PaginatorBuilder<R: Send + 'static> {
    counter: Option<Arc<dyn Counter>>,
    fetcher: Option<Arc<dyn Fetcher<R>>>,
    config: PagerConfig,
}

impl<R: Send + 'static> fmt::Debug for PaginatorBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatorBuilder")
            .field("counter", &self.counter.is_some())
            .field("fetcher", &self.fetcher.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<R: Record + Send + 'static> PaginatorBuilder<R> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            counter: None,
            fetcher: None,
            config: PagerConfig::default(),
        }
    }

    /// Set the count collaborator
    pub fn counter(mut self, counter: Arc<dyn Counter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Set the fetch collaborator
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher<R>>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the paginator
    pub fn build(self) -> Result<Paginator<R>> {
        let fetcher = self
            .fetcher
            .ok_or_else(|| Error::invalid_argument("a fetch collaborator is required"))?;
        self.config.validate()?;

        Ok(Paginator {
            counter: self.counter,
            fetcher,
            config: self.config,
        })
    }
}

impl<R: Record + Send + 'static> Default for PaginatorBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

