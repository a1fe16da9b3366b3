//! Fetch state for a remote ad list.
//!
//! A [`Feed`] remembers the last query it ran so a failed load can be
//! re-issued by a user-triggered retry. There is no automatic retry or
//! backoff. Loads are applied in the order they resolve.
//!
//! Callers that must keep working while a request is in flight split a load
//! into [`Feed::begin`] and [`Feed::finish`]; [`Feed::load`] runs both
//! around one awaited fetch.

use std::future::Future;

use paisa_core::filters::AdQuery;

use crate::api::ApiError;

/// What a view should render for a remote list.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; render a loading placeholder.
    Loading,
    /// Non-empty results.
    Ready(Vec<T>),
    /// The query succeeded with no rows; render "no ads available".
    Empty,
    /// The query failed; render an error with a retry action.
    Failed { message: String, retryable: bool },
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Ready(items),
            Err(err) => Self::Failed {
                retryable: err.is_retryable(),
                message: err.to_string(),
            },
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A remote list plus the query that produced it.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    state: FetchState<T>,
    last_query: Option<AdQuery>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            last_query: None,
        }
    }
}

impl<T> Feed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn last_query(&self) -> Option<&AdQuery> {
        self.last_query.as_ref()
    }

    /// Mark a fetch for `query` as in flight and hand the query back to run.
    pub fn begin(&mut self, query: AdQuery) -> AdQuery {
        self.last_query = Some(query.clone());
        self.state = FetchState::Loading;
        query
    }

    /// Like [`Feed::begin`] for the last query, but only after a failure.
    pub fn begin_retry(&mut self) -> Option<AdQuery> {
        if !self.state.is_failed() {
            return None;
        }
        let query = self.last_query.clone().unwrap_or_default();
        tracing::info!(?query, "Retrying ad feed fetch");
        Some(self.begin(query))
    }

    /// Record the outcome of the fetch started by the latest `begin`.
    pub fn finish(&mut self, result: Result<Vec<T>, ApiError>) -> &FetchState<T> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, retryable = err.is_retryable(), "Ad feed fetch failed");
        }
        self.state = FetchState::from_result(result);
        &self.state
    }

    /// Run `fetch` for `query` and record the outcome.
    pub async fn load<F, Fut>(&mut self, query: AdQuery, fetch: F) -> &FetchState<T>
    where
        F: FnOnce(AdQuery) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let query = self.begin(query);
        let result = fetch(query).await;
        self.finish(result)
    }

    /// Re-run the last query after a failure. Returns `None` (and does
    /// nothing) unless the feed is currently failed.
    pub async fn retry<F, Fut>(&mut self, fetch: F) -> Option<&FetchState<T>>
    where
        F: FnOnce(AdQuery) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let query = self.begin_retry()?;
        let result = fetch(query).await;
        Some(self.finish(result))
    }
}
