//! Location and category filters for the `*/today` ad feeds.
//!
//! [`AdQuery`] is the wire-level filter; [`FilterState`] is the interactive
//! state behind the storefront's dependent dropdowns.

use serde::{Deserialize, Serialize};

/// Filters accepted by `/line-ad/today`, `/video-ad/today` and
/// `/poster-ad/today`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdQuery {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub state_id: Option<String>,
    #[serde(default)]
    pub city_id: Option<String>,
}

impl AdQuery {
    /// Blank values (`?categoryId=`) count as unset.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            category_id: keep(self.category_id),
            state_id: keep(self.state_id),
            city_id: keep(self.city_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.state_id.is_none() && self.city_id.is_none()
    }

    /// Query-string pairs for the backend, unset filters omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("categoryId", &self.category_id),
            ("stateId", &self.state_id),
            ("cityId", &self.city_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

/// Active filter selection with cascading rules.
///
/// Picking a different state clears the city. Every effective change bumps
/// [`generation`](FilterState::generation); views compare generations to
/// know when to rewind pagination and refetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: AdQuery,
    generation: u64,
}

impl FilterState {
    pub fn new(query: AdQuery) -> Self {
        Self {
            query: query.normalized(),
            generation: 0,
        }
    }

    pub fn query(&self) -> &AdQuery {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_category(&mut self, category_id: Option<String>) -> bool {
        let next = AdQuery {
            category_id,
            ..self.query.clone()
        };
        self.apply(next)
    }

    /// Select a state; a changed state drops the city selection.
    pub fn set_state(&mut self, state_id: Option<String>) -> bool {
        let mut next = AdQuery {
            state_id,
            ..self.query.clone()
        }
        .normalized();
        if next.state_id != self.query.state_id {
            next.city_id = None;
        }
        self.apply(next)
    }

    /// Select a city. Ignored while no state is selected.
    pub fn set_city(&mut self, city_id: Option<String>) -> bool {
        if city_id.is_some() && self.query.state_id.is_none() {
            return false;
        }
        let next = AdQuery {
            city_id,
            ..self.query.clone()
        };
        self.apply(next)
    }

    pub fn clear(&mut self) -> bool {
        self.apply(AdQuery::default())
    }

    fn apply(&mut self, next: AdQuery) -> bool {
        let next = next.normalized();
        if next == self.query {
            return false;
        }
        self.query = next;
        self.generation += 1;
        true
    }
}
