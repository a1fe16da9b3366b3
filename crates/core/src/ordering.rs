//! Feed ordering applied before pagination.
//!
//! Newest first by `updated_at`, falling back to `created_at`. Items with
//! neither timestamp sort last. Ties break on ascending id so the order is
//! stable across fetches that return the same rows in a different sequence.

use std::cmp::Ordering;

use crate::ads::{Ad, AdRecord, LineAd};
use crate::types::Timestamp;

/// Anything carrying backend timestamps and an id.
pub trait Dated {
    fn id(&self) -> &str;
    fn created_at(&self) -> Option<Timestamp>;
    fn updated_at(&self) -> Option<Timestamp>;

    /// `updated_at ?? created_at`.
    fn recency(&self) -> Option<Timestamp> {
        self.updated_at().or_else(|| self.created_at())
    }
}

impl Dated for AdRecord {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }
    fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }
}

impl Dated for Ad {
    fn id(&self) -> &str {
        &self.record().id
    }
    fn created_at(&self) -> Option<Timestamp> {
        self.record().created_at
    }
    fn updated_at(&self) -> Option<Timestamp> {
        self.record().updated_at
    }
}

impl Dated for LineAd {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }
    fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }
}

/// Newest first; undated last; ascending id on ties.
pub fn compare_recency<T: Dated>(a: &T, b: &T) -> Ordering {
    let by_time = match (a.recency(), b.recency()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.id().cmp(b.id()))
}

pub fn sort_by_recency<T: Dated>(items: &mut [T]) {
    items.sort_by(compare_recency);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn line(id: &str, created: Option<i64>, updated: Option<i64>) -> LineAd {
        let at = |secs: i64| Utc.timestamp_opt(secs, 0).single();
        serde_json::from_value::<LineAd>(serde_json::json!({ "id": id }))
            .map(|mut ad| {
                ad.created_at = created.and_then(at);
                ad.updated_at = updated.and_then(at);
                ad
            })
            .unwrap()
    }

    fn ids(items: &[LineAd]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn newest_first_preferring_updated_at() {
        let mut items = vec![
            line("old", Some(100), None),
            line("edited", Some(50), Some(300)),
            line("new", Some(200), None),
        ];
        sort_by_recency(&mut items);
        assert_eq!(ids(&items), vec!["edited", "new", "old"]);
    }

    #[test]
    fn undated_items_sort_last() {
        let mut items = vec![line("none", None, None), line("dated", Some(1), None)];
        sort_by_recency(&mut items);
        assert_eq!(ids(&items), vec!["dated", "none"]);
    }

    #[test]
    fn ties_break_on_ascending_id() {
        let mut items = vec![
            line("c", Some(10), None),
            line("a", None, Some(10)),
            line("b", Some(10), None),
        ];
        sort_by_recency(&mut items);
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }
}
