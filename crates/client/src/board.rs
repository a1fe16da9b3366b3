//! A page's worth of autoplaying slot carousels.
//!
//! The board keeps one [`Carousel`] per occupied slot. Applying a new
//! [`SlotLayout`] reshuffles the pools of slots that stay occupied, starts
//! carousels for newly occupied slots, and drops (stopping the timers of)
//! slots that emptied.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use paisa_core::ads::Ad;
use paisa_core::carousel::Carousel;
use paisa_core::images::MediaSource;
use paisa_core::rotation::Rotator;
use paisa_core::slots::{SlotKey, SlotLayout};
use rand::RngCore;
use serde::Serialize;

/// Point-in-time view of one slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub key: SlotKey,
    pub cursor: usize,
    pub pool_size: usize,
    pub current: Option<Ad>,
    pub media: Option<MediaSource>,
}

pub struct SlotBoard {
    carousels: BTreeMap<SlotKey, Carousel<Ad>>,
    max_ads: usize,
    interval: Duration,
}

impl SlotBoard {
    pub fn new(max_ads: usize, interval: Duration) -> Self {
        Self {
            carousels: BTreeMap::new(),
            max_ads,
            interval,
        }
    }

    /// Install a freshly classified layout.
    ///
    /// All shuffling happens before the returned future is polled.
    pub fn apply<'a>(
        &'a mut self,
        layout: SlotLayout,
        rng: &mut dyn RngCore,
    ) -> impl Future<Output = ()> + 'a {
        let pools = layout.into_inner();

        let before = self.carousels.len();
        self.carousels.retain(|key, _| pools.contains_key(key));
        let dropped = before - self.carousels.len();

        let mut refreshed = Vec::new();
        let mut started = 0usize;
        for (key, pool) in pools {
            if self.carousels.contains_key(&key) {
                refreshed.push((key, pool));
            } else {
                let rotator = Rotator::with_pool(pool, self.max_ads, &mut *rng);
                self.carousels
                    .insert(key, Carousel::spawn(rotator, self.interval));
                started += 1;
            }
        }

        tracing::info!(
            started,
            refreshed = refreshed.len(),
            dropped,
            "Slot board updated"
        );

        let carousels = &self.carousels;
        let updates: Vec<_> = refreshed
            .into_iter()
            .filter_map(|(key, pool)| {
                carousels
                    .get(&key)
                    .map(|carousel| carousel.replace_pool(pool, &mut *rng))
            })
            .collect();

        async move {
            futures::future::join_all(updates).await;
        }
    }

    pub fn get(&self, key: &SlotKey) -> Option<&Carousel<Ad>> {
        self.carousels.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SlotKey> {
        self.carousels.keys()
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Current state of every slot, in layout order.
    pub async fn snapshot(&self) -> Vec<SlotView> {
        let mut views = Vec::with_capacity(self.carousels.len());
        for (key, carousel) in &self.carousels {
            let current = carousel.current().await;
            views.push(SlotView {
                key: *key,
                cursor: carousel.cursor().await,
                pool_size: carousel.len().await,
                media: current.as_ref().map(MediaSource::for_ad),
                current,
            });
        }
        views
    }

    /// Stop every carousel and wait for their timers to exit.
    pub async fn shutdown(self) {
        futures::future::join_all(self.carousels.into_values().map(Carousel::shutdown)).await;
    }
}
