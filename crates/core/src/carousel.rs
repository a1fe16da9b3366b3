//! Autoplaying slot carousel.
//!
//! A [`Carousel`] owns one [`Rotator`] and a background tokio task that
//! advances it on a fixed interval. Manual navigation and pool replacement
//! restart the countdown, so a viewer always gets a full interval after
//! interacting. Dropping the carousel cancels the task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use tokio::sync::{watch, Mutex, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::rotation::{shuffle_pool, Rotator};

/// Autoplay cadence used by most storefront call sites.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

pub struct Carousel<T> {
    rotator: Arc<Mutex<Rotator<T>>>,
    restart: Arc<Notify>,
    cursor_tx: Arc<watch::Sender<usize>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    max_ads: usize,
    interval: Duration,
}

impl<T> Carousel<T>
where
    T: Clone + Send + 'static,
{
    /// Start autoplaying `rotator`, advancing every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(rotator: Rotator<T>, interval: Duration) -> Self {
        let max_ads = rotator.max_ads();
        let (cursor_tx, _) = watch::channel(rotator.cursor());
        let rotator = Arc::new(Mutex::new(rotator));
        let restart = Arc::new(Notify::new());
        let cursor_tx = Arc::new(cursor_tx);
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(autoplay(
            Arc::clone(&rotator),
            Arc::clone(&restart),
            Arc::clone(&cursor_tx),
            cancel.clone(),
            interval,
        ));

        Self {
            rotator,
            restart,
            cursor_tx,
            cancel,
            handle: Some(handle),
            max_ads,
            interval,
        }
    }

    pub async fn next(&self) {
        self.navigate(Rotator::next).await;
    }

    pub async fn prev(&self) {
        self.navigate(Rotator::prev).await;
    }

    /// Jump to `index`; out-of-range indexes are ignored and leave the
    /// countdown running.
    pub async fn select(&self, index: usize) -> bool {
        let mut rotator = self.rotator.lock().await;
        let moved = rotator.select(index);
        if moved {
            self.cursor_tx.send_replace(rotator.cursor());
            self.restart.notify_one();
        }
        moved
    }

    /// Replace the candidate pool: shuffle, cap, rewind, restart countdown.
    ///
    /// The shuffle happens before the returned future is first polled, so
    /// the random source is not held across an await point.
    pub fn replace_pool(
        &self,
        candidates: Vec<T>,
        rng: &mut dyn RngCore,
    ) -> impl Future<Output = ()> + '_ {
        let pool = shuffle_pool(candidates, self.max_ads, rng);
        async move {
            let mut rotator = self.rotator.lock().await;
            rotator.install(pool);
            self.cursor_tx.send_replace(rotator.cursor());
            self.restart.notify_one();
        }
    }

    /// The ad on display, `None` when the slot should show its fallback.
    pub async fn current(&self) -> Option<T> {
        self.rotator.lock().await.current().cloned()
    }

    pub async fn cursor(&self) -> usize {
        self.rotator.lock().await.cursor()
    }

    pub async fn len(&self) -> usize {
        self.rotator.lock().await.len()
    }

    /// Receive every cursor change, whether from autoplay or navigation.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.cursor_tx.subscribe()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop autoplay and wait for the timer task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    async fn navigate(&self, step: fn(&mut Rotator<T>)) {
        let mut rotator = self.rotator.lock().await;
        step(&mut *rotator);
        self.cursor_tx.send_replace(rotator.cursor());
        self.restart.notify_one();
    }
}

impl<T> Drop for Carousel<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn autoplay<T>(
    rotator: Arc<Mutex<Rotator<T>>>,
    restart: Arc<Notify>,
    cursor_tx: Arc<watch::Sender<usize>>,
    cancel: CancellationToken,
    interval: Duration,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = restart.notified() => continue,
            _ = tokio::time::sleep(interval) => {
                let mut rotator = rotator.lock().await;
                rotator.next();
                cursor_tx.send_replace(rotator.cursor());
            }
        }
    }
}
