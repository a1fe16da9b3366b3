//! Slot rotation: a shuffled, size-capped pool with a circular cursor.
//!
//! The pool is reshuffled every time its candidates are replaced. Randomness
//! is injected so callers can pass a seeded [`rand::rngs::StdRng`] in tests
//! and `rand::rng()` in production.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ads::Ad;

/// Pool cap used when a call site does not configure one.
pub const DEFAULT_MAX_ADS: usize = 5;

/// Shuffle `candidates` uniformly and keep at most `max_ads` of them.
///
/// The full list is permuted before truncation so every ordering of every
/// subset is equally likely.
pub fn shuffle_pool<T, R>(mut candidates: Vec<T>, max_ads: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    candidates.shuffle(rng);
    candidates.truncate(max_ads.max(1));
    candidates
}

/// Rotation state for one slot.
#[derive(Debug, Clone)]
pub struct Rotator<T> {
    pool: Vec<T>,
    cursor: usize,
    max_ads: usize,
}

/// Rotator over slotted ads.
pub type SlotRotator = Rotator<Ad>;

impl<T> Rotator<T> {
    /// An empty rotator. `max_ads` below 1 is raised to 1.
    pub fn new(max_ads: usize) -> Self {
        Self {
            pool: Vec::new(),
            cursor: 0,
            max_ads: max_ads.max(1),
        }
    }

    /// A rotator whose pool is already populated from `candidates`.
    pub fn with_pool<R>(candidates: Vec<T>, max_ads: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut rotator = Self::new(max_ads);
        rotator.replace_pool(candidates, rng);
        rotator
    }

    /// Swap in a fresh candidate list: shuffle, cap, and rewind the cursor.
    pub fn replace_pool<R>(&mut self, candidates: Vec<T>, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let pool = shuffle_pool(candidates, self.max_ads, rng);
        self.install(pool);
    }

    /// Install an already shuffled pool, capping it and rewinding the cursor.
    pub(crate) fn install(&mut self, mut pool: Vec<T>) {
        pool.truncate(self.max_ads);
        self.pool = pool;
        self.cursor = 0;
    }

    /// Advance one step, wrapping past the end. No-op for pools of 0 or 1.
    pub fn next(&mut self) {
        let len = self.pool.len();
        if len > 1 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Step back one, wrapping past the start. No-op for pools of 0 or 1.
    pub fn prev(&mut self) {
        let len = self.pool.len();
        if len > 1 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Jump to `index`. Out-of-range indexes are ignored; returns whether
    /// the cursor moved to the requested index.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.pool.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// The ad on display, or `None` when the slot should show its fallback.
    pub fn current(&self) -> Option<&T> {
        self.pool.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pool(&self) -> &[T] {
        &self.pool
    }

    pub fn into_pool(self) -> Vec<T> {
        self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn max_ads(&self) -> usize {
        self.max_ads
    }
}

impl<T> Default for Rotator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ADS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::{AdRecord, PageType, Position, Side};
    use crate::slots::classify_side;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let mut rotator = Rotator::with_pool(vec![1, 2, 3, 4], 10, &mut rng());
        rotator.next();
        let start = rotator.cursor();
        for _ in 0..rotator.len() {
            rotator.next();
        }
        assert_eq!(rotator.cursor(), start);
    }

    #[test]
    fn prev_undoes_next() {
        let mut rotator = Rotator::with_pool(vec!['a', 'b', 'c'], 10, &mut rng());
        for _ in 0..5 {
            let before = rotator.cursor();
            rotator.next();
            rotator.prev();
            assert_eq!(rotator.cursor(), before);
            rotator.next();
        }
    }

    #[test]
    fn prev_from_zero_wraps_to_last() {
        let mut rotator = Rotator::with_pool(vec![1, 2, 3], 10, &mut rng());
        rotator.prev();
        assert_eq!(rotator.cursor(), 2);
    }

    #[test]
    fn single_and_empty_pools_do_not_move() {
        let mut single = Rotator::with_pool(vec!["only"], 5, &mut rng());
        single.next();
        single.prev();
        assert_eq!(single.cursor(), 0);
        assert_eq!(single.current(), Some(&"only"));

        let mut empty: Rotator<u8> = Rotator::new(5);
        empty.next();
        empty.prev();
        assert_eq!(empty.cursor(), 0);
        assert!(empty.current().is_none());
    }

    #[test]
    fn pool_is_capped_and_cursor_rewound_on_replace() {
        let mut rotator = Rotator::with_pool((0..10).collect(), 3, &mut rng());
        assert_eq!(rotator.len(), 3);
        rotator.next();
        rotator.next();

        rotator.replace_pool(vec![100, 200], &mut rng());
        assert_eq!(rotator.cursor(), 0);
        assert_eq!(rotator.len(), 2);
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        let rotator = Rotator::with_pool(vec![1, 2, 3], 0, &mut rng());
        assert_eq!(rotator.max_ads(), 1);
        assert_eq!(rotator.len(), 1);
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let mut rotator = Rotator::with_pool(vec![1, 2, 3], 10, &mut rng());
        assert!(rotator.select(2));
        assert!(!rotator.select(3));
        assert_eq!(rotator.cursor(), 2);
    }

    #[test]
    fn shuffle_is_uniform_over_positions() {
        const N: usize = 4;
        const TRIALS: usize = 40_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [[0usize; N]; N];

        for _ in 0..TRIALS {
            let pool = shuffle_pool((0..N).collect(), N, &mut rng);
            for (slot, item) in pool.into_iter().enumerate() {
                counts[item][slot] += 1;
            }
        }

        let expected = 1.0 / N as f64;
        for row in counts {
            for count in row {
                let freq = count as f64 / TRIALS as f64;
                assert!(
                    (freq - expected).abs() < 0.02,
                    "frequency {freq} too far from {expected}"
                );
            }
        }
    }

    #[test]
    fn classified_slot_rotates_end_to_end() {
        let at = |side, position| Position {
            page_type: PageType::Home,
            side,
            position: Some(position),
        };
        let ads = vec![
            Ad::Poster(AdRecord::new("1").with_position(at(Side::LeftSide, 1))),
            Ad::Poster(AdRecord::new("2").with_position(at(Side::LeftSide, 1))),
            Ad::Poster(AdRecord::new("3").with_position(at(Side::RightSide, 1))),
        ];

        let mut left = classify_side(&ads, Side::LeftSide, None);
        let pool = left.remove(&1).unwrap();
        let mut rotator = SlotRotator::with_pool(pool, DEFAULT_MAX_ADS, &mut rng());

        assert_eq!(rotator.len(), 2);
        assert_eq!(rotator.cursor(), 0);
        rotator.next();
        assert_eq!(rotator.cursor(), 1);
        rotator.next();
        assert_eq!(rotator.cursor(), 0);
    }
}
