//! Uniform random source consumed by map generation and enemy motion.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform integer in `min..=max`.
    fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        (i64::from(min_value) + (self.next_u64() % span) as i64) as i32
    }

    /// Uniform index into a non-empty collection of `len` items.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for upper in (1..items.len()).rev() {
            let swap_with = self.index(upper + 1);
            items.swap(upper, swap_with);
        }
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}
