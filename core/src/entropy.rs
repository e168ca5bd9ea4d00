use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// # Entropy
/// Source of uniformly distributed bytes for the `Cxkk` instruction.
///
/// Anything implementing `rand::RngCore` is a source, so tests can supply a seeded generator
/// and hosts can plug in whatever generator they already have.
pub trait Entropy {
    fn next_byte(&mut self) -> u8;
}

impl<R: RngCore> Entropy for R {
    fn next_byte(&mut self) -> u8 {
        self.gen()
    }
}

/// A generator seeded from the wall clock.
pub fn from_time() -> StdRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    from_seed(seed)
}

/// A generator that yields the same bytes for the same seed.
pub fn from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_bytes() {
        let mut a = from_seed(0xC8);
        let mut b = from_seed(0xC8);
        let a: Vec<u8> = (0..32).map(|_| a.next_byte()).collect();
        let b: Vec<u8> = (0..32).map(|_| b.next_byte()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bytes_vary() {
        let mut rng = from_time();
        let first = rng.next_byte();
        assert!((0..64).any(|_| rng.next_byte() != first));
    }
}
