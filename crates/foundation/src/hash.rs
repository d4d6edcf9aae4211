//! Deterministic pseudo-random values from integer hashing.
//!
//! The starfield is generated from a fixed seed, so every load of the page
//! shows the same sky.

/// 32-bit integer mix (non-linear) to avoid visible correlation patterns.
pub fn hash_u32(x_in: u32) -> u32 {
    let mut x = x_in;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Hash to a float in `[0, 1]`.
pub fn hash01(x: u32) -> f64 {
    hash_u32(x) as f64 / u32::MAX as f64
}

/// Stream of hashed values in `[0, 1]` for a fixed seed.
#[derive(Debug, Clone)]
pub struct HashSequence {
    seed: u32,
    counter: u32,
}

impl HashSequence {
    pub fn new(seed: u32) -> Self {
        Self { seed, counter: 0 }
    }

    pub fn next_unit(&mut self) -> f64 {
        let v = hash01(hash_u32(self.seed) ^ self.counter.wrapping_mul(0x9e37_79b9));
        self.counter = self.counter.wrapping_add(1);
        v
    }
}

impl Iterator for HashSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}

#[cfg(test)]
mod tests {
    use super::{HashSequence, hash_u32, hash01};

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_u32(12345), hash_u32(12345));
        assert_ne!(hash_u32(1), hash_u32(2));
    }

    #[test]
    fn unit_values_in_range() {
        for i in 0..1000 {
            let v = hash01(i);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn sequences_repeat_per_seed() {
        let a: Vec<f64> = HashSequence::new(7).take(16).collect();
        let b: Vec<f64> = HashSequence::new(7).take(16).collect();
        let c: Vec<f64> = HashSequence::new(8).take(16).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sequence_is_roughly_uniform() {
        let n = 10_000;
        let mean: f64 = HashSequence::new(42).take(n).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }
}
