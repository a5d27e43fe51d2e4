//! Short random identifiers used as file-name prefixes and lookup keys.
//!
//! Ids are deliberately short so public URLs stay compact. They are not unique:
//! collisions are absorbed by the create-or-return upload path, not prevented here.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::IdPolicy;

/// Upper, lower and digit characters.
pub const ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone, Copy, Debug)]
pub struct IdGenerator {
    policy: IdPolicy,
}

impl IdGenerator {
    pub fn new(policy: IdPolicy) -> Self {
        Self { policy }
    }

    /// Generate an id of exactly `length_hint` characters, or of a random length within
    /// the policy bounds when no hint is given.
    pub fn generate(&self, length_hint: Option<usize>) -> String {
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        self.generate_with(&mut rng, length_hint)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, length_hint: Option<usize>) -> String {
        let length = match length_hint {
            Some(len) => len,
            None => rng.random_range(self.policy.min_length..=self.policy.max_length),
        };

        (0..length)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn hint_is_used_exactly() {
        let generator = IdGenerator::default();
        for _ in 0..200 {
            let id = generator.generate(Some(3));
            assert_eq!(id.len(), 3);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
        assert_eq!(generator.generate(Some(12)).len(), 12);
    }

    #[test]
    fn length_without_hint_stays_in_bounds() {
        let generator = IdGenerator::new(IdPolicy {
            min_length: 3,
            max_length: 6,
        });
        let mut seen = [false; 7];
        for _ in 0..2_000 {
            let len = generator.generate(None).len();
            assert!((3..=6).contains(&len), "length {} out of bounds", len);
            seen[len] = true;
        }
        assert!(seen[3] && seen[4] && seen[5] && seen[6]);
    }

    #[test]
    fn alphabet_has_62_distinct_characters() {
        let mut chars: Vec<u8> = ID_ALPHABET.to_vec();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), 62);
        assert!(chars.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    /// Chi-square sanity check per character position; df = 61.
    #[test]
    fn characters_are_roughly_uniform_per_position() {
        let generator = IdGenerator::default();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [[0u32; 62]; 3];

        let samples = 10_000;
        for _ in 0..samples {
            let id = generator.generate_with(&mut rng, Some(3));
            for (pos, byte) in id.bytes().enumerate() {
                let idx = ID_ALPHABET
                    .iter()
                    .position(|&c| c == byte)
                    .expect("character from alphabet");
                counts[pos][idx] += 1;
            }
        }

        let expected = samples as f64 / 62.0;
        for (pos, position_counts) in counts.iter().enumerate() {
            let chi_square: f64 = position_counts
                .iter()
                .map(|&observed| {
                    let diff = observed as f64 - expected;
                    diff * diff / expected
                })
                .sum();
            assert!(
                chi_square < 130.0,
                "position {} chi-square {} suggests a skewed distribution",
                pos,
                chi_square
            );
        }
    }
}
