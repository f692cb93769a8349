/// Uniform shuffling
///
/// Presentation orders come from rand's `SliceRandom::shuffle`, a
/// Fisher–Yates shuffle: every ordering is equally likely.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{ItemId, MatchPair};

/// Ids of `pairs` in a fresh uniformly random order
pub fn shuffled_ids<R: Rng + ?Sized>(pairs: &[MatchPair], rng: &mut R) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = pairs.iter().map(|pair| pair.id).collect();
    ids.shuffle(rng);
    ids
}

/// Whether `order` contains exactly the ids of `pairs`, each once
pub fn is_permutation_of(order: &[ItemId], pairs: &[MatchPair]) -> bool {
    let mut expected: Vec<ItemId> = pairs.iter().map(|pair| pair.id).collect();
    let mut actual = order.to_vec();
    expected.sort_unstable();
    actual.sort_unstable();
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageRef;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn pairs(n: u32) -> Vec<MatchPair> {
        (1..=n)
            .map(|id| MatchPair {
                id,
                word: format!("word{}", id),
                localized_word: format!("מילה{}", id),
                image: ImageRef::Remote(format!("https://example.org/{}.png", id)),
            })
            .collect()
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let pairs = pairs(6);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let order = shuffled_ids(&pairs, &mut rng);
            assert_eq!(order.len(), 6);
            assert!(is_permutation_of(&order, &pairs));
        }
    }

    #[test]
    fn test_is_permutation_rejects_repeats() {
        let pairs = pairs(3);
        assert!(is_permutation_of(&[3, 1, 2], &pairs));
        assert!(!is_permutation_of(&[1, 1, 2], &pairs));
        assert!(!is_permutation_of(&[1, 2], &pairs));
    }

    #[test]
    fn test_shuffle_is_uniform() {
        // 4! orderings, 1000 expected hits each
        let pairs = pairs(4);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<Vec<ItemId>, usize> = HashMap::new();
        for _ in 0..24_000 {
            *counts.entry(shuffled_ids(&pairs, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 24);
        for (order, count) in counts {
            assert!(
                (800..=1_200).contains(&count),
                "ordering {:?} appeared {} times",
                order,
                count
            );
        }
    }

    #[test]
    fn test_single_item() {
        let pairs = pairs(1);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffled_ids(&pairs, &mut rng), vec![1]);
    }
}
