//! Unbiased permutation of a slice.
//!
//! Used to randomize the seating order at session start and by
//! presentation code that animates a turn "reveal".

use rand::Rng;

/// Return a uniformly random permutation of `items`.
///
/// Fisher–Yates from the last index down to 1: each element is swapped
/// with a uniformly chosen element at an index no greater than its own.
/// The input slice is left untouched.
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use truth_or_dare::core::shuffled;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let names = ["Ana", "Bia", "Caio"];
/// let mut order = shuffled(&names, &mut rng);
///
/// order.sort();
/// assert_eq!(order, vec!["Ana", "Bia", "Caio"]);
/// ```
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut result = items.to_vec();

    for index in (1..result.len()).rev() {
        let swap_with = rng.gen_range(0..=index);
        result.swap(index, swap_with);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn test_empty_and_single() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let empty: Vec<u8> = shuffled(&[], &mut rng);
        assert!(empty.is_empty());

        assert_eq!(shuffled(&[9], &mut rng), vec![9]);
    }

    #[test]
    fn test_input_not_mutated() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let input = vec![1, 2, 3, 4, 5, 6, 7, 8];

        let _ = shuffled(&input, &mut rng);

        assert_eq!(input, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_uniform_over_permutations() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let input = [0u8, 1, 2];
        let trials = 60_000;

        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffled(&input, &mut rng)).or_default() += 1;
        }

        // 3! permutations, 10_000 expected each; sd is about 91.
        assert_eq!(counts.len(), 6);
        for (perm, count) in &counts {
            assert!(
                (9_500..=10_500).contains(count),
                "permutation {:?} drawn {} times",
                perm,
                count
            );
        }
    }

    proptest! {
        #[test]
        fn prop_is_permutation(items in proptest::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut out = shuffled(&items, &mut rng);
            let mut expected = items.clone();

            out.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(out, expected);
        }
    }
}
