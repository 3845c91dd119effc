use rand::Rng;

/// In-place Fisher-Yates. The swap range shrinks with `i`, which is what keeps
/// every permutation equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn empty_and_single_are_untouched() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn keeps_every_element() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..71).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..71).collect::<Vec<_>>());
    }

    #[test]
    fn three_items_are_uniform() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let trials = 60_000;
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();
        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for (perm, n) in counts {
            let deviation = (n as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "{perm:?} seen {n} times");
        }
    }
}
