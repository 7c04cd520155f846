//! Randomized model tests for `EntryMap` and `BiMap` against `HashMap`.

use std::collections::HashMap;

use freeslot_collections::{BiMap, BiMapError, EntryMap};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SEEDS: [u64; 3] = [4, 17, 2024];
const STEPS: usize = 5_000;

#[test]
fn entry_map_matches_hash_map() {
    for seed in SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut map: EntryMap<u16, u64> = EntryMap::new();
        let mut model: HashMap<u16, u64> = HashMap::new();
        let mut entries: HashMap<u16, usize> = HashMap::new();

        for step in 0..STEPS as u64 {
            let key = rng.gen_range(0..256);
            match rng.gen_range(0..4) {
                0 => match map.try_insert(key, step) {
                    Ok(entry) => {
                        assert!(model.insert(key, step).is_none());
                        entries.insert(key, entry);
                    }
                    Err(rejected) => {
                        assert!(model.contains_key(&key));
                        assert_eq!(rejected.into_inner(), (key, step));
                    }
                },
                1 => {
                    assert_eq!(map.remove(&key), model.remove(&key));
                    entries.remove(&key);
                }
                2 => {
                    if let Some(&entry) = entries.get(&key) {
                        let old = map.replace_value_by_entry(entry, step);
                        assert_eq!(model.insert(key, step), Some(old));
                    }
                }
                _ => assert_eq!(map.insert(key, step), model.insert(key, step)),
            }
            if let Some(entry) = map.find_entry(&key) {
                entries.insert(key, entry);
            }
        }

        assert_eq!(map.len(), model.len());
        for (key, value) in &model {
            let entry = map.find_entry(key).unwrap();
            assert_eq!(entries.get(key), Some(&entry));
            assert_eq!(map.value_by_entry(entry), Some(value));
        }
    }
}

#[test]
fn bimap_matches_two_hash_maps() {
    for seed in SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut map: BiMap<u8, u8> = BiMap::new();
        let mut forward: HashMap<u8, u8> = HashMap::new();
        let mut backward: HashMap<u8, u8> = HashMap::new();

        for _ in 0..STEPS {
            let left = rng.gen_range(0..64);
            let right = rng.gen_range(0..64);
            match rng.gen_range(0..4) {
                0 => {
                    let expected = if forward.contains_key(&left) {
                        Err(BiMapError::DuplicateLeft)
                    } else if backward.contains_key(&right) {
                        Err(BiMapError::DuplicateRight)
                    } else {
                        forward.insert(left, right);
                        backward.insert(right, left);
                        Ok(())
                    };
                    assert_eq!(map.insert(left, right), expected);
                }
                1 => {
                    let expected = forward.remove(&left).map(|r| {
                        backward.remove(&r);
                        (left, r)
                    });
                    assert_eq!(map.remove_by_left(&left), expected);
                }
                2 => {
                    let expected = backward.remove(&right).map(|l| {
                        forward.remove(&l);
                        (l, right)
                    });
                    assert_eq!(map.remove_by_right(&right), expected);
                }
                _ => {
                    let by_left = forward.remove(&left).map(|r| {
                        backward.remove(&r);
                        (left, r)
                    });
                    let by_right = backward.remove(&right).map(|l| {
                        forward.remove(&l);
                        (l, right)
                    });
                    forward.insert(left, right);
                    backward.insert(right, left);

                    let evicted = map.insert_or_replace(left, right);
                    assert_eq!(evicted.by_left, by_left);
                    assert_eq!(evicted.by_right, by_right);
                }
            }

            assert_eq!(map.len(), forward.len());
            assert_eq!(map.backward().len(), backward.len());
        }

        for (left, right) in &forward {
            assert_eq!(map.get_by_left(left), Some(right));
            assert_eq!(map.get_by_right(right), Some(left));
        }
    }
}
