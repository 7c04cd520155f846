//! Randomized model tests for `Deque` against `std::collections::VecDeque`.

use std::collections::VecDeque;

use freeslot_collections::{Deque, DequeError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SEEDS: [u64; 4] = [2, 11, 99, 0xC0FFEE];
const STEPS: usize = 5_000;

fn assert_matches(deque: &Deque<u32>, model: &VecDeque<u32>) {
    assert_eq!(deque.len(), model.len());
    assert!(deque.iter().eq(model.iter()));
    assert!(deque.iter().rev().eq(model.iter().rev()));
    assert_eq!(deque.front(), model.front());
    assert_eq!(deque.back(), model.back());
}

#[test]
fn deque_matches_vec_deque() {
    for seed in SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut deque: Deque<u32> = Deque::with_capacity(1);
        let mut model: VecDeque<u32> = VecDeque::new();

        for step in 0..STEPS as u32 {
            match rng.gen_range(0..10) {
                0 | 1 => {
                    deque.push_back(step);
                    model.push_back(step);
                }
                2 | 3 => {
                    deque.push_front(step);
                    model.push_front(step);
                }
                4 => assert_eq!(deque.pop_front(), model.pop_front()),
                5 => assert_eq!(deque.pop_back(), model.pop_back()),
                6 => {
                    let at = rng.gen_range(0..=model.len());
                    deque.insert(at, step).unwrap();
                    model.insert(at, step);
                }
                7 if !model.is_empty() => {
                    let at = rng.gen_range(0..model.len());
                    assert_eq!(deque.remove(at), model.remove(at));
                }
                8 => {
                    let at = rng.gen_range(0..=model.len());
                    let count = rng.gen_range(0..=(model.len() - at).min(8));
                    deque.remove_range(at, count).unwrap();
                    model.drain(at..at + count);
                }
                9 if !model.is_empty() => {
                    let at = rng.gen_range(0..model.len());
                    assert_eq!(deque.set(at, step), Ok(model[at]));
                    model[at] = step;
                }
                _ => {}
            }
            assert_matches(&deque, &model);
        }

        for (i, value) in model.iter().enumerate() {
            assert_eq!(deque.get(i), Some(value));
            assert_eq!(&deque[i], value);
        }
        assert_eq!(deque.into_vec(), Vec::from(model));
    }
}

#[test]
fn errors_leave_deque_untouched() {
    let mut deque: Deque<u32> = (0..5).collect();
    let before = deque.to_vec();
    let version = deque.version();

    assert_eq!(
        deque.insert(6, 0),
        Err(DequeError::OutOfRange { index: 6, len: 5 })
    );
    assert_eq!(
        deque.remove_range(4, 2),
        Err(DequeError::RangeOutOfBounds { start: 4, count: 2, len: 5 })
    );
    assert_eq!(
        deque.set(5, 0),
        Err(DequeError::OutOfRange { index: 5, len: 5 })
    );
    assert_eq!(
        deque.set_capacity(4),
        Err(DequeError::CapacityTooSmall { requested: 4, len: 5 })
    );

    assert_eq!(deque.to_vec(), before);
    assert_eq!(deque.version(), version);
}

#[test]
fn binary_search_matches_partition_point() {
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..200 {
        let len = rng.gen_range(0..40);
        let mut values: Vec<u32> = (0..len).map(|_| rng.gen_range(0..20)).collect();
        values.sort_unstable();

        // start the run near the end of the buffer so it wraps
        let mut deque: Deque<u32> = Deque::with_capacity(64);
        for _ in 0..50 {
            deque.push_back(0);
        }
        for _ in 0..50 {
            deque.pop_front();
        }
        deque.extend(values.iter().copied());
        assert_eq!(deque.is_split(), len > 14);

        for target in 0..21 {
            let lower = values.partition_point(|&v| v < target);
            let upper = values.partition_point(|&v| v <= target);
            let found = lower < upper;

            let first = deque.binary_search_first(.., &target);
            let last = deque.binary_search_last(.., &target);
            if found {
                assert_eq!(first, Ok(lower));
                assert_eq!(last, Ok(upper - 1));
            } else {
                assert_eq!(first, Err(lower));
                assert_eq!(last, Err(lower));
            }
        }
    }
}

#[test]
fn sort_matches_std() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut deque: Deque<u32> = Deque::with_capacity(16);
    let mut model = Vec::new();
    for _ in 0..12 {
        let v = rng.gen_range(0..100);
        deque.push_front(v);
        model.insert(0, v);
    }

    deque.sort();
    model.sort_unstable();
    assert_eq!(deque.to_vec(), model);
}

#[test]
fn cursor_detects_growth() {
    let mut deque: Deque<u32> = Deque::with_capacity(2);
    deque.push_back(1);
    let mut cursor = deque.cursor();

    assert_eq!(cursor.advance(&deque), Ok(Some(&1)));
    deque.push_back(2);
    deque.push_back(3);
    assert_eq!(cursor.advance(&deque), Err(DequeError::Invalidated));
}
