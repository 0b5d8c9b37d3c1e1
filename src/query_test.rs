use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeMap;

#[test]
fn test_scenario() {
    let mut index: RBTree<i64, i64> = RBTree::from_sorted(vec![(1, 1), (2, 1), (3, 1)]).unwrap();
    assert_eq!(index.verify(), (true, 2));

    assert_eq!(index.increase(4, 2), 2);
    assert_eq!(index.range_sum::<i64>(&1, &3), 3);
    assert_eq!(index.successor(&2), Some((&3, &1)));
    assert_eq!(index.predecessor(&2), Some((&1, &1)));
    assert_eq!(index.decrease(&2, 1), 0);
    assert_eq!(index.count(&2), 0);
    assert_eq!(index.len(), 3);
    assert!(index.verify().0);
}

#[test]
fn test_increase_decrease() {
    let mut index: RBTree<i64, i64> = RBTree::new();
    assert_eq!(index.decrease(&5, 10), 0);
    assert!(index.is_empty());

    assert_eq!(index.increase(5, 10), 10);
    assert_eq!(index.increase(5, 3), 13);
    assert_eq!(index.decrease(&5, 4), 9);
    assert_eq!(index.count(&5), 9);

    // exactly zero removes the entry
    assert_eq!(index.decrease(&5, 9), 0);
    assert_eq!(index.get(&5), None);

    assert_eq!(index.increase(6, 1), 1);
    assert_eq!(index.decrease(&6, 100), 0);
    assert!(index.is_empty());
    assert!(index.nil.is_detached());
}

#[test]
fn test_neighbours() {
    let index: RBTree<i64, i64> = RBTree::new();
    assert_eq!(index.successor(&0), None);
    assert_eq!(index.predecessor(&0), None);
    assert_eq!(index.range_sum::<i64>(&i64::MIN, &i64::MAX), 0);

    let items: Vec<(i64, i64)> = (0..50).map(|i| (i * 10, i)).collect();
    let index = RBTree::from_sorted(items).unwrap();

    assert_eq!(index.successor(&-1), Some((&0, &0)));
    assert_eq!(index.successor(&0), Some((&10, &1)));
    assert_eq!(index.successor(&15), Some((&20, &2)));
    assert_eq!(index.successor(&490), None);
    assert_eq!(index.successor(&1000), None);

    assert_eq!(index.predecessor(&0), None);
    assert_eq!(index.predecessor(&-50), None);
    assert_eq!(index.predecessor(&15), Some((&10, &1)));
    assert_eq!(index.predecessor(&20), Some((&10, &1)));
    assert_eq!(index.predecessor(&491), Some((&490, &49)));

    assert_eq!(index.range_sum::<i64>(&0, &490), (0..50).sum::<i64>());
    assert_eq!(index.range_sum::<i64>(&11, &19), 0);
    assert_eq!(index.range_sum::<i64>(&10, &10), 1);
    assert_eq!(index.range_sum::<i64>(&-100, &25), 3);
    assert_eq!(index.range_sum::<i64>(&30, &20), 0);
}

#[test]
fn test_range_sum_widen() {
    let items = vec![(1_i64, i64::MAX), (2, i64::MAX), (3, 1)];
    let index = RBTree::from_sorted(items).unwrap();
    let sum = index.range_sum::<i128>(&1, &3);
    assert_eq!(sum, (i64::MAX as i128) * 2 + 1);
}

#[test]
fn test_query() {
    let seed: u64 = random();
    // let seed: u64 = 4216119040178420139;
    println!("test_query seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let items: Vec<(i16, i64)> = (0..1000).map(|i| (i * 3, 1 + (i as i64 % 7))).collect();
    let mut index: RBTree<i16, i64> = RBTree::from_sorted(items.clone()).unwrap();
    let mut btmap: BTreeMap<i16, i64> = items.into_iter().collect();

    let mut counts = [0_usize; 6];

    for _i in 0..100_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op = uns.arbitrary().unwrap();
        match op {
            Op::Increase(key, n) => {
                counts[0] += 1;
                let (key, n) = (key_of(key), i64::from(n));
                let refv = *btmap.entry(key).and_modify(|v| *v += n).or_insert(n);
                assert_eq!(index.increase(key, n), refv, "increase {}", key);
                index.validate().unwrap();
            }
            Op::Decrease(key, n) => {
                counts[1] += 1;
                let (key, n) = (key_of(key), i64::from(n));
                let refv = match btmap.get(&key).copied() {
                    None => 0,
                    Some(v) if v - n <= 0 => {
                        btmap.remove(&key);
                        0
                    }
                    Some(v) => {
                        btmap.insert(key, v - n);
                        v - n
                    }
                };
                let len = index.len();
                assert_eq!(index.decrease(&key, n), refv, "decrease {}", key);
                assert_eq!(index.len(), btmap.len());
                assert!(index.len() == len || index.len() + 1 == len);
                index.validate().unwrap();
            }
            Op::Count(key) => {
                counts[2] += 1;
                let key = key_of(key);
                let refv = btmap.get(&key).copied().unwrap_or(0);
                assert_eq!(index.count(&key), refv, "count {}", key);
            }
            Op::RangeSum(a, b) => {
                counts[3] += 1;
                let (a, b) = (key_of(a), key_of(b));
                let (low, high) = (a.min(b), a.max(b));
                let refv: i64 = btmap.range(low..=high).map(|(_, v)| *v).sum();
                assert_eq!(index.range_sum::<i64>(&low, &high), refv);
            }
            Op::Successor(key) => {
                counts[4] += 1;
                let key = key_of(key);
                let refv = btmap.iter().find(|(k, _)| **k > key);
                assert_eq!(index.successor(&key), refv, "successor {}", key);
            }
            Op::Predecessor(key) => {
                counts[5] += 1;
                let key = key_of(key);
                let refv = btmap.iter().rev().find(|(k, _)| **k < key);
                assert_eq!(index.predecessor(&key), refv, "predecessor {}", key);
            }
        }
    }

    let a: Vec<(i16, i64)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    let b: Vec<(i16, i64)> = btmap.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(a, b);

    println!("counts {:?} len:{}/{}", counts, index.len(), btmap.len());
}

// spread generated keys slightly beyond the loaded key space.
fn key_of(key: u16) -> i16 {
    (key % 3200) as i16 - 50
}

#[derive(Debug, Arbitrary)]
enum Op {
    Increase(u16, u8),
    Decrease(u16, u8),
    Count(u16),
    RangeSum(u16, u16),
    Successor(u16),
    Predecessor(u16),
}
