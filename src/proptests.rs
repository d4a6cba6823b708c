use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{HashMap, HashSet};

type Map3 = NestedMap3<u8, u8, u8, u16>;

/// Flat model of a three-level map.
///
/// Intermediate nodes are tracked separately from values because removing
/// a value leaves its (possibly empty) parents in place.
#[derive(Default)]
struct Model {
    values: HashMap<(u8, u8, u8), u16>,
    level2: HashSet<(u8, u8)>,
    level1: HashSet<u8>,
}

impl Model {
    fn remove_level2(&mut self, a: u8, b: u8) -> bool {
        self.values.retain(|&(x, y, _), _| (x, y) != (a, b));
        self.level2.remove(&(a, b))
    }

    fn remove_level1(&mut self, a: u8) -> bool {
        self.values.retain(|&(x, _, _), _| x != a);
        self.level2.retain(|&(x, _)| x != a);
        self.level1.remove(&a)
    }

    fn prune(&mut self) -> usize {
        let before = self.level1.len() + self.level2.len();
        let values = &self.values;
        self.level2
            .retain(|&(a, b)| values.keys().any(|&(x, y, _)| (x, y) == (a, b)));
        let level2 = &self.level2;
        self.level1.retain(|&a| level2.iter().any(|&(x, _)| x == a));
        before - self.level1.len() - self.level2.len()
    }
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Add(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
        u16,
    ),
    Get(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
    ),
    Remove(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
    ),
    ContainsLevel2(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
    ),
    RemoveLevel2(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
    ),
    RemoveLevel1(#[proptest(strategy = "0u8..4")] u8),
    Vivify(
        #[proptest(strategy = "0u8..4")] u8,
        #[proptest(strategy = "0u8..4")] u8,
    ),
    Prune,
}

fn validate_map(m: &Map3, model: &Model) {
    assert_eq!(m.len(), model.level1.len(), "level-1 key count");
    assert_eq!(m.value_count(), model.values.len(), "value count");

    let mut level2 = 0usize;
    for (a, children) in m {
        assert!(model.level1.contains(a));
        for (b, leaves) in children {
            assert!(model.level2.contains(&(*a, *b)));
            level2 += 1;
            for (c, v) in leaves {
                assert_eq!(model.values.get(&(*a, *b, *c)), Some(v));
            }
        }
    }
    assert_eq!(level2, model.level2.len(), "level-2 node count");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut m = Map3::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Add(a, b, c, v) => {
                    let got = m.add((a, b, c), v);
                    model.level1.insert(a);
                    model.level2.insert((a, b));
                    if model.values.contains_key(&(a, b, c)) {
                        prop_assert_eq!(got, Err(Error::DuplicateKey));
                    } else {
                        prop_assert_eq!(got, Ok(()));
                        model.values.insert((a, b, c), v);
                    }
                }
                Op::Get(a, b, c) => {
                    prop_assert_eq!(
                        m.try_get((&a, &b, &c)).copied(),
                        model.values.get(&(a, b, c)).copied()
                    );
                    prop_assert_eq!(
                        m.contains_key((&a, &b, &c)),
                        model.values.contains_key(&(a, b, c))
                    );
                }
                Op::Remove(a, b, c) => {
                    prop_assert_eq!(m.remove((&a, &b, &c)), model.values.remove(&(a, b, c)));
                }
                Op::ContainsLevel2(a, b) => {
                    prop_assert_eq!(m.contains_key((&a, &b)), model.level2.contains(&(a, b)));
                    prop_assert_eq!(m.contains_key(&a), model.level1.contains(&a));
                }
                Op::RemoveLevel2(a, b) => {
                    prop_assert_eq!(m.remove((&a, &b)).is_some(), model.remove_level2(a, b));
                }
                Op::RemoveLevel1(a) => {
                    prop_assert_eq!(m.remove(&a).is_some(), model.remove_level1(a));
                }
                Op::Vivify(a, b) => {
                    m.get_or_create(a).get_or_create(b);
                    model.level1.insert(a);
                    model.level2.insert((a, b));
                }
                Op::Prune => {
                    prop_assert_eq!(m.prune_empty(), model.prune());
                }
            }
        }

        validate_map(&m, &model);
        for v in model.values.values() {
            prop_assert!(m.contains_value(v));
        }
    }

    #[test]
    fn prop_add_then_get(
        chains in prop::collection::hash_map(
            (any::<u16>(), any::<u8>(), any::<bool>(), any::<u8>()),
            any::<u32>(),
            0..200,
        )
    ) {
        let mut m: NestedMap4<u16, u8, bool, u8, u32> = NestedMap4::new();
        for (&(a, b, c, d), &v) in &chains {
            prop_assert_eq!(m.add((a, b, c, d), v), Ok(()));
        }
        for (&(a, b, c, d), &v) in &chains {
            prop_assert_eq!(m.try_get((&a, &b, &c, &d)), Some(&v));
            prop_assert!(m.contains_key((&a, &b)));
            prop_assert!(m.contains_key((&a, &b, &c)));
        }
        prop_assert_eq!(m.value_count(), chains.len());
    }

    #[test]
    fn prop_grouping_matches_input(
        rows in prop::collection::hash_set((0u8..8, 0u8..8, 0u8..8), 0..100)
    ) {
        let rows: Vec<(u8, u8, u8)> = rows.into_iter().collect();
        let m = rows
            .iter()
            .to_nested_map(
                (|r: &&(u8, u8, u8)| r.0, |r: &&(u8, u8, u8)| r.1, |r: &&(u8, u8, u8)| r.2),
                |r| *r,
            )
            .unwrap();
        prop_assert_eq!(m.value_count(), rows.len());
        for r in &rows {
            prop_assert_eq!(m.try_get((&r.0, &r.1, &r.2)), Some(r));
        }
    }
}

#[test]
fn seeded_random_workload() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x6e65_7374);
    let mut m: NestedMap5<u8, u8, u8, u8, u8, u64> = NestedMap5::new();
    let mut flat: HashMap<(u8, u8, u8, u8, u8), u64> = HashMap::new();

    for i in 0..20_000u64 {
        let k: (u8, u8, u8, u8, u8) = (
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
        );
        if rng.gen_bool(0.7) {
            let expected = if flat.contains_key(&k) {
                Err(Error::DuplicateKey)
            } else {
                flat.insert(k, i);
                Ok(())
            };
            assert_eq!(m.add(k, i), expected);
        } else {
            assert_eq!(m.remove((&k.0, &k.1, &k.2, &k.3, &k.4)), flat.remove(&k));
        }
    }

    assert_eq!(m.value_count(), flat.len());
    for (k, v) in &flat {
        assert_eq!(m.try_get((&k.0, &k.1, &k.2, &k.3, &k.4)), Some(v));
    }

    m.prune_empty();
    assert_eq!(m.value_count(), flat.len());
    assert_eq!(m.prune_empty(), 0);
    for (k, v) in &flat {
        assert_eq!(m.try_get((&k.0, &k.1, &k.2, &k.3, &k.4)), Some(v));
    }
}
