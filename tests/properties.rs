//! Property tests for shape derivation and filter algebra.

use proptest::prelude::*;
use protobloom::prelude::*;

fn prototype_of(items: &[Vec<u8>]) -> Prototype {
    let mut builder = PrototypeBuilder::new();
    for item in items {
        builder.update(item);
    }
    builder.build()
}

fn arb_items() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 0..20)
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (1u32..500, 2u32..1000).prop_map(|(n, x)| Shape::new(n, x).unwrap())
}

proptest! {
    #[test]
    fn shape_is_deterministic(n in 1u32..100_000, x in 2u32..100_000) {
        let a = Shape::new(n, x).unwrap();
        let b = Shape::new(n, x).unwrap();
        prop_assert_eq!(a, b);
        prop_assert!(a.bit_count() >= 1);
        prop_assert!(a.hash_function_count() >= 1);
        prop_assert_eq!(Shape::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn bit_positions_in_range(h1: i64, h2: i64, shape in arb_shape()) {
        let positions: Vec<usize> = HashValue::new(h1, h2).bit_positions(&shape).collect();
        prop_assert_eq!(positions.len(), shape.hash_function_count());
        for p in positions {
            prop_assert!(p < shape.bit_count());
        }
    }

    #[test]
    fn no_false_negatives(items in arb_items(), shape in arb_shape()) {
        let full = prototype_of(&items).materialize(&shape);
        for item in &items {
            let single = prototype_of(std::slice::from_ref(item)).materialize(&shape);
            prop_assert!(single.matches(&full).unwrap());
        }
    }

    #[test]
    fn merge_commutative_and_associative(
        a in arb_items(),
        b in arb_items(),
        c in arb_items(),
        shape in arb_shape(),
    ) {
        let fa = prototype_of(&a).materialize(&shape);
        let fb = prototype_of(&b).materialize(&shape);
        let fc = prototype_of(&c).materialize(&shape);

        prop_assert_eq!(fa.merge(&fb).unwrap(), fb.merge(&fa).unwrap());
        prop_assert_eq!(
            fa.merge(&fb).unwrap().merge(&fc).unwrap(),
            fa.merge(&fb.merge(&fc).unwrap()).unwrap()
        );
    }

    #[test]
    fn materialize_distributes_over_merge(a in arb_items(), b in arb_items(), shape in arb_shape()) {
        let pa = prototype_of(&a);
        let pb = prototype_of(&b);

        prop_assert_eq!(
            pa.merge(&pb).materialize(&shape),
            pa.materialize(&shape).merge(&pb.materialize(&shape)).unwrap()
        );
    }

    #[test]
    fn distance_symmetric(a in arb_items(), b in arb_items(), shape in arb_shape()) {
        let fa = prototype_of(&a).materialize(&shape);
        let fb = prototype_of(&b).materialize(&shape);

        prop_assert_eq!(fa.distance(&fb).unwrap(), fb.distance(&fa).unwrap());
        prop_assert_eq!(fa.distance(&fa).unwrap(), 0);
    }

    #[test]
    fn match_reflexive_and_inverse(a in arb_items(), b in arb_items(), shape in arb_shape()) {
        let fa = prototype_of(&a).materialize(&shape);
        let fb = prototype_of(&b).materialize(&shape);

        prop_assert!(fa.matches(&fa).unwrap());
        prop_assert_eq!(fa.matches(&fb).unwrap(), fb.inverse_matches(&fa).unwrap());
    }

    #[test]
    fn counting_merge_remove_round_trip(a in arb_items(), b in arb_items(), shape in arb_shape()) {
        let counting = prototype_of(&a).counting(&shape);
        let other = prototype_of(&b).materialize(&shape);

        let round_trip = counting.merge(&other).unwrap().remove(&other).unwrap();
        prop_assert_eq!(round_trip, counting);
    }

    #[test]
    fn counting_bits_reflect_counts(a in arb_items(), shape in arb_shape()) {
        let prototype = prototype_of(&a);
        let counting = prototype.counting(&shape);

        prop_assert_eq!(counting.as_concrete(), &prototype.materialize(&shape));
        prop_assert_eq!(counting.hamming_weight(), counting.num_counts());
        for (index, count) in counting.counts() {
            prop_assert!(count > 0);
            prop_assert!(counting.bit_vec().get(index));
        }
    }

    #[test]
    fn log2_bounded_by_highest_bit(a in arb_items(), shape in arb_shape()) {
        let filter = prototype_of(&a).materialize(&shape);
        let log = filter.approximate_log2();

        match filter.bit_vec().highest_set_bit() {
            None => prop_assert_eq!(log, 0.0),
            Some(h) => {
                prop_assert!(log >= h as f64);
                prop_assert!(log < h as f64 + 1.0);
            }
        }
    }
}
