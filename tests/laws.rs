//! Algebraic laws, checked on random subsets for both strategies.

use std::sync::Arc;

use domain_bitset::{CompactSet, Domain, DomainBitSet, DomainSet, GeneralSet, Operand};
use num_bigint::BigInt;
use proptest::prelude::*;

fn domain(size: usize) -> Arc<Domain<u32>> {
    Domain::shared(0..size as u32).unwrap()
}

/// A domain size together with two random memberships over it.
fn two_subsets() -> impl Strategy<Value = (usize, Vec<bool>, Vec<bool>)> {
    (0usize..=130).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec(any::<bool>(), size),
            prop::collection::vec(any::<bool>(), size),
        )
    })
}

fn build<S: DomainBitSet<u32>>(domain: &Arc<Domain<u32>>, membership: &[bool]) -> S {
    let elements = membership
        .iter()
        .enumerate()
        .filter(|(_, &member)| member)
        .map(|(i, _)| i as u32);
    S::from_elements(domain.clone(), elements).unwrap()
}

fn check_laws<S>(a: &S, b: &S)
where
    S: DomainBitSet<u32> + PartialEq + std::fmt::Debug,
    for<'a> &'a S: Into<Operand<'a, u32>>,
{
    let full = S::all_of(a.domain().clone()).unwrap();

    assert_eq!(a.union(b).unwrap(), b.union(a).unwrap());
    assert_eq!(a.intersect(b).unwrap(), b.intersect(a).unwrap());
    assert!(a.intersect(&a.complement()).unwrap().is_empty());
    assert_eq!(a.union(&a.complement()).unwrap(), full);
    assert_eq!(a.minus(b).unwrap(), a.intersect(&b.complement()).unwrap());
    assert_eq!(a.union(a).unwrap(), *a);
    assert_eq!(a.intersect(a).unwrap(), *a);
    assert_eq!(a.complement().complement(), *a);
    assert_eq!(a.cross(b).len(), a.len() * b.len());
}

fn check_round_trips<S: DomainBitSet<u32> + PartialEq + std::fmt::Debug>(a: &S) {
    let domain = a.domain().clone();
    assert_eq!(S::from_operand(domain.clone(), &a.to_big_int()).unwrap(), *a);
    assert_eq!(S::from_operand(domain.clone(), &a.to_bit_vec()).unwrap(), *a);
    match a.to_word() {
        Ok(word) => {
            assert!(domain.len() <= 64);
            assert_eq!(S::from_operand(domain.clone(), word).unwrap(), *a);
        }
        Err(_) => assert!(domain.len() > 64),
    }
    assert_eq!(S::from_operand(domain, &a.to_set()).unwrap(), *a);
}

proptest! {
    #[test]
    fn domain_bijection(size in 0usize..200) {
        let domain = domain(size);
        for i in 0..domain.len() {
            prop_assert_eq!(domain.index_of(domain.get(i).unwrap()), Some(i));
        }
        for element in domain.iter() {
            prop_assert_eq!(domain.get(domain.index_of(element).unwrap()).unwrap(), element);
        }
    }

    #[test]
    fn laws_domain_set((size, a, b) in two_subsets()) {
        let domain = domain(size);
        let a: DomainSet<u32> = build(&domain, &a);
        let b: DomainSet<u32> = build(&domain, &b);
        check_laws(&a, &b);
        check_round_trips(&a);
    }

    #[test]
    fn laws_general_set((size, a, b) in two_subsets()) {
        let domain = domain(size);
        let a: GeneralSet<u32> = build(&domain, &a);
        let b: GeneralSet<u32> = build(&domain, &b);
        check_laws(&a, &b);
        check_round_trips(&a);
    }

    #[test]
    fn laws_compact_set(word in any::<u64>(), other in any::<u64>(), size in 0usize..=64) {
        let domain = domain(size);
        let mask = if size == 64 { u64::MAX } else { (1u64 << size) - 1 };
        let a = CompactSet::from_word(domain.clone(), word & mask).unwrap();
        let b = CompactSet::from_word(domain, other & mask).unwrap();
        check_laws(&a, &b);
        check_round_trips(&a);
    }

    #[test]
    fn strategies_agree((size, a, b) in two_subsets()) {
        let domain = domain(size);
        let ga: GeneralSet<u32> = build(&domain, &a);
        let gb: GeneralSet<u32> = build(&domain, &b);
        let da: DomainSet<u32> = build(&domain, &a);
        let db: DomainSet<u32> = build(&domain, &b);

        let union = ga.union(&gb).unwrap();
        let union_dispatched = da.union(&db).unwrap();
        prop_assert!(union.of_equal_elements(&union_dispatched));
        prop_assert_eq!(union.to_big_int(), union_dispatched.to_big_int());

        let minus = ga.minus(&db).unwrap();
        prop_assert_eq!(minus.to_bit_vec(), da.minus(&gb).unwrap().to_bit_vec());
    }

    #[test]
    fn negative_masks_rejected(value in 1u64..) {
        let set = DomainSet::none_of(domain(8)).unwrap();
        prop_assert!(set.union(&(-BigInt::from(value))).is_err());
    }
}
