//! End-to-end scenarios for domains and bit-sets.
//!
//! Tests cover the planet scenario, domain equality, word-size boundaries,
//! conversion agreement, and relational composition.

use std::collections::HashSet;
use std::sync::Arc;

use bitvec::prelude::*;
use domain_bitset::{CompactSet, Domain, DomainBitSet, DomainError, DomainSet, GeneralSet, Pair, Strategy};
use num_bigint::BigInt;

const PLANETS: [&str; 8] = ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"];

fn planets() -> Arc<Domain<&'static str>> {
    Domain::shared(PLANETS).unwrap()
}

// ─── Planet Scenario ───────────────────────────────────────────────────────────

#[test]
fn planets_all_of() {
    let all = DomainSet::all_of(planets()).unwrap();
    assert_eq!(all.to_word(), Ok(0b1111_1111));
}

#[test]
fn planets_minus_earth() {
    let all = DomainSet::all_of(planets()).unwrap();
    let res = all.minus(&["Earth"]).unwrap();
    assert_eq!(res.to_word(), Ok(0b1111_1011));
}

#[test]
fn planets_none_union_mars() {
    let domain = planets();
    let none = DomainSet::none_of(domain.clone()).unwrap();
    let mars = DomainSet::just(domain, "Mars").unwrap();
    assert_eq!(none.union(&mars).unwrap(), mars);
}

#[test]
fn planets_same_results_for_every_strategy() {
    let domain = planets();
    let compact = CompactSet::all_of(domain.clone()).unwrap().minus(&["Earth"]).unwrap();
    let general = GeneralSet::all_of(domain).unwrap().minus(&["Earth"]).unwrap();
    assert_eq!(compact.to_word(), general.to_word());
    assert_eq!(compact.to_big_int(), general.to_big_int());
    assert_eq!(compact.to_bit_vec(), general.to_bit_vec());
    assert_eq!(compact.to_set(), general.to_set());
}

// ─── Domain Equality ───────────────────────────────────────────────────────────

#[test]
fn domains_equal_in_same_order() {
    let list = vec!["a", "b", "c"];
    let a = Domain::new(list.clone()).unwrap();
    let b = Domain::new(list.clone()).unwrap();
    assert_eq!(a, b);

    let reversed = Domain::new(list.into_iter().rev()).unwrap();
    assert_ne!(a, reversed);
}

#[test]
fn sets_over_reversed_domains_differ() {
    let a = CompactSet::all_of(Domain::shared(["a", "b", "c"]).unwrap()).unwrap();
    let b = CompactSet::all_of(Domain::shared(["c", "b", "a"]).unwrap()).unwrap();
    assert_ne!(a, b);
    assert!(a.of_equal_elements(&b));
    assert!(!a.of_equal_domain(&b));
}

// ─── Word Boundary ─────────────────────────────────────────────────────────────

#[test]
fn word_form_at_64() {
    let domain = Domain::shared(0..64u32).unwrap();
    let set = DomainSet::from_operand(domain.clone(), u64::MAX).unwrap();
    assert_eq!(set.strategy(), Strategy::Compact);
    assert!(set.is_full());
    assert_eq!(set.to_word(), Ok(u64::MAX));

    let general = GeneralSet::from_operand(domain, 1u64 << 63).unwrap();
    assert_eq!(general.to_word(), Ok(1 << 63));
}

#[test]
fn word_form_at_65() {
    let domain = Domain::shared(0..65u32).unwrap();
    let overflow = Err(DomainError::WordOverflow { size: 65 });

    let empty = DomainSet::none_of(domain.clone()).unwrap();
    assert_eq!(empty.to_word(), overflow);
    assert_eq!(empty.union(0u64).err(), Some(DomainError::WordOverflow { size: 65 }));

    for element in domain.iter() {
        let single = DomainSet::just(domain.clone(), *element).unwrap();
        assert_eq!(single.to_word(), overflow);
    }

    // Other forms still work.
    let full = empty.complement();
    assert_eq!(full.len(), 65);
    assert_eq!(full.to_big_int(), (BigInt::from(1) << 65) - 1);
    assert_eq!(full.to_bit_vec(), bitvec![u64, Lsb0; 1; 65]);
}

// ─── Conversions ───────────────────────────────────────────────────────────────

#[test]
fn conversions_agree_bit_for_bit() {
    let domain = Domain::shared(0..130u32).unwrap();
    let set = DomainSet::from_elements(domain.clone(), [0, 63, 64, 65, 129]).unwrap();

    let big = set.to_big_int();
    let bits = set.to_bit_vec();
    assert_eq!(bits.len(), 130);
    for i in 0..130 {
        let member = set.contains(&(i as u32));
        assert_eq!(bits[i], member);
        assert_eq!(big.bit(i as u64), member);
    }

    assert_eq!(DomainSet::from_operand(domain.clone(), &big).unwrap(), set);
    assert_eq!(DomainSet::from_operand(domain, &bits).unwrap(), set);
}

#[test]
fn zip_with_position_is_ordered() {
    let domain = planets();
    let set = DomainSet::from_elements(domain, ["Neptune", "Venus", "Mars"]).unwrap();
    let zipped = set.zip_with_position();
    assert_eq!(
        zipped,
        vec![Pair::new(1, "Venus"), Pair::new(3, "Mars"), Pair::new(7, "Neptune")]
    );
}

#[test]
fn generic_set_forgets_domain() {
    let set = DomainSet::from_elements(planets(), ["Earth", "Mars"]).unwrap();
    let plain: HashSet<&str> = set.to_set();
    assert_eq!(plain, ["Earth", "Mars"].into_iter().collect::<HashSet<_>>());

    let other = Domain::shared(["Mars", "Earth", "Moon"]).unwrap();
    let rebuilt = DomainSet::from_operand(other, &plain).unwrap();
    assert!(rebuilt.of_equal_elements(&set));
    assert_ne!(rebuilt, set);
}

// ─── Relational Composition ────────────────────────────────────────────────────

#[test]
fn cross_cardinality() {
    let a = DomainSet::from_elements(planets(), ["Earth", "Mars", "Venus"]).unwrap();
    let b = DomainSet::of(1..=4u8).unwrap();
    let product = a.cross(&b);
    assert_eq!(product.len(), 12);
    assert!(product.contains(&Pair::new("Mars", 3)));

    let empty = DomainSet::none_of(planets()).unwrap();
    assert!(empty.cross(&b).is_empty());
    assert!(a.cross(&b.complement()).is_empty());
}

#[test]
fn cross_order_is_outer_left() {
    let a = DomainSet::from_elements(planets(), ["Mars", "Earth"]).unwrap();
    let b = DomainSet::of(['x', 'y']).unwrap();
    let mut calls = Vec::new();
    let n = a.cross_with(&b, |p, q| calls.push(format!("{}{}", p, q)));
    assert_eq!(n, 4);
    assert_eq!(calls, vec!["Earthx", "Earthy", "Marsx", "Marsy"]);
}

#[test]
fn semijoin_keeps_left_domain() {
    let domain = planets();
    let left = DomainSet::all_of(domain.clone()).unwrap();
    let lengths = DomainSet::of([4usize, 5]).unwrap();

    let res = left.semijoin(&lengths, |planet, len| planet.len() == *len);
    assert!(Arc::ptr_eq(res.domain(), &domain));
    assert_eq!(res.iter().copied().collect::<Vec<_>>(), vec!["Venus", "Earth", "Mars"]);

    let none = left.semijoin(&lengths, |_, _| false);
    assert!(none.is_empty());
}

// ─── Rebinding ─────────────────────────────────────────────────────────────────

#[test]
fn rebind_to_equal_domain() {
    let canonical = planets();
    let copy = Domain::shared(PLANETS).unwrap();
    let set = DomainSet::from_elements(copy, ["Saturn"]).unwrap();

    let rebound = set.rebind(canonical.clone()).unwrap();
    assert!(Arc::ptr_eq(rebound.domain(), &canonical));
    assert_eq!(rebound, set);

    let other = Domain::shared(["Saturn"]).unwrap();
    assert_eq!(set.rebind(other).err(), Some(DomainError::DomainMismatch));
}
