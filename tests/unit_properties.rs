//! Unit tests for the property oracle and morphism search

use lalgebras::{
    automorphisms, direct_product, endomorphisms, endomorphisms_within, find_counterexample,
    find_isomorphism, is_discrete, is_isomorphic, is_linear, is_morphism, is_prime, Algebra,
    EnumerationLimits, LAlgebraError, Properties, Property,
};

#[test]
fn test_prime_scenarios() {
    assert!(is_prime(&Algebra::new(&[vec![2, 2], vec![1, 2]], true).unwrap()));
    let a = Algebra::new(&[vec![3, 1, 3], vec![3, 3, 3], vec![1, 2, 3]], true).unwrap();
    assert!(!is_prime(&a));
}

#[test]
fn test_chain_summaries() {
    let goedel = Properties::of(&Algebra::chain(4).unwrap());
    assert!(goedel.linear && goedel.hilbert && goedel.sharp && goedel.prime);
    assert!(!goedel.discrete);

    let luk = Properties::of(&Algebra::lukasiewicz(4).unwrap());
    assert!(luk.linear && luk.symmetric && luk.regular && luk.cl);
    assert!(!luk.hilbert && !luk.sharp && !luk.prime);
}

#[test]
fn test_trivial_algebra_has_every_property() {
    let t = Algebra::trivial();
    for property in Property::ALL {
        assert!(property.holds(&t), "{} fails on the trivial algebra", property);
        assert_eq!(find_counterexample(&t, property), None);
    }
}

#[test]
fn test_boolean_square_is_not_linear() {
    let b = Algebra::boolean2();
    let square = direct_product(&b, &Algebra::boolean2());
    assert!(!is_linear(&square));
    // The two incomparable middle elements
    assert_eq!(find_counterexample(&square, Property::Linear), Some(vec![2, 3]));
    assert!(!is_discrete(&Algebra::chain(3).unwrap()));
}

#[test]
fn test_endomorphisms_of_small_chains() {
    let a = Algebra::chain(3).unwrap();
    let found = endomorphisms(&a);
    // Every endomorphism fixes the unit
    assert!(found.iter().all(|f| f[2] == 3));
    assert!(found.contains(&vec![1, 2, 3]));
    assert!(found.contains(&vec![3, 3, 3]));
    for f in &found {
        assert!(is_morphism(f, &a, &a).unwrap());
    }
    assert_eq!(automorphisms(&a), vec![vec![1, 2, 3]]);
}

#[test]
fn test_bounded_endomorphism_search() {
    let a = Algebra::chain(4).unwrap();
    let limits = EnumerationLimits {
        max_subset_size: 20,
        max_function_size: 3,
    };
    assert!(matches!(
        endomorphisms_within(&a, &limits),
        Err(LAlgebraError::EnumerationTooLarge { size: 4, limit: 3, .. })
    ));
    assert!(endomorphisms_within(&Algebra::chain(3).unwrap(), &limits).is_ok());
}

#[test]
fn test_isomorphism_search() {
    let a = Algebra::lukasiewicz(4).unwrap();
    let b = a.relabeled(&[4, 2, 1, 3]).unwrap();
    let f = find_isomorphism(&a, &b).unwrap();
    assert!(is_morphism(&f, &a, &b).unwrap());
    assert!(is_isomorphic(&b, &a));

    assert!(!is_isomorphic(&a, &Algebra::chain(4).unwrap()));
    assert!(!is_isomorphic(&a, &Algebra::lukasiewicz(3).unwrap()));
}
