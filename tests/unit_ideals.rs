//! Unit tests for subalgebras, ideals and the prime spectrum

use lalgebras::{
    direct_product, ideal_generated_by, ideal_product, ideals, ideals_within, is_ideal,
    is_invariant, is_prime_ideal, is_subalgebra, semidirect_product, spec,
    subalgebra_generated_by, Algebra, ElementSet, EnumerationLimits, LAlgebraError,
};

fn set(a: &Algebra, labels: &[usize]) -> ElementSet {
    ElementSet::from_values(a, labels).unwrap()
}

fn values(sets: &[ElementSet]) -> Vec<Vec<usize>> {
    sets.iter().map(|s| s.values()).collect()
}

#[test]
fn test_chain_spectrum() {
    let a = Algebra::chain(3).unwrap();
    assert_eq!(values(&ideals(&a)), vec![vec![3], vec![2, 3], vec![1, 2, 3]]);
    assert_eq!(values(&spec(&a)), vec![vec![3], vec![2, 3]]);
    assert!(is_prime_ideal(&set(&a, &[2, 3]), &a).unwrap());
    // The whole carrier is never prime
    assert!(!is_prime_ideal(&ElementSet::full(&a), &a).unwrap());
}

#[test]
fn test_lukasiewicz_chain_is_simple() {
    let a = Algebra::lukasiewicz(3).unwrap();
    assert_eq!(values(&ideals(&a)), vec![vec![3], vec![1, 2, 3]]);
    assert_eq!(values(&spec(&a)), vec![vec![3]]);
}

#[test]
fn test_unit_generates_itself() {
    for a in [
        Algebra::trivial(),
        Algebra::chain(4).unwrap(),
        Algebra::lukasiewicz(5).unwrap(),
    ] {
        let unit = ElementSet::unit(&a);
        assert_eq!(ideal_generated_by(&unit, &a).unwrap(), unit);
        assert_eq!(subalgebra_generated_by(&unit, &a).unwrap(), unit);
        assert_eq!(
            ideal_generated_by(&ElementSet::empty(&a), &a).unwrap(),
            unit
        );
    }
}

#[test]
fn test_subalgebra_membership_and_generation() {
    let a = Algebra::chain(3).unwrap();
    assert!(is_subalgebra(&set(&a, &[1, 3]), &a).unwrap());
    assert!(!is_subalgebra(&set(&a, &[1]), &a).unwrap());
    assert_eq!(
        subalgebra_generated_by(&set(&a, &[1]), &a).unwrap().values(),
        vec![1, 3]
    );

    let l = Algebra::lukasiewicz(3).unwrap();
    assert_eq!(
        subalgebra_generated_by(&set(&l, &[2]), &l).unwrap().values(),
        vec![2, 3]
    );
}

#[test]
fn test_invariant_sets() {
    let a = Algebra::chain(3).unwrap();
    // x·y is either the top or y in a Gödel chain
    assert!(is_invariant(&set(&a, &[1, 3]), &a).unwrap());
    assert!(is_invariant(&set(&a, &[2, 3]), &a).unwrap());
    assert!(!is_invariant(&set(&a, &[1]), &a).unwrap());
    // Invariant but not an ideal
    assert!(!is_ideal(&set(&a, &[1, 3]), &a).unwrap());
}

#[test]
fn test_ideal_products() {
    let a = Algebra::chain(3).unwrap();
    let top = set(&a, &[3]);
    let middle = set(&a, &[2, 3]);
    let all = ElementSet::full(&a);
    assert_eq!(ideal_product(&middle, &top).unwrap().values(), vec![3]);
    assert_eq!(ideal_product(&all, &middle).unwrap().values(), vec![2, 3]);

    let other = Algebra::chain(3).unwrap();
    assert!(matches!(
        ideal_product(&middle, &set(&other, &[3])),
        Err(LAlgebraError::CrossAlgebraMismatch { .. })
    ));
}

#[test]
fn test_foreign_sets_are_not_subsets() {
    let a = Algebra::chain(3).unwrap();
    let b = Algebra::chain(3).unwrap();
    assert!(matches!(
        is_ideal(&set(&b, &[2, 3]), &a),
        Err(LAlgebraError::NotASubset { element: 2, .. })
    ));
    assert!(matches!(
        ideal_generated_by(&set(&b, &[1]), &a),
        Err(LAlgebraError::NotASubset { element: 1, .. })
    ));
}

#[test]
fn test_bounded_ideal_enumeration() {
    let a = Algebra::chain(3).unwrap();
    let limits = EnumerationLimits {
        max_subset_size: 2,
        max_function_size: 8,
    };
    assert!(matches!(
        ideals_within(&a, &limits),
        Err(LAlgebraError::EnumerationTooLarge { what: "subset", size: 3, limit: 2 })
    ));
    assert_eq!(
        ideals_within(&a, &EnumerationLimits::default()).unwrap().len(),
        3
    );
}

#[test]
fn test_twisted_product_spectrum() {
    let b = Algebra::boolean2();
    let square = direct_product(&b, &Algebra::boolean2());
    let rho = vec![vec![1, 3, 2, 4], vec![1, 2, 3, 4]];
    let s = semidirect_product(&square, &b, &rho).unwrap();
    assert_eq!(
        values(&ideals(&s)),
        vec![vec![8], vec![2, 4, 6, 8], (1..=8).collect::<Vec<usize>>()]
    );
    // The fibre over the actor's unit
    assert_eq!(values(&spec(&s)), vec![vec![8], vec![2, 4, 6, 8]]);
}
