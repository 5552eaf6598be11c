//! Unit tests for products, actions and normal form

use lalgebras::{
    check_algebra, direct_product, direct_product_all, is_action, is_isomorphic, normal_form,
    normal_form_permutation, product_coordinates, semidirect_product, ActionViolation, Algebra,
    LAlgebraError,
};

#[test]
fn test_direct_product_of_two_element_algebras() {
    let a = Algebra::new(&[vec![2, 2], vec![1, 2]], true).unwrap();
    let b = Algebra::new(&[vec![2, 2], vec![1, 2]], true).unwrap();
    let p = direct_product(&a, &b);
    assert_eq!(p.size(), 4);
    assert_eq!(p.logical_unit().value(), 4);
    assert!(check_algebra(&p.table().rows()));
}

#[test]
fn test_direct_product_is_coordinatewise() {
    let a = Algebra::chain(3).unwrap();
    let b = Algebra::lukasiewicz(2).unwrap();
    let p = direct_product(&a, &b);
    for x in 1..=6 {
        for y in 1..=6 {
            let z = p.element(x).unwrap().multiply(&p.element(y).unwrap()).unwrap();
            let (xi, xj) = product_coordinates(x, 2).unwrap();
            let (yi, yj) = product_coordinates(y, 2).unwrap();
            let (zi, zj) = product_coordinates(z.value(), 2).unwrap();
            let ai = a.element(xi).unwrap().multiply(&a.element(yi).unwrap()).unwrap();
            let bj = b.element(xj).unwrap().multiply(&b.element(yj).unwrap()).unwrap();
            assert_eq!((zi, zj), (ai.value(), bj.value()));
        }
    }
}

#[test]
fn test_product_layout_puts_second_factor_fastest() {
    let a = Algebra::chain(3).unwrap();
    let b = Algebra::lukasiewicz(3).unwrap();
    let (ra, rb) = (a.table().rows(), b.table().rows());
    let m = 3;
    let mut expected = vec![vec![0; 9]; 9];
    for i1 in 1..=3 {
        for j1 in 1..=3 {
            for i2 in 1..=3 {
                for j2 in 1..=3 {
                    let x = ra[i1 - 1][i2 - 1];
                    let y = rb[j1 - 1][j2 - 1];
                    expected[m * (i1 - 1) + j1 - 1][m * (i2 - 1) + j2 - 1] = m * (x - 1) + y;
                }
            }
        }
    }
    let p = direct_product(&a, &b);
    assert_eq!(p.table().rows(), expected);
    assert_eq!(p.table().rows()[1], vec![8, 9, 9, 8, 9, 9, 8, 9, 9]);
    assert_eq!(p.table().rows()[3], vec![3, 3, 3, 9, 9, 9, 9, 9, 9]);
    assert_eq!(product_coordinates(2, 3), Some((1, 2)));
}

#[test]
fn test_variadic_product() {
    let b = Algebra::boolean2();
    let cube = direct_product_all(&[b.clone(), b.clone(), b]);
    assert_eq!(cube.size(), 8);
    assert_eq!(cube.logical_unit().value(), 8);
    assert!(check_algebra(&cube.table().rows()));
}

#[test]
fn test_action_coherence_failure_names_witnesses() {
    // The Gödel 3-chain acting on the two-element algebra; element 2 collapses
    let actor = Algebra::chain(3).unwrap();
    let b = Algebra::boolean2();
    let rho = vec![vec![1, 2], vec![2, 2], vec![1, 2]];
    match is_action(&actor, &b, &rho) {
        Err(LAlgebraError::InvalidAction(ActionViolation::Incoherent { u, v, i })) => {
            assert_eq!((u, v, i), (1, 2, 1));
        }
        other => panic!("expected a coherence failure, got {other:?}"),
    }
}

#[test]
fn test_semidirect_rejects_bad_action() {
    let a = Algebra::chain(3).unwrap();
    let b = Algebra::boolean2();
    assert!(matches!(
        semidirect_product(&a, &b, &[vec![1, 2]]),
        Err(LAlgebraError::InvalidAction(ActionViolation::WrongLength { .. }))
    ));
    assert!(matches!(
        semidirect_product(&a, &b, &[vec![1, 2], vec![1, 2, 3]]),
        Err(LAlgebraError::InvalidAction(ActionViolation::SlotLength { slot: 1, expected: 3, got: 2 }))
    ));
}

#[test]
fn test_normal_form_of_relabeled_chain() {
    let a = Algebra::chain(4).unwrap();
    let shuffled = a.relabeled(&[4, 1, 3, 2]).unwrap();
    assert_ne!(shuffled, a);
    assert_eq!(normal_form(&shuffled), a);
    assert_eq!(normal_form_permutation(&shuffled), vec![2, 4, 3, 1]);
}

#[test]
fn test_normal_form_keeps_isomorphism_class() {
    let b = Algebra::boolean2();
    let square = direct_product(&b, &Algebra::lukasiewicz(3).unwrap());
    let nf = normal_form(&square);
    assert!(is_isomorphic(&nf, &square));
    assert_eq!(nf.logical_unit().value(), nf.size());
    assert_eq!(normal_form(&nf), nf);
}
