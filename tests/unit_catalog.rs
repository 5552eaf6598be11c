//! Unit tests for the algebra catalog and its persistence

use lalgebras::{Algebra, AlgebraCatalog, Catalog, Config, LAlgebraError, Table};
use tempfile::tempdir;

#[test]
fn test_builtin_sizes() {
    let catalog = Catalog::new();
    assert_eq!(catalog.count(1), Some(1));
    assert_eq!(catalog.count(2), Some(1));
    assert_eq!(catalog.count(3), None);

    let two = Algebra::from_catalog(&catalog, 2, 1).unwrap();
    assert_eq!(two.table().rows(), vec![vec![2, 2], vec![1, 2]]);
    assert_eq!(Algebra::from_catalog(&catalog, 1, 1).unwrap().size(), 1);

    assert!(matches!(
        catalog.fetch(2, 2),
        Err(LAlgebraError::CatalogLookupFailure(_))
    ));
}

#[test]
fn test_lookup_failures() {
    let mut catalog = Catalog::new();
    assert!(matches!(
        catalog.fetch(3, 1),
        Err(LAlgebraError::CatalogLookupFailure(_))
    ));

    catalog
        .insert(Algebra::chain(3).unwrap().table().clone())
        .unwrap();
    assert!(catalog.fetch(3, 1).is_ok());
    for index in [0, 2] {
        assert!(matches!(
            catalog.fetch(3, index),
            Err(LAlgebraError::CatalogLookupFailure(_))
        ));
    }
}

#[test]
fn test_insert_validates() {
    let mut catalog = Catalog::new();
    let bad = Table::from_rows(&[vec![3, 3, 3], vec![3, 3, 3], vec![1, 2, 3]]).unwrap();
    assert!(matches!(
        catalog.insert(bad),
        Err(LAlgebraError::InvalidAlgebra { .. })
    ));
    assert!(matches!(
        catalog.insert(Algebra::boolean2().table().clone()),
        Err(LAlgebraError::Catalog(_))
    ));
    assert!(!catalog.is_dirty());

    let first = catalog.insert(Algebra::chain(3).unwrap().table().clone());
    let second = catalog.insert(Algebra::lukasiewicz(3).unwrap().table().clone());
    assert_eq!((first.unwrap(), second.unwrap()), (1, 2));
    assert_eq!(catalog.count(3), Some(2));
    assert!(catalog.is_dirty());
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.rkyv");

    {
        let mut catalog = Catalog::with_path(&path);
        catalog
            .insert(Algebra::chain(3).unwrap().table().clone())
            .unwrap();
        catalog
            .insert(Algebra::lukasiewicz(4).unwrap().table().clone())
            .unwrap();
        catalog.save().unwrap();
        assert!(!catalog.is_dirty());
    }

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.sizes().collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(
        Algebra::from_catalog(&catalog, 3, 1).unwrap(),
        Algebra::chain(3).unwrap()
    );
    assert_eq!(
        Algebra::from_catalog(&catalog, 4, 1).unwrap(),
        Algebra::lukasiewicz(4).unwrap()
    );
}

#[test]
fn test_drop_saves_dirty_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.rkyv");

    {
        let mut catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.sizes().count(), 0);
        catalog
            .insert(Algebra::chain(5).unwrap().table().clone())
            .unwrap();
    }

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.count(5), Some(1));
}

#[test]
fn test_open_from_config() {
    let dir = tempdir().unwrap();
    let config = Config {
        catalog_path: dir.path().join("from_config.rkyv"),
        ..Config::default()
    };
    let catalog = Catalog::open(&config).unwrap();
    assert_eq!(catalog.path(), Some(config.catalog_path.as_path()));
}

#[test]
fn test_corrupt_archive_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.rkyv");
    std::fs::write(&path, b"definitely not an archive").unwrap();
    assert!(matches!(
        Catalog::load(&path),
        Err(LAlgebraError::Catalog(_))
    ));
}

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut config = Config::default();
    config.limits.max_subset_size = 12;
    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);

    assert!(matches!(
        Config::load(dir.path().join("missing.json")),
        Err(LAlgebraError::Config(_))
    ));
}

#[test]
fn test_failed_autosave_does_not_panic() {
    let dir = tempdir().unwrap();
    // A directory in the way makes the final rename fail
    let path = dir.path().join("taken");
    std::fs::create_dir(&path).unwrap();

    let mut catalog = Catalog::with_path(&path);
    catalog
        .insert(Algebra::chain(3).unwrap().table().clone())
        .unwrap();
    assert!(matches!(catalog.save(), Err(LAlgebraError::Catalog(_))));
    assert!(catalog.is_dirty());
    drop(catalog);

    assert!(path.is_dir());
}
