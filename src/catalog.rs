//! Catalog of known L-algebras, keyed by `(size, index)`.
//!
//! The catalog is an explicit repository object: callers open it from a
//! path (or build one in memory) and pass it around. Nothing here touches
//! process-wide state such as the working directory.
//!
//! Sizes 1 and 2 each have exactly one L-algebra and are answered without
//! looking anything up. Larger sizes are served from the tables the catalog
//! holds, 1-based in insertion order.
//!
//! On disk the catalog is a single rkyv archive, memory-mapped and validated
//! on load and written atomically on save.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use rkyv::ser::serializers::AllocSerializer;
use rkyv::ser::Serializer;
use rkyv::{check_archived_root, Archive, Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{Algebra, Table};
use crate::error::{LAlgebraError, Result};
use crate::validate::{validate_table, CheckResult};

/// Anything that can hand out catalogued tables.
pub trait AlgebraCatalog {
    /// Table number `index` (1-based) among the algebras of `size`
    fn fetch(&self, size: usize, index: usize) -> Result<Table>;

    /// How many algebras of `size` are known, `None` if `size` has no catalog
    fn count(&self, size: usize) -> Option<usize>;
}

/// Serializable form of the catalog for persistence
#[derive(Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
struct CatalogData {
    sizes: Vec<SizeData>,
}

#[derive(Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
struct SizeData {
    size: u32,
    /// Row-major, 0-based entries, one `size*size` block per table
    tables: Vec<Vec<u32>>,
}

/// In-memory catalog with optional on-disk persistence
#[derive(Debug, Default)]
pub struct Catalog {
    tables: BTreeMap<usize, Vec<Table>>,
    path: Option<PathBuf>,
    dirty: bool,
}

/// Built-in answer for sizes 1 and 2
fn builtin(size: usize) -> Option<Table> {
    match size {
        1 => Some(Algebra::trivial().table().clone()),
        2 => Some(Algebra::boolean2().table().clone()),
        _ => None,
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            tables: BTreeMap::new(),
            path: Some(path.into()),
            dirty: false,
        }
    }

    /// Open the catalog named by `config.catalog_path`
    pub fn open(config: &Config) -> Result<Self> {
        Self::load(&config.catalog_path)
    }

    /// Load from disk, or start empty if the file doesn't exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self::with_path(path));
        }

        let file = File::open(&path)
            .map_err(|e| LAlgebraError::Catalog(format!("failed to open catalog file: {}", e)))?;

        // Zero-length files cannot be mapped on every platform
        if file.metadata()?.len() == 0 {
            return Ok(Self::with_path(path));
        }

        // SAFETY: the archive is validated before use and never written through
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| LAlgebraError::Catalog(format!("failed to mmap catalog file: {}", e)))?;

        let archived = check_archived_root::<CatalogData>(&mmap[..]).map_err(|e| {
            LAlgebraError::Catalog(format!("failed to validate catalog archive: {}", e))
        })?;

        let data: CatalogData = archived
            .deserialize(&mut rkyv::Infallible)
            .map_err(|_| LAlgebraError::Catalog("failed to deserialize catalog".to_string()))?;

        let mut tables = BTreeMap::new();
        for entry in data.sizes {
            let size = entry.size as usize;
            let decoded = entry
                .tables
                .into_iter()
                .map(|flat| Table::from_flat(size, flat.into_iter().map(|e| e as usize).collect()))
                .collect::<Result<Vec<_>>>()?;
            tables.insert(size, decoded);
        }

        info!(
            path = %path.display(),
            sizes = tables.len(),
            "loaded algebra catalog"
        );

        Ok(Self {
            tables,
            path: Some(path),
            dirty: false,
        })
    }

    /// Save to the catalog's path
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| LAlgebraError::Catalog("catalog has no persistence path".to_string()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = CatalogData {
            sizes: self
                .tables
                .iter()
                .map(|(&size, tables)| SizeData {
                    size: size as u32,
                    tables: tables
                        .iter()
                        .map(|t| t.flat().iter().map(|&e| e as u32).collect())
                        .collect(),
                })
                .collect(),
        };

        let mut serializer = AllocSerializer::<1024>::default();
        serializer
            .serialize_value(&data)
            .map_err(|e| LAlgebraError::Catalog(format!("failed to serialize catalog: {}", e)))?;
        let bytes = serializer.into_serializer().into_inner();

        // Write atomically by writing to temp file then renaming
        let temp_path = path.with_extension("rkyv.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;

        info!(path = %path.display(), sizes = self.tables.len(), "saved algebra catalog");
        self.dirty = false;
        Ok(())
    }

    /// Append a table; returns its 1-based index within its size.
    ///
    /// The table must be a valid L-algebra of size 3 or more.
    pub fn insert(&mut self, table: Table) -> Result<usize> {
        let size = table.size();
        if builtin(size).is_some() {
            return Err(LAlgebraError::Catalog(format!(
                "size {} is built in and cannot be extended",
                size
            )));
        }
        if let CheckResult::Violated(violation) = validate_table(&table) {
            return Err(LAlgebraError::InvalidAlgebra {
                table: table.rows(),
                violation,
            });
        }
        let entries = self.tables.entry(size).or_default();
        entries.push(table);
        self.dirty = true;
        Ok(entries.len())
    }

    /// Sizes with catalogued tables (beyond the built-in ones)
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.tables.keys().copied()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl AlgebraCatalog for Catalog {
    fn fetch(&self, size: usize, index: usize) -> Result<Table> {
        if let Some(table) = builtin(size) {
            return if index == 1 {
                Ok(table)
            } else {
                Err(LAlgebraError::CatalogLookupFailure(format!(
                    "there is exactly one L-algebra of size {}, index {} requested",
                    size, index
                )))
            };
        }
        let tables = self.tables.get(&size).ok_or_else(|| {
            LAlgebraError::CatalogLookupFailure(format!("no catalog for size {}", size))
        })?;
        index
            .checked_sub(1)
            .and_then(|i| tables.get(i))
            .cloned()
            .ok_or_else(|| {
                LAlgebraError::CatalogLookupFailure(format!(
                    "index {} out of range: {} L-algebras of size {} are known",
                    index,
                    tables.len(),
                    size
                ))
            })
    }

    fn count(&self, size: usize) -> Option<usize> {
        if builtin(size).is_some() {
            return Some(1);
        }
        self.tables.get(&size).map(Vec::len)
    }
}

impl Drop for Catalog {
    fn drop(&mut self) {
        if self.dirty && self.path.is_some() {
            if let Err(e) = self.save() {
                warn!(error = %e, "failed to autosave algebra catalog");
            }
        }
    }
}

impl Algebra {
    /// Algebra number `index` of `size` from `catalog`
    pub fn from_catalog(catalog: &impl AlgebraCatalog, size: usize, index: usize) -> Result<Self> {
        Algebra::from_table(catalog.fetch(size, index)?, true)
    }
}
