//! Ticker catalog loading with explicit cache-aside semantics.
//!
//! The catalog is a CSV mapping security codes to issuer names. Loads go
//! through [`CatalogCache`], keyed by catalog path, with manual
//! invalidation — there is no ambient global state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Header of the column holding security codes.
const CODE_COLUMN: &str = "Security Code";
/// Header of the column holding issuer names.
const NAME_COLUMN: &str = "Issuer Name";

/// Error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog: {0}")]
    Open(String),

    #[error("Failed to parse catalog CSV: {0}")]
    Csv(String),

    #[error("Catalog is missing column '{0}'")]
    MissingColumn(String),
}

/// One catalog row: a security code and the issuer it identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Exchange security code, used as the ticker stem
    pub code: String,
    /// Issuer display name
    pub name: String,
}

/// Load a catalog CSV from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let file = File::open(path).map_err(|e| CatalogError::Open(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::Csv(e.to_string()))?
        .clone();
    let code_idx = headers
        .iter()
        .position(|h| h == CODE_COLUMN)
        .ok_or_else(|| CatalogError::MissingColumn(CODE_COLUMN.to_string()))?;
    let name_idx = headers
        .iter()
        .position(|h| h == NAME_COLUMN)
        .ok_or_else(|| CatalogError::MissingColumn(NAME_COLUMN.to_string()))?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Csv(e.to_string()))?;
        let code = record.get(code_idx).unwrap_or("").trim();
        let name = record.get(name_idx).unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        entries.push(CatalogEntry {
            code: code.to_string(),
            name: name.to_string(),
        });
    }
    Ok(entries)
}

/// Cache-aside wrapper around [`load_catalog`], keyed by catalog path.
///
/// A path is read from disk once and served from memory afterwards until
/// [`CatalogCache::invalidate`] drops it.
#[derive(Debug, Default)]
pub struct CatalogCache {
    loaded: HashMap<PathBuf, Vec<CatalogEntry>>,
}

impl CatalogCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog at `path`, reading from disk only on a miss.
    pub fn load(&mut self, path: &Path) -> Result<&[CatalogEntry], CatalogError> {
        let entries = match self.loaded.entry(path.to_path_buf()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(load_catalog(path)?),
        };
        Ok(entries)
    }

    /// Whether `path` is currently cached.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.loaded.contains_key(path)
    }

    /// Drop the cached copy for `path`; the next load re-reads the file.
    pub fn invalidate(&mut self, path: &Path) {
        self.loaded.remove(path);
    }
}
