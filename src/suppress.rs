//! Suppression store
//!
//! Tracks task ids excluded from sync. Temporary suppressions live only in
//! memory and vanish on restart; permanent suppressions are persisted to a
//! flat JSON file (a sorted array of task ids) rewritten wholesale on every
//! permanent mutation. Suppressing an id is idempotent.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use log::warn;
use thiserror::Error;

/// How long a suppression should last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressScope {
    /// Until the process restarts
    Temporary,
    /// Until explicitly removed
    Permanent,
}

impl fmt::Display for SuppressScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temporary => write!(f, "temporary"),
            Self::Permanent => write!(f, "permanent"),
        }
    }
}

impl FromStr for SuppressScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temp" | "temporary" => Ok(Self::Temporary),
            "forever" | "permanent" => Ok(Self::Permanent),
            other => Err(format!("unknown suppression scope '{other}'")),
        }
    }
}

/// Failure persisting the suppression file
#[derive(Debug, Error)]
#[error("failed to persist suppression file {path}: {source}")]
pub struct SuppressError {
    /// File that could not be written
    pub path: PathBuf,
    #[source]
    source: std::io::Error,
}

#[derive(Debug, Default)]
struct Inner {
    temporary: HashSet<String>,
    permanent: HashSet<String>,
}

/// Thread-safe suppression set with file-backed permanent entries
#[derive(Debug)]
pub struct SuppressionStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl SuppressionStore {
    /// Load the store, tolerating a missing or malformed file
    ///
    /// A corrupt file is logged and treated as empty rather than refusing to
    /// start; the next permanent mutation rewrites it.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let permanent = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(ids) => ids.into_iter().collect(),
                Err(err) => {
                    warn!("suppression file {} is malformed ({err}), starting empty", path.display());
                    HashSet::new()
                },
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(err) => {
                warn!("cannot read suppression file {} ({err}), starting empty", path.display());
                HashSet::new()
            },
        };

        Self {
            path: path.to_path_buf(),
            inner: Mutex::new(Inner { temporary: HashSet::new(), permanent }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether this task id is suppressed in either scope
    #[must_use]
    pub fn is_suppressed(&self, task_id: &str) -> bool {
        let inner = self.lock();
        inner.temporary.contains(task_id) || inner.permanent.contains(task_id)
    }

    /// Add a suppression; persists when the scope is permanent
    pub fn suppress(&self, task_id: &str, scope: SuppressScope) -> Result<(), SuppressError> {
        let mut inner = self.lock();
        match scope {
            SuppressScope::Temporary => {
                inner.temporary.insert(task_id.to_string());
                Ok(())
            },
            SuppressScope::Permanent => {
                if inner.permanent.insert(task_id.to_string()) {
                    self.persist(&inner)?;
                }
                Ok(())
            },
        }
    }

    /// Remove a suppression from both scopes; returns whether anything changed
    pub fn unsuppress(&self, task_id: &str) -> Result<bool, SuppressError> {
        let mut inner = self.lock();
        let from_temp = inner.temporary.remove(task_id);
        let from_perm = inner.permanent.remove(task_id);
        if from_perm {
            self.persist(&inner)?;
        }
        Ok(from_temp || from_perm)
    }

    /// Union of both scopes, for the classification pass
    #[must_use]
    pub fn snapshot(&self) -> HashSet<String> {
        let inner = self.lock();
        inner.temporary.union(&inner.permanent).cloned().collect()
    }

    /// Sorted id lists (temporary, permanent) for status reporting
    #[must_use]
    pub fn lists(&self) -> (Vec<String>, Vec<String>) {
        let inner = self.lock();
        let mut temp: Vec<String> = inner.temporary.iter().cloned().collect();
        let mut perm: Vec<String> = inner.permanent.iter().cloned().collect();
        temp.sort();
        perm.sort();
        (temp, perm)
    }

    fn persist(&self, inner: &Inner) -> Result<(), SuppressError> {
        let mut ids: Vec<&String> = inner.permanent.iter().collect();
        ids.sort();
        // sorted array keeps the file diffable across rewrites
        let json = serde_json::to_string_pretty(&ids).unwrap_or_else(|_| "[]".to_string());
        fs::write(&self.path, json).map_err(|source| SuppressError {
            path: self.path.clone(),
            source,
        })
    }
}
