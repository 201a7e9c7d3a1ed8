//! Revisions of an input file that changes on disk

// internal modules
use crate::error::Result;
use crate::input::{parse_input_with, Snapshot};
use crate::vocabulary::Vocabulary;

// standard library
use std::path::{Path, PathBuf};
use std::sync::Arc;

// external crates
use log::{debug, info};

/// An input file and its most recent parse
///
/// Every [reload()](Document::reload) re-reads and re-parses the whole file
/// and replaces the current [Snapshot] with a new one under a higher
/// generation number. Snapshots are shared through [Arc], so anything still
/// holding an older revision keeps a consistent view while a newer one is
/// published.
///
/// ```rust, no_run
/// # use mcnpkit_input::Document;
/// let mut document = Document::open("path/to/deck.i");
/// let first = document.reload().unwrap();
/// let generation = document.generation();
///
/// // ... the file is edited ...
/// let second = document.reload().unwrap();
/// assert!(!document.is_current(generation));
/// ```
#[derive(Debug, Clone)]
pub struct Document<'v> {
    path: PathBuf,
    vocabulary: &'v Vocabulary,
    generation: u64,
    current: Option<Arc<Snapshot>>,
}

impl Document<'static> {
    /// Track a file using the bundled vocabulary
    ///
    /// Nothing is read until the first [reload()](Document::reload).
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Document::with_vocabulary(path, Vocabulary::bundled())
    }
}

impl<'v> Document<'v> {
    /// Track a file using a custom vocabulary
    pub fn with_vocabulary<P: AsRef<Path>>(path: P, vocabulary: &'v Vocabulary) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            vocabulary,
            generation: 0,
            current: None,
        }
    }

    /// Path of the tracked file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file and publish a new snapshot
    ///
    /// On failure the previous snapshot and generation are left untouched.
    pub fn reload(&mut self) -> Result<Arc<Snapshot>> {
        debug!("Reloading {}", self.path.display());
        let text = std::fs::read_to_string(&self.path)?;
        let snapshot = Arc::new(parse_input_with(&text, self.vocabulary)?);

        self.generation += 1;
        self.current = Some(Arc::clone(&snapshot));
        info!(
            "Published revision {} of {}",
            self.generation,
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Latest published snapshot, if any
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    /// Generation of the latest snapshot, 0 before the first reload
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if `generation` is still the latest revision
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.is_some() && generation == self.generation
    }
}
