//! Dataset Module
//!
//! Loads the word list from a JSON document of the form
//! `{"words": ["..", ..]}`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::WordStore;

// == Dataset Error ==
/// Failures while loading the dataset. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be opened or read
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid dataset
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Dataset ==
/// The decoded word list document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    /// The words to shuffle
    pub words: Vec<String>,
}

impl Dataset {
    /// Reads and decodes the dataset at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened dataset file {}", path.display());

        let dataset = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Successfully read the dataset file of '{}' words",
            dataset.words.len()
        );
        Ok(dataset)
    }

    /// Decodes a dataset from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Converts the dataset into a word store.
    pub fn into_store(self) -> WordStore {
        if self.words.is_empty() {
            warn!("Dataset is empty, every read request will fail");
        }
        WordStore::new(self.words)
    }
}
