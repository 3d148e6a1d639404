//! Runtime configuration, filled in from the command line by the binary.

use std::env;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::data::{builtin_animals, load_animals_from_json, LoadError};
use crate::quiz::{TimerMode, DEFAULT_TIER};
use crate::storage::{FileStore, KeyValueStore, NullStore};

const DATA_DIR_NAME: &str = ".mamalia";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the durable store lives. `None` runs without persistence.
    pub data_dir: Option<PathBuf>,
    /// Dataset replacing the built-in one.
    pub dataset: Option<PathBuf>,
    pub muted: bool,
    /// Preselected quiz tier.
    pub tier: usize,
    pub timer_mode: TimerMode,
    /// Fixed RNG seed for reproducible quizzes.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset: None,
            muted: false,
            tier: DEFAULT_TIER,
            timer_mode: TimerMode::None,
            seed: None,
        }
    }
}

impl Config {
    /// A configuration with no durable storage.
    pub fn headless() -> Self {
        Self {
            data_dir: None,
            ..Self::default()
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog, LoadError> {
        let animals = match &self.dataset {
            Some(path) => load_animals_from_json(path)?,
            None => builtin_animals()?,
        };
        Ok(Catalog::new(animals))
    }

    /// Opens the configured store, falling back to [`NullStore`] when there
    /// is none or it cannot be opened.
    pub fn open_store(&self) -> Box<dyn KeyValueStore> {
        let Some(dir) = &self.data_dir else {
            log::info!("running without durable storage");
            return Box::new(NullStore);
        };
        match FileStore::open(dir) {
            Ok(store) => {
                log::info!("using store {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("cannot open store in {}: {}", dir.display(), e);
                Box::new(NullStore)
            }
        }
    }
}

/// `$HOME/.mamalia`, or `None` when no home directory is known.
pub fn default_data_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::best_score::{load_best_for, save_best_if_higher};

    #[test]
    fn test_headless_store_is_unavailable() {
        let config = Config::headless();
        let mut store = config.open_store();
        save_best_if_higher(store.as_mut(), 5, 3);
        assert_eq!(load_best_for(store.as_ref(), 5), 0);
    }

    #[test]
    fn test_file_store_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::headless()
        };

        let mut store = config.open_store();
        save_best_if_higher(store.as_mut(), 5, 3);
        drop(store);

        let store = config.open_store();
        assert_eq!(load_best_for(store.as_ref(), 5), 3);
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = Config::headless().load_catalog().unwrap();
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn test_missing_dataset_is_an_error() {
        let config = Config {
            dataset: Some(PathBuf::from("/nonexistent/animals.json")),
            ..Config::headless()
        };
        assert!(matches!(config.load_catalog(), Err(LoadError::Io(_))));
    }
}
