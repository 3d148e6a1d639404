use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::Animal;

const BUILTIN_DATASET: &str = include_str!("animals.json");

/// Error produced while loading an animal dataset.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse(serde_json::Error),
    Empty,
    DuplicateId(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read dataset: {}", e),
            LoadError::Parse(e) => write!(f, "cannot parse dataset: {}", e),
            LoadError::Empty => write!(f, "dataset must contain at least one animal"),
            LoadError::DuplicateId(id) => write!(f, "duplicate animal id '{}'", id),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// The dataset compiled into the binary.
pub fn builtin_animals() -> Result<Vec<Animal>, LoadError> {
    parse_animals(BUILTIN_DATASET)
}

pub fn load_animals_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Animal>, LoadError> {
    let path = path.as_ref();
    let json_content = fs::read_to_string(path)?;
    let animals = parse_animals(&json_content)?;
    log::info!("loaded {} animals from {}", animals.len(), path.display());
    Ok(animals)
}

pub fn parse_animals(json: &str) -> Result<Vec<Animal>, LoadError> {
    let animals: Vec<Animal> = serde_json::from_str(json)?;

    if animals.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut seen = HashSet::with_capacity(animals.len());
    for animal in &animals {
        if !seen.insert(animal.id.as_str()) {
            return Err(LoadError::DuplicateId(animal.id.clone()));
        }
    }

    Ok(animals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_loads() {
        let animals = builtin_animals().unwrap();
        assert_eq!(animals.len(), 12);
        assert!(animals.iter().any(|a| a.id == "tarsius"));
    }

    #[test]
    fn test_rejects_empty_dataset() {
        assert!(matches!(parse_animals("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut animals = builtin_animals().unwrap();
        animals.truncate(1);
        animals.push(animals[0].clone());
        let json = serde_json::to_string(&animals).unwrap();

        match parse_animals(&json) {
            Err(LoadError::DuplicateId(id)) => assert_eq!(id, "macan-dahan"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_reports_malformed_json() {
        assert!(matches!(parse_animals("{ nope"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        fs::write(&path, BUILTIN_DATASET).unwrap();

        let animals = load_animals_from_json(&path).unwrap();
        assert_eq!(animals.len(), 12);
        assert!(matches!(
            load_animals_from_json(dir.path().join("missing.json")),
            Err(LoadError::Io(_))
        ));
    }
}
