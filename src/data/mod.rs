mod loader;

pub use loader::{builtin_animals, load_animals_from_json, parse_animals, LoadError};
