//! Favorite animal ids, stored as a JSON array of strings.

use std::collections::{BTreeSet, HashSet};

use super::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Reads a JSON string array stored under `key`. Absent values, an
/// unavailable store and undecodable JSON all yield an empty set.
pub fn load_set<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> HashSet<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return HashSet::new(),
        Err(e) => {
            log::debug!("load_set({}) skipped: {}", key, e);
            return HashSet::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(items) => items.into_iter().collect(),
        Err(e) => {
            log::warn!("discarding malformed value for '{}': {}", key, e);
            HashSet::new()
        }
    }
}

/// Writes `set` as a JSON array under `key`. Failures are logged and dropped.
pub fn save_set<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, set: &HashSet<String>) {
    // Sorted so the stored value is stable between runs.
    let items: BTreeSet<&String> = set.iter().collect();
    let json = match serde_json::to_string(&items) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("cannot encode '{}': {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &json) {
        log::debug!("save_set({}) skipped: {}", key, e);
    }
}

pub fn load_favorites<S: KeyValueStore + ?Sized>(store: &S) -> HashSet<String> {
    load_set(store, FAVORITES_KEY)
}

pub fn save_favorites<S: KeyValueStore + ?Sized>(store: &mut S, favorites: &HashSet<String>) {
    save_set(store, FAVORITES_KEY, favorites)
}

/// Adds `id` if absent, removes it otherwise. Returns whether it is now a
/// favorite.
pub fn toggle_favorite(favorites: &mut HashSet<String>, id: &str) -> bool {
    if favorites.remove(id) {
        false
    } else {
        favorites.insert(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, NullStore};

    #[test]
    fn test_first_run_is_empty() {
        let store = MemoryStore::new();
        assert!(load_favorites(&store).is_empty());
    }

    #[test]
    fn test_toggle_save_reload() {
        let mut store = MemoryStore::new();
        let mut favorites = load_favorites(&store);

        assert!(toggle_favorite(&mut favorites, "tarsius"));
        save_favorites(&mut store, &favorites);

        let reloaded = load_favorites(&store);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains("tarsius"));
    }

    #[test]
    fn test_toggle_twice_removes() {
        let mut favorites = HashSet::new();
        toggle_favorite(&mut favorites, "babirusa");
        assert!(!toggle_favorite(&mut favorites, "babirusa"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{\"oops\": 1}").unwrap();
        assert!(load_favorites(&store).is_empty());

        store.set(FAVORITES_KEY, "not json").unwrap();
        assert!(load_favorites(&store).is_empty());
    }

    #[test]
    fn test_unavailable_store_is_silent() {
        let mut store = NullStore;
        let favorites: HashSet<String> = ["tarsius".to_string()].into_iter().collect();
        save_favorites(&mut store, &favorites);
        assert!(load_favorites(&store).is_empty());
    }

    #[test]
    fn test_saved_value_is_sorted_array() {
        let mut store = MemoryStore::new();
        let favorites: HashSet<String> = ["tarsius", "babirusa"]
            .into_iter()
            .map(String::from)
            .collect();
        save_set(&mut store, "favorites", &favorites);
        assert_eq!(
            store.get("favorites").unwrap().as_deref(),
            Some("[\"babirusa\",\"tarsius\"]")
        );
    }
}
