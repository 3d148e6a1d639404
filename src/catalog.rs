//! Read-only animal catalog with search and filtering.

use std::collections::HashSet;

use crate::models::{Animal, ConservationStatus};

/// Conservation status filter on the catalog screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ConservationStatus),
}

impl StatusFilter {
    /// Cycles All → each status in order → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(ConservationStatus::ALL[0]),
            StatusFilter::Only(current) => {
                let position = ConservationStatus::ALL
                    .iter()
                    .position(|s| *s == current)
                    .unwrap_or(0);
                match ConservationStatus::ALL.get(position + 1) {
                    Some(next) => StatusFilter::Only(*next),
                    None => StatusFilter::All,
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Semua Status",
            StatusFilter::Only(status) => status.label(),
        }
    }

    fn matches(self, status: ConservationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Search criteria for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub status: StatusFilter,
    pub only_favorites: bool,
}

impl CatalogFilter {
    /// Clears the query and status, keeping the favorites toggle.
    pub fn reset_search(&mut self) {
        self.query.clear();
        self.status = StatusFilter::All;
    }

    pub fn matches(&self, animal: &Animal, favorites: &HashSet<String>) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || [
                &animal.local_name,
                &animal.latin_name,
                &animal.habitat,
                &animal.description,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&query));

        matches_query
            && self.status.matches(animal.conservation_status)
            && (!self.only_favorites || favorites.contains(&animal.id))
    }
}

/// The immutable dataset plus lookups over it.
#[derive(Debug, Clone)]
pub struct Catalog {
    animals: Vec<Animal>,
}

impl Catalog {
    pub fn new(animals: Vec<Animal>) -> Self {
        Self { animals }
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Looks an animal up by id. `None` is the "not found" condition the
    /// detail screen renders a fallback for.
    pub fn find(&self, id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn filter<'a>(
        &'a self,
        filter: &'a CatalogFilter,
        favorites: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a Animal> + 'a {
        self.animals
            .iter()
            .filter(move |animal| filter.matches(animal, favorites))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_animals;

    fn catalog() -> Catalog {
        Catalog::new(builtin_animals().unwrap())
    }

    fn ids<'a>(animals: impl Iterator<Item = &'a Animal>) -> Vec<&'a str> {
        animals.map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = catalog();
        let filter = CatalogFilter::default();
        let favorites = HashSet::new();
        assert_eq!(catalog.filter(&filter, &favorites).count(), catalog.len());
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let catalog = catalog();
        let favorites = HashSet::new();
        let filter = CatalogFilter {
            query: "  TARSIUS ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(catalog.filter(&filter, &favorites)), vec!["tarsius"]);
    }

    #[test]
    fn test_query_matches_latin_name_and_habitat() {
        let catalog = catalog();
        let favorites = HashSet::new();

        let filter = CatalogFilter {
            query: "neofelis".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(catalog.filter(&filter, &favorites)), vec!["macan-dahan"]);

        let filter = CatalogFilter {
            query: "ujung kulon".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(catalog.filter(&filter, &favorites)), vec!["badak-jawa"]);
    }

    #[test]
    fn test_status_and_favorite_filters_combine() {
        let catalog = catalog();
        let favorites: HashSet<String> = ["tarsius".to_string(), "badak-jawa".to_string()]
            .into_iter()
            .collect();
        let filter = CatalogFilter {
            query: String::new(),
            status: StatusFilter::Only(ConservationStatus::Vulnerable),
            only_favorites: true,
        };
        assert_eq!(ids(catalog.filter(&filter, &favorites)), vec!["tarsius"]);
    }

    #[test]
    fn test_near_threatened_filter_can_be_empty() {
        let catalog = catalog();
        let favorites = HashSet::new();
        let filter = CatalogFilter {
            status: StatusFilter::Only(ConservationStatus::NearThreatened),
            ..Default::default()
        };
        assert_eq!(catalog.filter(&filter, &favorites).count(), 0);
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let mut filter = StatusFilter::All;
        for _ in 0..ConservationStatus::ALL.len() {
            filter = filter.next();
            assert_ne!(filter, StatusFilter::All);
        }
        assert_eq!(filter.next(), StatusFilter::All);
    }

    #[test]
    fn test_reset_search_keeps_favorites_toggle() {
        let mut filter = CatalogFilter {
            query: "gajah".to_string(),
            status: StatusFilter::Only(ConservationStatus::Endangered),
            only_favorites: true,
        };
        filter.reset_search();
        assert!(filter.query.is_empty());
        assert_eq!(filter.status, StatusFilter::All);
        assert!(filter.only_favorites);
    }

    #[test]
    fn test_find_unknown_id_is_none() {
        let catalog = catalog();
        assert!(catalog.find("harimau-jawa").is_none());
        assert_eq!(
            catalog.find("tarsius").map(|a| a.local_name.as_str()),
            Some("Tarsius Spektral")
        );
    }
}
