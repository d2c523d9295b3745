use super::DeckSpec;
use crate::error::{FetchError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    decks: Vec<DeckSpec>,
}

/// The set of decks the fetcher knows how to crawl
#[derive(Debug, Clone)]
pub struct DeckCatalog {
    decks: Vec<DeckSpec>,
}

impl DeckCatalog {
    /// Build a catalog, rejecting duplicate deck ids
    pub fn new(decks: Vec<DeckSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for deck in &decks {
            if !seen.insert(deck.id) {
                return Err(FetchError::Catalog(format!(
                    "deck {} is declared more than once",
                    deck.id
                )));
            }
        }
        Ok(Self { decks })
    }

    /// Decks shipped with the binary
    pub fn builtin() -> Self {
        Self {
            decks: vec![DeckSpec {
                id: 1800,
                gallery_path: "/category/412-bicycle_1800".to_string(),
                start: 23030,
                end: 23084,
            }],
        }
    }

    /// Parse a catalog from a JSON document of the form `{"decks": [...]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.decks)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| FetchError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn lookup(&self, deck_id: u32) -> Result<&DeckSpec> {
        self.decks
            .iter()
            .find(|deck| deck.id == deck_id)
            .ok_or(FetchError::DeckNotFound(deck_id))
    }

    pub fn decks(&self) -> &[DeckSpec] {
        &self.decks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_bicycle_1800() {
        let catalog = DeckCatalog::builtin();
        let deck = catalog.lookup(1800).unwrap();
        assert_eq!(deck.gallery_path, "/category/412-bicycle_1800");
        assert_eq!(deck.start, 23030);
        assert_eq!(deck.end, 23084);
        assert_eq!(deck.card_count(), 55);
    }

    #[test]
    fn unknown_deck_is_a_lookup_error() {
        let catalog = DeckCatalog::builtin();
        assert!(matches!(
            catalog.lookup(1900),
            Err(FetchError::DeckNotFound(1900))
        ));
    }

    #[test]
    fn loads_decks_from_json() {
        let catalog = DeckCatalog::from_json(
            r#"{"decks": [
                {"id": 1800, "gallery_path": "/category/412-bicycle_1800", "start": 23030, "end": 23084},
                {"id": 808, "gallery_path": "/category/99-bicycle_808", "start": 5, "end": 4}
            ]}"#,
        )
        .unwrap();

        assert_eq!(catalog.decks().len(), 2);
        let deck = catalog.lookup(808).unwrap();
        assert_eq!(deck.gallery_path, "/category/99-bicycle_808");
        assert_eq!(deck.card_count(), 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = DeckCatalog::from_json(
            r#"{"decks": [
                {"id": 1, "gallery_path": "/a", "start": 1, "end": 2},
                {"id": 1, "gallery_path": "/b", "start": 3, "end": 4}
            ]}"#,
        );
        assert!(matches!(result, Err(FetchError::Catalog(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = DeckCatalog::from_json(r#"{"decks": [{"id": "x"}]}"#);
        assert!(matches!(result, Err(FetchError::CatalogJson(_))));
    }

    #[test]
    fn missing_catalog_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DeckCatalog::load(&dir.path().join("decks.json"));
        assert!(matches!(result, Err(FetchError::CatalogIo { .. })));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decks.json");
        fs::write(
            &path,
            r#"{"decks": [{"id": 7, "gallery_path": "/category/7", "start": 1, "end": 3}]}"#,
        )
        .unwrap();

        let catalog = DeckCatalog::load(&path).unwrap();
        assert_eq!(catalog.lookup(7).unwrap().card_count(), 3);
    }
}
