use serde::Deserialize;
use std::ops::RangeInclusive;

/// Fetch parameters for one deck on the gallery
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeckSpec {
    pub id: u32,
    /// Path suffix identifying the deck's gallery category
    pub gallery_path: String,
    pub start: u32,
    /// Inclusive
    pub end: u32,
}

impl DeckSpec {
    /// Indices to fetch, ascending. Empty when `start > end`.
    pub fn indices(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn card_count(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    /// Output file name for one card of this deck
    pub fn file_name(&self, index: u32) -> String {
        format!("{}_{}.jpg", self.id, index)
    }
}

// Re-export catalog types
pub mod catalog;
pub use catalog::DeckCatalog;

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(start: u32, end: u32) -> DeckSpec {
        DeckSpec {
            id: 1800,
            gallery_path: "/category/412-bicycle_1800".to_string(),
            start,
            end,
        }
    }

    #[test]
    fn indices_are_inclusive_and_ascending() {
        let spec = deck(23030, 23032);
        assert_eq!(spec.indices().collect::<Vec<_>>(), vec![23030, 23031, 23032]);
        assert_eq!(spec.card_count(), 3);
    }

    #[test]
    fn reversed_range_is_empty() {
        let spec = deck(10, 9);
        assert_eq!(spec.indices().count(), 0);
        assert_eq!(spec.card_count(), 0);
    }

    #[test]
    fn file_name_uses_deck_and_index() {
        assert_eq!(deck(1, 1).file_name(23030), "1800_23030.jpg");
    }
}
