//! Attribute extraction from gallery page markup.

use crate::error::{FetchError, Result};
use scraper::{Html, Selector};

/// Selector for the full-resolution image on a Piwigo picture page
pub const MAIN_IMAGE_SELECTOR: &str = "img#theMainImage";

/// Reads one attribute from the first element matching a CSS selector.
pub struct AttributeQuery {
    selector: Selector,
    attribute: String,
}

impl AttributeQuery {
    pub fn new(selector: &str, attribute: &str) -> Result<Self> {
        let parsed = Selector::parse(selector).map_err(|e| FetchError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            selector: parsed,
            attribute: attribute.to_string(),
        })
    }

    /// `src` of the page's main image
    pub fn main_image() -> Result<Self> {
        Self::new(MAIN_IMAGE_SELECTOR, "src")
    }

    /// Returns `None` when no element matches or the first match lacks the attribute.
    pub fn extract(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);
        document
            .select(&self.selector)
            .next()
            .and_then(|element| element.value().attr(&self.attribute))
            .map(str::to_string)
    }
}
