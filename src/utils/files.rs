use crate::deck::DeckSpec;
use crate::error::{FetchError, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensure the output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| FetchError::filesystem(path, e))?;
        println!("Created directory: {}", path.display());
    }
    Ok(())
}

/// Path of the file one card of a deck is saved to
pub fn card_path(output_dir: &Path, deck: &DeckSpec, index: u32) -> PathBuf {
    output_dir.join(deck.file_name(index))
}

/// Create or truncate `path` and write `bytes` to it.
///
/// The handle is closed on every return path; a failed write may leave a
/// partial file behind.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| FetchError::filesystem(path, e))?;
    file.write_all(bytes)
        .map_err(|e| FetchError::filesystem(path, e))?;
    Ok(())
}

/// Batch check which cards of a deck already exist to avoid re-downloading
pub fn existing_cards(output_dir: &Path, deck: &DeckSpec) -> HashSet<u32> {
    deck.indices()
        .into_par_iter()
        .filter(|&index| card_path(output_dir, deck, index).exists())
        .collect()
}
