//! Utility modules for card scan fetching
//!
//! - `files`: Output paths, directory preparation and binary writes
//! - `images`: Decode check for downloaded images
//! - `http`: HTTP client abstraction and reqwest implementation

pub mod files;
pub mod http;
pub mod images;
