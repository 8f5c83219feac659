//! Mood Player - Track Catalog
//!
//! Loads the per-mood track lists. Each mood names a plain-text catalog file
//! holding one track URL per line; the loader turns it into `Track`s and
//! never fails: any fetch or parse problem yields the single fallback track.
//!
//! # Example
//!
//! ```rust
//! use mood_catalog::parse_catalog;
//!
//! let text = "https://cdn.example.com/music/Title_Rainy%20Day.mp3\n# comment\n\n";
//! let tracks = parse_catalog(text);
//! assert_eq!(tracks.len(), 1);
//! assert_eq!(tracks[0].title, "Rainy Day");
//! ```

mod loader;
mod parse;

pub use loader::{CatalogLoaded, CatalogLoader};
pub use parse::{derive_title, parse_catalog};
