//! Layout calculation for duplex flashcard sheets
//!
//! - Grid mapping (which page and cell each card lands on, per side)
//! - Text fitting (wrapping and shrinking text into a cell)
//! - Image fitting (aspect-preserving scale and centering)
//!
//! Everything here is pure geometry with no I/O.

mod grid;
mod image;
mod text;
mod types;

pub use self::grid::*;
pub use self::image::*;
pub use self::text::*;
pub use self::types::*;
