mod canvas;
mod csv;
mod font;
mod images;
pub mod layout;
mod options;
mod pdf;
mod raster;
mod render;
mod types;

pub use self::csv::{load_from_csv, parse_cards};
pub use canvas::{Canvas, DrawOp, PdfCanvas, RecordingCanvas, StrokeStyle, TextRun};
pub use font::{FontSource, ResolvedFont, read_font_sources, resolve_font, resolve_font_from};
pub use images::ImageStore;
pub use layout::{DuplexPolicy, GridMapper, GridSpec, OverflowPolicy, Placement, Rect, Side};
pub use options::*;
pub use pdf::{RenderedPdfs, available_path, generate_pdfs, render_pdfs};
pub use raster::{FlatImage, flatten_image};
pub use render::{DeckRenderer, RenderSummary};
pub use types::*;
