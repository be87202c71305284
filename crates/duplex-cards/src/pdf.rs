use crate::canvas::PdfCanvas;
use crate::font::{ResolvedFont, read_font_sources, resolve_font_from};
use crate::images::ImageStore;
use crate::options::{CardLayoutOptions, OutputFormat};
use crate::render::DeckRenderer;
use crate::types::{Card, CardError, Result};
use std::path::{Path, PathBuf};

/// Highest numeric suffix tried when an output name is taken
const MAX_NAME_SUFFIX: u32 = 999;

/// Serialized output of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPdfs {
    TwoFiles { front: Vec<u8>, back: Vec<u8> },
    /// Front page k followed by back page k
    Interleaved(Vec<u8>),
}

/// Render the deck to PDF bytes.
pub fn render_pdfs(
    cards: &[Card],
    options: &CardLayoutOptions,
    font: &ResolvedFont,
    images: &ImageStore,
) -> Result<RenderedPdfs> {
    options.validate()?;
    if cards.is_empty() {
        return Err(CardError::NoCards);
    }

    let renderer = DeckRenderer::new(cards, options, font, images)?;
    let (width, height) = (options.page_width_pt(), options.page_height_pt());

    match options.output_format {
        OutputFormat::TwoFiles => {
            let mut front = PdfCanvas::new("Flashcards (front)", width, height, font);
            let mut back = PdfCanvas::new("Flashcards (back)", width, height, font);
            renderer.render(&mut front, &mut back);
            Ok(RenderedPdfs::TwoFiles {
                front: front.finish(),
                back: back.finish(),
            })
        }
        OutputFormat::Interleaved => {
            let mut canvas = PdfCanvas::new("Flashcards", width, height, font);
            renderer.render_interleaved(&mut canvas);
            Ok(RenderedPdfs::Interleaved(canvas.finish()))
        }
    }
}

/// Render the deck and write the PDF(s) into `output_dir`.
///
/// Files are named `<stem>_front.pdf` / `<stem>_back.pdf` (or
/// `<stem>_duplex.pdf`), with a `_01`, `_02`... suffix if the name is taken.
/// Returns the written paths.
pub async fn generate_pdfs(
    cards: &[Card],
    options: &CardLayoutOptions,
    images: ImageStore,
    output_dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    options.validate()?;
    if cards.is_empty() {
        return Err(CardError::NoCards);
    }

    let cards = cards.to_vec();
    let options = options.clone();
    let output_dir = output_dir.as_ref().to_owned();
    let fonts = read_font_sources(&options.font_candidates).await;

    let rendered = tokio::task::spawn_blocking(move || {
        let font = resolve_font_from(&fonts);
        render_pdfs(&cards, &options, &font, &images)
    })
    .await??;

    let outputs = match rendered {
        RenderedPdfs::TwoFiles { front, back } => vec![("front", front), ("back", back)],
        RenderedPdfs::Interleaved(bytes) => vec![("duplex", bytes)],
    };

    let mut written = Vec::with_capacity(outputs.len());
    for (suffix, bytes) in outputs {
        let path = available_path(&output_dir, &format!("{stem}_{suffix}"), "pdf").await?;
        tokio::fs::write(&path, bytes).await?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// First of `name.ext`, `name_01.ext` ... `name_999.ext` that does not exist.
pub async fn available_path(dir: impl AsRef<Path>, name: &str, ext: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let base = dir.join(format!("{name}.{ext}"));
    if !tokio::fs::try_exists(&base).await? {
        return Ok(base);
    }

    for counter in 1..=MAX_NAME_SUFFIX {
        let candidate = dir.join(format!("{name}_{counter:02}.{ext}"));
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Err(CardError::Config(format!(
        "No free file name for {} after {MAX_NAME_SUFFIX} attempts",
        base.display()
    )))
}
