use duplex_cards::*;
use std::path::PathBuf;

fn deck(count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| Card::new(format!("Question {i}"), format!("Answer {i}")))
        .collect()
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_render_two_files() {
    let font = ResolvedFont::default();
    let rendered = render_pdfs(
        &deck(12),
        &CardLayoutOptions::default(),
        &font,
        &ImageStore::new(),
    )
    .unwrap();

    match rendered {
        RenderedPdfs::TwoFiles { front, back } => {
            assert!(front.starts_with(b"%PDF"));
            assert!(back.starts_with(b"%PDF"));
        }
        RenderedPdfs::Interleaved(_) => panic!("Expected two files"),
    }
}

#[test]
fn test_render_interleaved() {
    let font = ResolvedFont::default();
    let options = CardLayoutOptions {
        output_format: OutputFormat::Interleaved,
        ..Default::default()
    };
    let rendered = render_pdfs(&deck(3), &options, &font, &ImageStore::new()).unwrap();

    match rendered {
        RenderedPdfs::Interleaved(bytes) => assert!(bytes.starts_with(b"%PDF")),
        RenderedPdfs::TwoFiles { .. } => panic!("Expected one interleaved file"),
    }
}

fn fixture_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSansMono.ttf")
}

#[test]
fn test_render_with_embedded_font() {
    let bytes = std::fs::read(fixture_font()).unwrap();
    let font = ResolvedFont::from_bytes("DejaVuSansMono", &bytes).unwrap();
    let options = CardLayoutOptions {
        output_format: OutputFormat::Interleaved,
        ..Default::default()
    };

    let cards = vec![Card::new("Mono?", "Yes"), Card::new("Width?", "1233 units")];
    let rendered = render_pdfs(&cards, &options, &font, &ImageStore::new()).unwrap();
    match rendered {
        RenderedPdfs::Interleaved(bytes) => assert!(bytes.starts_with(b"%PDF")),
        RenderedPdfs::TwoFiles { .. } => panic!("Expected one interleaved file"),
    }
}

#[test]
fn test_render_with_embedded_image() {
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, image::Rgb([0, 128, 255])))
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();

    let mut images = ImageStore::new();
    images.insert("flag.png", bytes.into_inner());
    let cards = vec![Card::new("Which flag?", "Blue").with_image(ImageRef::new("flag.png"))];

    let font = ResolvedFont::default();
    let rendered = render_pdfs(&cards, &CardLayoutOptions::default(), &font, &images).unwrap();
    assert!(matches!(rendered, RenderedPdfs::TwoFiles { .. }));
}

#[test]
fn test_render_rejects_empty_deck() {
    let font = ResolvedFont::default();
    let result = render_pdfs(&[], &CardLayoutOptions::default(), &font, &ImageStore::new());
    assert!(matches!(result, Err(CardError::NoCards)));
}

#[test]
fn test_render_rejects_invalid_layout() {
    let font = ResolvedFont::default();
    let options = CardLayoutOptions {
        rows: 0,
        ..Default::default()
    };
    let result = render_pdfs(&deck(2), &options, &font, &ImageStore::new());
    assert!(matches!(result, Err(CardError::InvalidLayout(_))));
}

#[tokio::test]
async fn test_available_path_adds_suffix() {
    let dir = tempfile::tempdir().unwrap();

    let first = available_path(dir.path(), "deck_front", "pdf").await.unwrap();
    assert_eq!(first, dir.path().join("deck_front.pdf"));

    tokio::fs::write(&first, b"").await.unwrap();
    let second = available_path(dir.path(), "deck_front", "pdf").await.unwrap();
    assert_eq!(second, dir.path().join("deck_front_01.pdf"));

    tokio::fs::write(&second, b"").await.unwrap();
    let third = available_path(dir.path(), "deck_front", "pdf").await.unwrap();
    assert_eq!(third, dir.path().join("deck_front_02.pdf"));
}

#[tokio::test]
async fn test_generate_pdfs_writes_both_sides() {
    let dir = tempfile::tempdir().unwrap();
    let options = CardLayoutOptions::default();

    let written = generate_pdfs(&deck(11), &options, ImageStore::new(), dir.path(), "deck")
        .await
        .unwrap();
    assert_eq!(file_names(&written), vec!["deck_front.pdf", "deck_back.pdf"]);

    for path in &written {
        let bytes = tokio::fs::read(path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    // A second run never overwrites the first
    let again = generate_pdfs(&deck(11), &options, ImageStore::new(), dir.path(), "deck")
        .await
        .unwrap();
    assert_eq!(file_names(&again), vec!["deck_front_01.pdf", "deck_back_01.pdf"]);
}

#[tokio::test]
async fn test_generate_interleaved_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let options = CardLayoutOptions {
        output_format: OutputFormat::Interleaved,
        ..Default::default()
    };

    let written = generate_pdfs(&deck(4), &options, ImageStore::new(), dir.path(), "vocab")
        .await
        .unwrap();
    assert_eq!(file_names(&written), vec!["vocab_duplex.pdf"]);
}

#[tokio::test]
async fn test_generate_falls_back_when_fonts_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let bogus_font = dir.path().join("not-a-font.ttf");
    tokio::fs::write(&bogus_font, b"garbage").await.unwrap();

    let options = CardLayoutOptions {
        font_candidates: vec![dir.path().join("missing.ttf"), bogus_font],
        ..Default::default()
    };

    let written = generate_pdfs(&deck(2), &options, ImageStore::new(), dir.path(), "fallback")
        .await
        .unwrap();
    assert_eq!(written.len(), 2);
}

#[tokio::test]
async fn test_generate_with_font_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let options = CardLayoutOptions {
        font_candidates: vec![dir.path().join("missing.ttf"), fixture_font()],
        ..Default::default()
    };

    let font = resolve_font(&options.font_candidates).await;
    assert!(!font.is_builtin());

    let written = generate_pdfs(&deck(3), &options, ImageStore::new(), dir.path(), "mono")
        .await
        .unwrap();
    assert_eq!(file_names(&written), vec!["mono_front.pdf", "mono_back.pdf"]);
}

#[tokio::test]
async fn test_generate_rejects_empty_deck() {
    let dir = tempfile::tempdir().unwrap();
    let result = generate_pdfs(
        &[],
        &CardLayoutOptions::default(),
        ImageStore::new(),
        dir.path(),
        "empty",
    )
    .await;

    assert!(matches!(result, Err(CardError::NoCards)));
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_font_without_candidates() {
    let font = resolve_font(&[]).await;
    assert!(font.is_builtin());
}
