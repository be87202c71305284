use duplex_cards::*;

#[test]
fn test_default_options_are_valid() {
    let options = CardLayoutOptions::default();
    assert!(options.validate().is_ok());

    assert_eq!(options.page_width_mm, 210.0);
    assert_eq!(options.page_height_mm, 297.0);
    assert_eq!((options.columns, options.rows), (2, 5));
    assert_eq!(options.overflow_policy, OverflowPolicy::ShrinkToFit);
    assert_eq!(options.duplex_policy, DuplexPolicy::MirroredColumns);
    assert_eq!(options.output_format, OutputFormat::TwoFiles);
}

#[test]
fn test_validation_zero_grid() {
    let mut options = CardLayoutOptions::default();
    options.columns = 0;
    assert!(matches!(options.validate(), Err(CardError::InvalidLayout(_))));

    options.columns = 2;
    options.rows = 0;
    assert!(matches!(options.validate(), Err(CardError::InvalidLayout(_))));
}

#[test]
fn test_validation_page_size() {
    let options = CardLayoutOptions::default().with_paper(PaperSize::Custom {
        width_mm: 0.0,
        height_mm: 100.0,
    });
    assert!(matches!(options.validate(), Err(CardError::InvalidLayout(_))));
}

#[test]
fn test_validation_font_sizes() {
    let mut options = CardLayoutOptions::default();
    options.min_font_size_pt = 13.0;
    match options.validate() {
        Err(CardError::Config(msg)) => assert!(msg.contains("Minimum font size")),
        other => panic!("Expected Config error, got {other:?}"),
    }

    let mut options = CardLayoutOptions::default();
    options.answer_font_size_pt = -1.0;
    assert!(matches!(options.validate(), Err(CardError::Config(_))));
}

#[test]
fn test_validation_shrink_step() {
    let mut options = CardLayoutOptions::default();
    options.shrink_step_pt = 0.0;
    assert!(options.validate().is_err());

    // Too small to make progress on an f32 font size
    options.shrink_step_pt = 1e-7;
    assert!(matches!(options.validate(), Err(CardError::Config(_))));

    options.shrink_step_pt = MIN_SHRINK_STEP_PT;
    assert!(options.validate().is_ok());

    // The step is irrelevant when truncating
    options.overflow_policy = OverflowPolicy::Truncate;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_question_area_ratio() {
    let mut options = CardLayoutOptions::default();
    for ratio in [0.0, 1.0, 1.5, -0.2] {
        options.question_area_ratio = ratio;
        assert!(options.validate().is_err(), "ratio {ratio} accepted");
    }
    options.question_area_ratio = 0.5;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_interleaved_requires_mirrored_columns() {
    let mut options = CardLayoutOptions::default();
    options.output_format = OutputFormat::Interleaved;
    assert!(options.validate().is_ok());

    options.duplex_policy = DuplexPolicy::ReversedPages;
    match options.validate() {
        Err(CardError::Config(msg)) => assert!(msg.contains("Interleaved")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_paper_sizes() {
    let letter = CardLayoutOptions::default().with_paper(PaperSize::Letter);
    assert_eq!(letter.page_width_mm, 215.9);
    assert_eq!(letter.page_height_mm, 279.4);
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Legal.name(), "Legal");
}

#[test]
fn test_grid_spec_in_points() {
    let options = CardLayoutOptions::default();
    let grid = options.grid_spec().unwrap();

    // A4 is 595.28 x 841.89 pt
    assert!((grid.page_width() - 595.28).abs() < 0.05);
    assert!((grid.page_height() - 841.89).abs() < 0.05);
    assert!((grid.cell_width() - grid.page_width() / 2.0).abs() < 1e-3);
    assert!((grid.cell_height() - grid.page_height() / 5.0).abs() < 1e-3);
    assert_eq!(grid.cards_per_page(), 10);
}

#[test]
fn test_text_styles_follow_options() {
    let mut options = CardLayoutOptions::default();
    options.overflow_policy = OverflowPolicy::Truncate;

    let question = options.question_style();
    let answer = options.answer_style();
    assert_eq!(question.initial_size, 12.0);
    assert_eq!(answer.initial_size, 14.0);
    assert_eq!(answer.min_size, 8.0);
    assert_eq!(answer.policy, OverflowPolicy::Truncate);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    let mut options = CardLayoutOptions::default().with_paper(PaperSize::Letter);
    options.columns = 3;
    options.rows = 4;
    options.overflow_policy = OverflowPolicy::Truncate;
    options.duplex_policy = DuplexPolicy::ReversedPages;
    options.font_candidates = vec![PathBuf::from("fonts/NotoSansJP-Regular.ttf")];

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = CardLayoutOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "columns": 4, "output_format": "Interleaved" }"#)
        .await
        .unwrap();

    let loaded = CardLayoutOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.columns, 4);
    assert_eq!(loaded.output_format, OutputFormat::Interleaved);
    assert_eq!(loaded.rows, 5);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "not json").await.unwrap();

    let result = CardLayoutOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(CardError::Config(_))));
}
