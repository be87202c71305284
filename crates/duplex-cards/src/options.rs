use crate::layout::{DuplexPolicy, GridSpec, OverflowPolicy, TextStyle};
use crate::types::{CardError, Result};
use printpdf::Mm;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted shrink step
pub const MIN_SHRINK_STEP_PT: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// How the two sides are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputFormat {
    /// Separate front and back PDFs
    #[default]
    TwoFiles,
    /// One PDF alternating front and back pages, for printers with duplex
    Interleaved,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardLayoutOptions {
    // Page and grid
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub columns: usize,
    pub rows: usize,

    // Text
    pub question_font_size_pt: f32,
    pub answer_font_size_pt: f32,
    pub min_font_size_pt: f32,
    pub shrink_step_pt: f32,
    pub line_height_multiplier: f32,
    pub placeholder_font_size_pt: f32,
    pub overflow_policy: OverflowPolicy,

    // Duplex and output
    pub duplex_policy: DuplexPolicy,
    pub output_format: OutputFormat,

    // Card face
    pub text_margin_mm: f32,
    pub image_margin_mm: f32,
    /// Share of the cell height given to the question when an image is present
    pub question_area_ratio: f32,

    // Cut lines
    pub cut_line_gray: f32,
    pub cut_line_width_pt: f32,

    /// Font files to try, in order, before the built-in fallback
    pub font_candidates: Vec<PathBuf>,
}

impl Default for CardLayoutOptions {
    fn default() -> Self {
        let (page_width_mm, page_height_mm) = PaperSize::A4.dimensions_mm();
        Self {
            page_width_mm,
            page_height_mm,
            columns: 2,
            rows: 5,
            question_font_size_pt: 12.0,
            answer_font_size_pt: 14.0,
            min_font_size_pt: 8.0,
            shrink_step_pt: 0.5,
            line_height_multiplier: 1.2,
            placeholder_font_size_pt: 10.0,
            overflow_policy: OverflowPolicy::ShrinkToFit,
            duplex_policy: DuplexPolicy::MirroredColumns,
            output_format: OutputFormat::TwoFiles,
            text_margin_mm: 5.0,
            image_margin_mm: 2.0,
            question_area_ratio: 0.3,
            cut_line_gray: 0.8,
            cut_line_width_pt: 0.3,
            font_candidates: Vec::new(),
        }
    }
}

impl CardLayoutOptions {
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        let (w, h) = paper.dimensions_mm();
        self.page_width_mm = w;
        self.page_height_mm = h;
        self
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CardError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CardError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.grid_spec()?;

        let sizes = [
            ("question font size", self.question_font_size_pt),
            ("answer font size", self.answer_font_size_pt),
            ("minimum font size", self.min_font_size_pt),
            ("placeholder font size", self.placeholder_font_size_pt),
            ("line height multiplier", self.line_height_multiplier),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(CardError::Config(format!("{name} must be positive")));
            }
        }

        if self.min_font_size_pt > self.question_font_size_pt.min(self.answer_font_size_pt) {
            return Err(CardError::Config(
                "Minimum font size exceeds the question or answer font size".to_string(),
            ));
        }

        if self.overflow_policy == OverflowPolicy::ShrinkToFit
            && !(self.shrink_step_pt >= MIN_SHRINK_STEP_PT)
        {
            return Err(CardError::Config(format!(
                "Shrink step must be at least {MIN_SHRINK_STEP_PT}pt when shrinking text to fit"
            )));
        }

        if !(self.question_area_ratio > 0.0 && self.question_area_ratio < 1.0) {
            return Err(CardError::Config(
                "Question area ratio must be between 0 and 1".to_string(),
            ));
        }

        if self.text_margin_mm < 0.0 || self.image_margin_mm < 0.0 {
            return Err(CardError::Config("Margins cannot be negative".to_string()));
        }

        // An interleaved file pairs front page k with back page k
        if self.output_format == OutputFormat::Interleaved
            && self.duplex_policy == DuplexPolicy::ReversedPages
        {
            return Err(CardError::Config(
                "Interleaved output requires the MirroredColumns duplex policy".to_string(),
            ));
        }

        Ok(())
    }

    pub fn page_width_pt(&self) -> f32 {
        Mm(self.page_width_mm).into_pt().0
    }

    pub fn page_height_pt(&self) -> f32 {
        Mm(self.page_height_mm).into_pt().0
    }

    pub fn grid_spec(&self) -> Result<GridSpec> {
        GridSpec::new(
            self.columns,
            self.rows,
            self.page_width_pt(),
            self.page_height_pt(),
        )
    }

    pub fn question_style(&self) -> TextStyle {
        self.text_style(self.question_font_size_pt)
    }

    pub fn answer_style(&self) -> TextStyle {
        self.text_style(self.answer_font_size_pt)
    }

    fn text_style(&self, initial_size: f32) -> TextStyle {
        TextStyle {
            initial_size,
            min_size: self.min_font_size_pt,
            shrink_step: self.shrink_step_pt,
            line_height_multiplier: self.line_height_multiplier,
            policy: self.overflow_policy,
        }
    }
}

/// Millimetres to points
pub(crate) fn mm_to_pt(mm: f32) -> f32 {
    Mm(mm).into_pt().0
}
