use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Image unavailable: {0}")]
    ImageUnavailable(String),
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),
    #[error("No cards to render")]
    NoCards,
}

pub type Result<T> = std::result::Result<T, CardError>;

/// Reference to a card illustration, resolved relative to the deck's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub filename: String,
    /// Sub-directory holding the file; `None` means the deck directory itself.
    pub directory: Option<String>,
    pub description: Option<String>,
}

impl ImageRef {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            directory: None,
            description: None,
        }
    }

    /// Key under which the image bytes are stored, e.g. `images/ch1/cat.png`.
    pub fn key(&self) -> String {
        self.relative_path().to_string_lossy().replace('\\', "/")
    }

    pub fn relative_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => Path::new(dir).join(&self.filename),
            None => PathBuf::from(&self.filename),
        }
    }

    /// Second placeholder line: the description if known, else where we looked.
    pub fn placeholder_detail(&self) -> String {
        match (&self.description, &self.directory) {
            (Some(desc), _) => format!("({desc})"),
            (None, Some(dir)) => format!("({dir})"),
            (None, None) => "(root)".to_string(),
        }
    }
}

/// One flashcard: question on the front, answer on the back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub image: Option<ImageRef>,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: non_blank(question.into()),
            answer: non_blank(answer.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn question_text(&self) -> Option<&str> {
        self.question.as_deref().filter(|q| !q.trim().is_empty())
    }

    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
