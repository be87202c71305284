use crate::types::{Card, ImageRef, Result, non_blank};
use std::io::Read;
use std::path::Path;

/// Load a deck from a headered CSV file.
///
/// Columns, in order: question, answer, image_directory, image_filename,
/// image_description. Missing trailing columns are treated as empty and
/// columns past the fifth are ignored.
pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<Card>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let cards = tokio::task::spawn_blocking(move || parse_cards(contents.as_bytes())).await??;

    log::info!("Loaded {} card(s) from {}", cards.len(), path.display());
    Ok(cards)
}

pub fn parse_cards(input: impl Read) -> Result<Vec<Card>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);
    let mut cards = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let field = |i: usize| record.get(i).and_then(|v| non_blank(v.to_string()));

        let question = field(0);
        let answer = field(1);
        let image = field(3).map(|filename| ImageRef {
            filename,
            directory: field(2),
            description: field(4),
        });

        if question.is_none() && answer.is_none() && image.is_none() {
            // Header is line 1
            log::warn!("Skipping empty row {}", line + 2);
            continue;
        }

        cards.push(Card {
            question,
            answer,
            image,
        });
    }

    Ok(cards)
}
