mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use duplex_cards::{CardLayoutOptions, GridMapper, ImageStore};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dcards", about = "Duplex flashcard PDF generator", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render front and back PDFs from a CSV deck
    Render {
        /// Input CSV file (columns: question, answer, image_directory,
        /// image_filename, image_description)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the generated PDFs (defaults to the current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output file name stem (defaults to the CSV file name)
        #[arg(long)]
        stem: Option<String>,

        /// Options file written by `init-config`; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Text overflow handling
        #[arg(long, value_enum)]
        overflow: Option<OverflowArg>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Font file to embed; repeat to give fallbacks in priority order
        #[arg(long = "font")]
        fonts: Vec<PathBuf>,
    },

    /// Print page counts and card placements without rendering
    Layout {
        /// Number of cards in the deck
        #[arg(long)]
        cards: usize,

        /// Options file written by `init-config`; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,
    },

    /// Write the default options as JSON
    InitConfig {
        /// Destination file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct GridArgs {
    /// Columns per page
    #[arg(long)]
    columns: Option<usize>,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// How back cells are matched to front cells
    #[arg(long, value_enum)]
    duplex: Option<DuplexArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplexArg {
    /// Mirror columns on the same page (flip on long edge)
    Mirrored,
    /// Mirror columns and reverse the back page order
    Reversed,
}

#[derive(Clone, Copy, ValueEnum)]
enum OverflowArg {
    Shrink,
    Truncate,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    TwoFiles,
    Interleaved,
}

impl From<PaperArg> for duplex_cards::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<DuplexArg> for duplex_cards::DuplexPolicy {
    fn from(arg: DuplexArg) -> Self {
        match arg {
            DuplexArg::Mirrored => Self::MirroredColumns,
            DuplexArg::Reversed => Self::ReversedPages,
        }
    }
}

impl From<OverflowArg> for duplex_cards::OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Shrink => Self::ShrinkToFit,
            OverflowArg::Truncate => Self::Truncate,
        }
    }
}

impl From<FormatArg> for duplex_cards::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::TwoFiles => Self::TwoFiles,
            FormatArg::Interleaved => Self::Interleaved,
        }
    }
}

async fn base_options(config: Option<&Path>) -> Result<CardLayoutOptions> {
    match config {
        Some(path) => CardLayoutOptions::load(path)
            .await
            .with_context(|| format!("Reading options from {}", path.display())),
        None => Ok(CardLayoutOptions::default()),
    }
}

fn apply_grid(mut options: CardLayoutOptions, grid: &GridArgs, paper: Option<PaperArg>) -> CardLayoutOptions {
    if let Some(paper) = paper {
        options = options.with_paper(paper.into());
    }
    if let Some(columns) = grid.columns {
        options.columns = columns;
    }
    if let Some(rows) = grid.rows {
        options.rows = rows;
    }
    if let Some(duplex) = grid.duplex {
        options.duplex_policy = duplex.into();
    }
    options
}

fn print_layout(mapper: &GridMapper) {
    let grid = mapper.grid();
    println!("Layout:");
    println!(
        "  Grid: {} x {} ({} cards per page)",
        grid.columns(),
        grid.rows(),
        grid.cards_per_page()
    );
    println!("  Cell: {:.1} x {:.1} pt", grid.cell_width(), grid.cell_height());
    println!("  Duplex policy: {:?}", mapper.policy());
    println!("  Cards: {}", mapper.card_count());
    println!("  Pages per side: {}", mapper.page_count());

    for index in 0..mapper.card_count() {
        let front = mapper.front(index);
        let back = mapper.back(index);
        println!(
            "  #{index:<4} front p{} r{} c{}  ->  back p{} r{} c{}",
            front.page + 1,
            front.row,
            front.col,
            back.page + 1,
            back.row,
            back.col
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::from_verbosity(cli.verbose).init()?;

    match cli.command {
        Commands::Render {
            input,
            output_dir,
            stem,
            config,
            grid,
            paper,
            overflow,
            format,
            fonts,
        } => {
            let mut options = apply_grid(base_options(config.as_deref()).await?, &grid, paper);
            if let Some(overflow) = overflow {
                options.overflow_policy = overflow.into();
            }
            if let Some(format) = format {
                options.output_format = format.into();
            }
            if !fonts.is_empty() {
                options.font_candidates = fonts;
            }
            options.validate()?;

            let cards = duplex_cards::load_from_csv(&input)
                .await
                .with_context(|| format!("Loading deck {}", input.display()))?;
            if cards.is_empty() {
                bail!("{} contains no cards", input.display());
            }

            // Image paths in the deck are relative to the CSV file
            let deck_dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
            let images = ImageStore::preload(&cards, &deck_dir).await;

            let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
            tokio::fs::create_dir_all(&output_dir).await?;
            let stem = stem.unwrap_or_else(|| {
                input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "flashcards".to_string())
            });

            let written =
                duplex_cards::generate_pdfs(&cards, &options, images, &output_dir, &stem).await?;
            println!("Generated {} flashcards:", cards.len());
            for path in written {
                println!("  → {}", path.display());
            }
        }

        Commands::Layout {
            cards,
            config,
            grid,
            paper,
        } => {
            let options = apply_grid(base_options(config.as_deref()).await?, &grid, paper);
            let mapper = GridMapper::new(options.grid_spec()?, options.duplex_policy, cards);
            print_layout(&mapper);
        }

        Commands::InitConfig { path, force } => {
            if !force && tokio::fs::try_exists(&path).await? {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            CardLayoutOptions::default().save(&path).await?;
            println!("Wrote default options → {}", path.display());
        }
    }

    Ok(())
}
