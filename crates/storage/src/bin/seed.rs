use std::fmt;

use quiz_core::model::{DifficultyLevel, ResourceKind};
use storage::document::{BandRecord, CatalogDocument, QuestionRecord, SubthemeRecord, ThemeRecord};
use storage::JsonFileSource;

#[derive(Debug, Clone)]
struct Args {
    out: String,
    themes: u32,
    subthemes: u32,
    questions: u32,
    proportions: [u8; 3],
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { flag: &'static str, raw: String },
    InvalidProportions { raw: String },
    InvalidOut { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidProportions { raw } => {
                write!(f, "invalid --proportions value (expected e.g. 50,30,20): {raw}")
            }
            ArgsError::InvalidOut { raw } => write!(f, "invalid --out value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_count(value: String, flag: &'static str) -> Result<u32, ArgsError> {
    value
        .parse::<u32>()
        .map_err(|_| ArgsError::InvalidCount { flag, raw: value })
}

fn parse_proportions(value: String) -> Result<[u8; 3], ArgsError> {
    let parts: Vec<u8> = value
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| ArgsError::InvalidProportions { raw: value.clone() })?;
    <[u8; 3]>::try_from(parts).map_err(|_| ArgsError::InvalidProportions { raw: value })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut out = std::env::var("QUIZ_CATALOG").unwrap_or_else(|_| "catalog.json".into());
        let mut themes = 2;
        let mut subthemes = 3;
        let mut questions = 10;
        let mut proportions = [50, 30, 20];

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => {
                    let value = require_value(&mut args, "--out")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidOut { raw: value });
                    }
                    out = value;
                }
                "--themes" => {
                    themes = parse_count(require_value(&mut args, "--themes")?, "--themes")?;
                }
                "--subthemes" => {
                    subthemes =
                        parse_count(require_value(&mut args, "--subthemes")?, "--subthemes")?;
                }
                "--questions" => {
                    questions =
                        parse_count(require_value(&mut args, "--questions")?, "--questions")?;
                }
                "--proportions" => {
                    proportions = parse_proportions(require_value(&mut args, "--proportions")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            out,
            themes,
            subthemes,
            questions,
            proportions,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out <path>              Catalog file to write (default: catalog.json)");
    eprintln!("  --themes <n>              Number of themes (default: 2)");
    eprintln!("  --subthemes <n>           Subthemes per theme (default: 3)");
    eprintln!("  --questions <n>           Questions per difficulty band (default: 10)");
    eprintln!("  --proportions <e,m,h>     Band proportions in percent (default: 50,30,20)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG (same as --out), RUST_LOG");
}

fn generate(args: &Args) -> Result<CatalogDocument, quiz_core::model::QuestionError> {
    let mut document = CatalogDocument::default();
    let mut next_question: u64 = 1;
    let mut next_subtheme: u64 = 1;

    for theme in 1..=u64::from(args.themes) {
        let mut theme_record = ThemeRecord {
            id: theme,
            name: format!("Theme {theme}"),
            subthemes: Vec::new(),
        };
        for _ in 0..args.subthemes {
            let subtheme = next_subtheme;
            next_subtheme += 1;
            let mut bands = Vec::with_capacity(DifficultyLevel::ALL.len());
            for (level, proportion) in DifficultyLevel::ALL.into_iter().zip(args.proportions) {
                let mut ids = Vec::new();
                for _ in 0..args.questions {
                    let id = next_question;
                    next_question += 1;
                    let kind = ResourceKind::from_code(u8::try_from(id % 4).unwrap_or(0) + 1)?;
                    document.questions.push(QuestionRecord {
                        id,
                        resource_kind: kind,
                        location: format!("res/{theme}/{subtheme}/{level}/{id}"),
                    });
                    ids.push(id);
                }
                bands.push(BandRecord {
                    level,
                    proportion,
                    questions: ids,
                });
            }
            document.subthemes.push(SubthemeRecord {
                id: subtheme,
                name: format!("Subtheme {theme}.{subtheme}"),
                levels: None,
                bands,
            });
            theme_record.subthemes.push(subtheme);
        }
        document.themes.push(theme_record);
    }

    Ok(document)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let document = generate(&args)?;
    // Refuse to write something the loader would reject.
    let catalog = document.clone().into_catalog()?;
    let invalid = quiz_core::validation::validate_catalog(&catalog);
    for err in &invalid {
        tracing::warn!(%err, "generated subtheme will not be selectable");
    }

    let target = JsonFileSource::new(&args.out);
    target.write_document(&document).await?;

    println!(
        "Wrote {} themes, {} subthemes and {} questions to {}",
        document.themes.len(),
        document.subthemes.len(),
        document.questions.len(),
        target.path().display()
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
