use std::fmt;

use quiz_core::model::{SubthemeId, ThemeId};
use quiz_core::{ContentCatalog, NotFound};
use services::{Entropy, MatchRequest, QuizServices};
use storage::JsonFileSource;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { flag: &'static str },
    UnknownArg(String),
    InvalidId { flag: &'static str, raw: String },
    InvalidTheme { raw: String },
    InvalidSize { raw: String },
    InvalidSeed { raw: String },
    InvalidCatalog { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidTheme { raw } => {
                write!(f, "invalid --theme value (expected an id or a name): {raw:?}")
            }
            ArgsError::InvalidSize { raw } => {
                write!(f, "invalid --size value (expected a positive integer): {raw}")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidCatalog { raw } => write!(f, "invalid --catalog value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz validate [--catalog <path>]");
    eprintln!("  quiz themes   [--catalog <path>]");
    eprintln!(
        "  quiz select   [--catalog <path>] [--theme <id|name>] --subtheme <id> --size <n> [--seed <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --catalog catalog.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Validate,
    Themes,
    Select,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "validate" => Some(Self::Validate),
            "themes" => Some(Self::Themes),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

/// `--theme` takes either a numeric id or a theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ThemeArg {
    Id(ThemeId),
    Name(String),
}

impl ThemeArg {
    fn parse(raw: String) -> Result<Self, ArgsError> {
        if raw.trim().is_empty() {
            return Err(ArgsError::InvalidTheme { raw });
        }
        Ok(match raw.parse::<ThemeId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(raw),
        })
    }

    fn resolve(&self, catalog: &ContentCatalog) -> Result<ThemeId, NotFound> {
        match self {
            Self::Id(id) => Ok(*id),
            Self::Name(name) => catalog.theme_by_name(name).map(|theme| theme.id()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    catalog: String,
    theme: Option<ThemeArg>,
    subtheme: Option<SubthemeId>,
    size: Option<usize>,
    seed: Option<u64>,
}

impl Args {
    fn from_env() -> Self {
        Self {
            catalog: std::env::var("QUIZ_CATALOG").unwrap_or_else(|_| "catalog.json".into()),
            theme: None,
            subtheme: None,
            size: None,
            seed: std::env::var("QUIZ_SEED")
                .ok()
                .and_then(|value| value.parse::<u64>().ok()),
        }
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalog { raw: value });
                    }
                    self.catalog = value;
                }
                "--theme" => {
                    let value = require_value(args, "--theme")?;
                    self.theme = Some(ThemeArg::parse(value)?);
                }
                "--subtheme" => {
                    let value = require_value(args, "--subtheme")?;
                    let parsed =
                        value
                            .parse::<SubthemeId>()
                            .map_err(|_| ArgsError::InvalidId {
                                flag: "--subtheme",
                                raw: value.clone(),
                            })?;
                    self.subtheme = Some(parsed);
                }
                "--size" => {
                    let value = require_value(args, "--size")?;
                    let parsed = value
                        .parse::<usize>()
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| ArgsError::InvalidSize { raw: value.clone() })?;
                    self.size = Some(parsed);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    self.seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }

    fn require_selection(&self) -> Result<(SubthemeId, usize), ArgsError> {
        let subtheme = self.subtheme.ok_or(ArgsError::MissingFlag { flag: "--subtheme" })?;
        let size = self.size.ok_or(ArgsError::MissingFlag { flag: "--size" })?;
        Ok((subtheme, size))
    }
}

async fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(2);
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(0);
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let parsed = Args::from_env().parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Load once up front; every command below only reads the catalog.
    tracing::debug!(catalog = %parsed.catalog, command = ?cmd, "loading catalog");
    let source = JsonFileSource::new(&parsed.catalog);
    let services = QuizServices::bootstrap(&source, Entropy::Os).await?;

    match cmd {
        Command::Validate => {
            let errors = services.config_errors();
            for err in errors {
                println!("{err}");
            }
            if errors.is_empty() {
                println!("catalog {} is valid", parsed.catalog);
                Ok(0)
            } else {
                Ok(1)
            }
        }
        Command::Themes => {
            let catalog = services.catalog();
            for theme in catalog.themes() {
                println!("theme {} {:?}", theme.id(), theme.name());
                for subtheme in catalog.subthemes_of(theme.id())? {
                    println!("  subtheme {} {:?}", subtheme.id(), subtheme.name());
                }
            }
            Ok(0)
        }
        Command::Select => {
            let (subtheme, size) = parsed.require_selection()?;
            let matches = services.matches();
            let selection = match &parsed.theme {
                Some(theme) => matches.assemble(&MatchRequest {
                    theme: theme.resolve(&services.catalog())?,
                    subtheme,
                    size,
                    seed: parsed.seed,
                })?,
                None => matches.select_match(subtheme, size, parsed.seed)?,
            };
            tracing::debug!(
                subtheme = %selection.subtheme,
                questions = selection.len(),
                "printing selection"
            );
            println!("{}", serde_json::to_string_pretty(&selection)?);
            Ok(0)
        }
    }
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

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            // At this layer (binary glue), printing once is fine.
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Args {
        Args {
            catalog: "catalog.json".into(),
            theme: None,
            subtheme: None,
            size: None,
            seed: None,
        }
    }

    fn parse(raw: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = raw.iter().map(|s| (*s).to_string());
        base().parse(&mut iter)
    }

    #[test]
    fn parses_selection_flags() {
        let args = parse(&[
            "--catalog", "data/c.json", "--theme", "2", "--subtheme", "5", "--size", "10",
            "--seed", "99",
        ])
        .unwrap();
        assert_eq!(args.catalog, "data/c.json");
        assert_eq!(args.theme, Some(ThemeArg::Id(ThemeId::new(2))));
        assert_eq!(args.require_selection().unwrap(), (SubthemeId::new(5), 10));
        assert_eq!(args.seed, Some(99));
    }

    #[test]
    fn theme_accepts_a_name() {
        let args = parse(&["--theme", "World History"]).unwrap();
        assert_eq!(args.theme, Some(ThemeArg::Name("World History".into())));
        assert_eq!(
            parse(&["--theme", " "]).unwrap_err(),
            ArgsError::InvalidTheme { raw: " ".into() }
        );
    }

    #[test]
    fn theme_name_resolves_through_the_catalog() {
        use quiz_core::model::{Subtheme, Theme};

        let mut builder = ContentCatalog::builder();
        builder
            .add_subtheme(Subtheme::with_all_levels(SubthemeId::new(4), "Rome"))
            .add_theme(Theme::new(ThemeId::new(9), "World History", [SubthemeId::new(4)]));
        let catalog = builder.build().unwrap();

        let by_name = ThemeArg::Name("world history".into());
        assert_eq!(by_name.resolve(&catalog).unwrap(), ThemeId::new(9));
        let missing = ThemeArg::Name("Art".into());
        assert_eq!(
            missing.resolve(&catalog).unwrap_err(),
            NotFound::ThemeName("Art".into())
        );
    }

    #[test]
    fn rejects_zero_size() {
        assert_eq!(
            parse(&["--size", "0"]).unwrap_err(),
            ArgsError::InvalidSize { raw: "0".into() }
        );
    }

    #[test]
    fn select_requires_subtheme_and_size() {
        let args = parse(&["--size", "3"]).unwrap();
        assert_eq!(
            args.require_selection().unwrap_err(),
            ArgsError::MissingFlag { flag: "--subtheme" }
        );
    }

    #[test]
    fn reports_missing_value_and_unknown_flag() {
        assert_eq!(
            parse(&["--seed"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--seed" }
        );
        assert_eq!(
            parse(&["--bogus"]).unwrap_err(),
            ArgsError::UnknownArg("--bogus".into())
        );
    }

    #[test]
    fn subcommands() {
        assert_eq!(Command::from_arg("select"), Some(Command::Select));
        assert_eq!(Command::from_arg("serve"), None);
    }
}
