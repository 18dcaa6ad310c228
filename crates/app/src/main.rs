use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::links::{DEFAULT_APPLY_URL, DEFAULT_HOMEPAGE_URL, ExternalLinks, LinkError};
use quiz_core::names::{resolve_description, resolve_image};
use services::{
    AppServices, ImageLoader, QuizCatalogs, QuizFlowService, ResultService, scan_image_dir,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_IMAGE_DIR: &str = "assets/members";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLink(LinkError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLink(err) => write!(f, "invalid link configuration: {err}"),
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

struct DesktopApp {
    services: AppServices,
    links: ExternalLinks,
}

impl UiApp for DesktopApp {
    fn quiz_flow(&self) -> Arc<QuizFlowService> {
        self.services.quiz_flow()
    }

    fn results(&self) -> Arc<ResultService> {
        self.services.results()
    }

    fn image_loader(&self) -> Arc<dyn ImageLoader> {
        self.services.image_loader()
    }

    fn links(&self) -> ExternalLinks {
        self.links.clone()
    }
}

struct Args {
    db_url: String,
    data_dir: Option<PathBuf>,
    image_dir: PathBuf,
    links: ExternalLinks,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--data-dir <dir>] [--images <dir>]");
    eprintln!("  cargo run -p app -- check [--data-dir <dir>] [--images <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --data-dir <bundled catalogs>");
    eprintln!("  --images {DEFAULT_IMAGE_DIR}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_DATA_DIR, QUIZ_IMAGE_DIR, QUIZ_HOMEPAGE_URL, QUIZ_APPLY_URL");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL.into()), normalize_sqlite_url);
        let mut data_dir = std::env::var_os("QUIZ_DATA_DIR").map(PathBuf::from);
        let mut image_dir = std::env::var_os("QUIZ_IMAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--data-dir" => {
                    data_dir = Some(PathBuf::from(require_value(args, "--data-dir")?));
                }
                "--images" => {
                    image_dir = PathBuf::from(require_value(args, "--images")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let homepage = std::env::var("QUIZ_HOMEPAGE_URL").ok();
        let apply = std::env::var("QUIZ_APPLY_URL").ok();
        let links = ExternalLinks::new(
            homepage.as_deref().unwrap_or(DEFAULT_HOMEPAGE_URL),
            apply.as_deref().unwrap_or(DEFAULT_APPLY_URL),
        )
        .map_err(ArgsError::InvalidLink)?;

        Ok(Self {
            db_url,
            data_dir,
            image_dir,
            links,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    match cmd {
        Command::Ui => launch_ui(parsed).await,
        Command::Check => check(&parsed),
    }
}

async fn launch_ui(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let catalogs = QuizCatalogs::load_or_empty(args.data_dir.as_deref());
    let images = scan_image_dir(&args.image_dir);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, catalogs, images).await?;
    info!(db = %args.db_url, "storage ready");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        links: args.links,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("PRIMITIVE")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

/// Load every catalog strictly and report what the result page could show.
fn check(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let catalogs = QuizCatalogs::load(args.data_dir.as_deref())?;
    let images = scan_image_dir(&args.image_dir);

    println!("questions:    {}", catalogs.questions.len());
    println!("members:      {}", catalogs.members.len());
    println!("descriptions: {}", catalogs.descriptions.len());
    println!("images:       {}", images.len());

    let total = catalogs.questions.len();
    for member in catalogs.members.members() {
        let mut gaps = Vec::new();
        if member.expected_answers().len() != total {
            gaps.push(format!(
                "{} answers for {total} questions",
                member.expected_answers().len()
            ));
        }
        if resolve_description(member.identity(), catalogs.descriptions.descriptions()).is_none() {
            gaps.push("no description".to_string());
        }
        if resolve_image(member, images.images()).is_none() {
            gaps.push("no photo".to_string());
        }
        if !gaps.is_empty() {
            println!("  {} ({}): {}", member.identity(), member.student_id(), gaps.join(", "));
        }
    }

    println!("homepage: {}", args.links.homepage());
    println!("apply:    {}", args.links.apply());
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
