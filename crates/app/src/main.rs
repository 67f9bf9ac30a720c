use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, GeminiConfig, QuizService, QuizSettings};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidModel { raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidModel { raw } => write!(f, "invalid --model value: {raw:?}"),
            ArgsError::InvalidDelay { raw } => {
                write!(f, "invalid --advance-delay-ms value: {raw}")
            }
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
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    model: Option<String>,
    advance_delay: Option<Duration>,
    show_help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <name>] [--advance-delay-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --model gemini-2.0-flash");
    eprintln!("  --advance-delay-ms 500");
    eprintln!();
    eprintln!("Environment (a .env file in the working directory is loaded first):");
    eprintln!("  QUIZ_AI_API_KEY (or GEMINI_API_KEY), QUIZ_AI_BASE_URL, QUIZ_AI_MODEL");
    eprintln!("  QUIZ_ADVANCE_DELAY_MS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => {
                    let value = require_value(args, "--model")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidModel { raw: value });
                    }
                    parsed.model = Some(value);
                }
                "--advance-delay-ms" => {
                    let value = require_value(args, "--advance-delay-ms")?;
                    let millis: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    parsed.advance_delay = Some(Duration::from_millis(millis));
                }
                "--help" | "-h" => parsed.show_help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.show_help {
        print_usage();
        return Ok(());
    }

    let mut settings = QuizSettings::from_env();
    if let Some(delay) = args.advance_delay {
        settings.advance_delay = delay;
    }
    let config = GeminiConfig::from_env().map(|config| match args.model {
        Some(model) => config.with_model(model),
        None => config,
    });
    if let Some(config) = config.as_ref() {
        tracing::info!(model = %config.model, "question generation configured");
    }

    let services = AppServices::gemini(config, settings);
    if !services.generation_enabled() {
        tracing::warn!(
            "no API key found in QUIZ_AI_API_KEY or GEMINI_API_KEY; every quiz will fail to load"
        );
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_service: services.quiz(),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("AI News Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
