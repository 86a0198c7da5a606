mod terminal;

use std::fmt;
use std::io;

use glossary_core::model::Catalog;
use services::{AppServices, Clock, ContactForm, SubmitReceipt, contact::SUCCESS_MESSAGE};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    MissingField { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::MissingField { flag } => write!(f, "contact requires {flag}"),
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
    eprintln!("  glossary study   [--search <text>] [--category <name>] [--catalog <json>] [--seed <n>]");
    eprintln!("  glossary browse  [--search <text>] [--category <name>] [--catalog <json>]");
    eprintln!("  glossary contact --name <name> --email <email> --message <text>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GLOSSARY_CATALOG_PATH");
    eprintln!("  GLOSSARY_EMAILJS_SERVICE_ID, GLOSSARY_EMAILJS_TEMPLATE_ID, GLOSSARY_EMAILJS_PUBLIC_KEY");
    eprintln!("  GLOSSARY_EMAILJS_ENDPOINT, GLOSSARY_EMAILJS_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (e.g. info, services=debug)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Study,
    Browse,
    Contact,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "study" => Some(Self::Study),
            "browse" => Some(Self::Browse),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct StudyArgs {
    search: String,
    category: Option<String>,
    catalog_path: Option<String>,
    seed: Option<u64>,
}

impl StudyArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            catalog_path: std::env::var("GLOSSARY_CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--search" => parsed.search = require_value(args, "--search")?,
                "--category" => {
                    let value = require_value(args, "--category")?;
                    parsed.category = (!value.is_empty()).then_some(value);
                }
                "--catalog" => parsed.catalog_path = Some(require_value(args, "--catalog")?),
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn load_catalog(&self) -> Result<Catalog, Box<dyn std::error::Error>> {
        match &self.catalog_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let catalog = Catalog::from_json(&raw)?;
                log::info!("loaded {} terms from {path}", catalog.len());
                Ok(catalog)
            }
            None => Ok(Catalog::builtin()),
        }
    }
}

#[derive(Debug, Default)]
struct ContactArgs {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

impl ContactArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<ContactForm, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => parsed.name = Some(require_value(args, "--name")?),
                "--email" => parsed.email = Some(require_value(args, "--email")?),
                "--message" => parsed.message = Some(require_value(args, "--message")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(ContactForm::new(
            parsed.name.ok_or(ArgsError::MissingField { flag: "--name" })?,
            parsed.email.ok_or(ArgsError::MissingField { flag: "--email" })?,
            parsed.message.ok_or(ArgsError::MissingField { flag: "--message" })?,
        ))
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => Command::Study,
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let clock = Clock::default();

    match cmd {
        Command::Study | Command::Browse => {
            let args = StudyArgs::parse(&mut argv).inspect_err(|_| print_usage())?;
            let app = AppServices::from_env(clock, args.load_catalog()?);
            let mut study = app.study_mode();
            if let Some(seed) = args.seed {
                study = study.with_rng_seed(seed);
            }
            study.set_filter(&args.search, args.category.as_deref());

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if cmd == Command::Browse {
                let categories = study.catalog().categories();
                terminal::print_browse(&mut out, study.visible(), &categories)?;
                return Ok(());
            }
            terminal::run_study(&mut study, io::stdin().lock(), &mut out)
        }
        Command::Contact => {
            let form = ContactArgs::parse(&mut argv).inspect_err(|_| print_usage())?;
            let app = AppServices::from_env(clock, Catalog::builtin());
            match app.contact().submit(&form).await {
                Ok(SubmitReceipt { sent_at }) => {
                    println!("{SUCCESS_MESSAGE}");
                    log::debug!("sent at {sent_at}");
                    Ok(())
                }
                Err(err) => {
                    eprintln!("{}", err.user_message());
                    Err(err.into())
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
