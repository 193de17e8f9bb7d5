// SheetClerk CLI - sign-up workflows and Zoho imports over a CSV workbook

mod copy;
mod exit_codes;
mod export;
mod fetch;
mod help;
mod import;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sheetclerk_config::{ConfigError, Properties};
use sheetclerk_io::{StoreError, Workbook};
use sheetclerk_signup::SignupSettings;

use exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use fetch::{BooksClient, CreatorClient, ReportsClient};

#[derive(Parser)]
#[command(name = "clerk")]
#[command(about = "Sign-up bookkeeping for a dojo: intro-class tracking, Zoho Books contacts, Zoho report imports")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Workbook directory (one <sheet>.csv per sheet)
    #[arg(long, short = 'w', global = true, env = "SHEETCLERK_WORKBOOK", default_value = ".")]
    workbook: PathBuf,

    /// Workflow settings TOML (default: built-in settings)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Properties TOML with Zoho credentials
    /// (default: <config dir>/sheetclerk/properties.toml)
    #[arg(long, global = true, env = "SHEETCLERK_PROPERTIES")]
    properties: Option<PathBuf>,

    /// Override the Zoho API host (e.g. a local mock server)
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a Zoho Books contact from one sign-up row
    #[command(after_help = "\
Examples:
  clerk export-contact --row 7
  clerk export-contact --row 7 --dry-run
  SHEETCLERK_ZOHO_TOKEN=... clerk export-contact --row 7")]
    ExportContact {
        /// Row number in the sign-up sheet (row 1 is the header)
        #[arg(long)]
        row: usize,

        /// Print the contact JSON instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Copy new sign-ups into the intro-class sheet
    #[command(after_help = "\
Examples:
  clerk copy-new --row 42
  clerk -w ~/dojo copy-new --row 42")]
    CopyNew {
        /// Blank row of the intro sheet where new records start
        #[arg(long)]
        row: usize,
    },

    /// Replace a sheet with a Zoho Creator view
    #[command(after_help = "\
Examples:
  clerk import-creator
  clerk import-creator event-staff/view/Event_Staffing_Report --sheet Staff")]
    ImportCreator {
        /// Creator view: <application>/view/<report>
        #[arg(default_value = fetch::creator::DEFAULT_VIEW)]
        view: String,

        /// Destination sheet (default: the view's report name)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Replace a sheet with a Zoho Reports table export
    ImportReport {
        /// Destination sheet
        #[arg(long, default_value = "Pipeline Report")]
        sheet: String,
    },

    /// Explain the copy and export workflows
    HowToUse,

    /// Print the effective workflow settings as TOML
    Settings,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.settings.as_deref())?;
    let workbook = Workbook::open(&cli.workbook);
    log::debug!("workbook {}", workbook.dir().display());
    let api_base = cli.api_base.as_deref();

    match cli.command {
        Commands::ExportContact { row, dry_run } => {
            let signup = workbook.require_sheet(&settings.signup_sheet).map_err(CliError::store)?;
            let payload = export::contact_payload(&signup, &settings, row)?;
            if dry_run {
                let json = serde_json::to_string_pretty(&payload)
                    .map_err(|e| CliError::args(format!("cannot encode contact: {}", e)))?;
                println!("{}", json);
                return Ok(());
            }
            let properties = load_properties(cli.properties.as_deref())?;
            let books = BooksClient::from_properties(&properties, api_base)?;
            let message = books.create_contact(&payload)?;
            println!("{}", message);
            Ok(())
        }
        Commands::CopyNew { row } => {
            let signup = workbook.require_sheet(&settings.signup_sheet).map_err(CliError::store)?;
            let prices = workbook.require_sheet(&settings.prices_sheet).map_err(CliError::store)?;
            let mut intro = workbook.sheet(&settings.intro_sheet);
            let today = chrono::Local::now().date_naive();
            let copied = copy::copy_new_visitors(&signup, &prices, &mut intro, &settings, row, today)?;
            println!("{}", copy::outcome_message(copied));
            Ok(())
        }
        Commands::ImportCreator { view, sheet } => {
            let properties = load_properties(cli.properties.as_deref())?;
            let creator = CreatorClient::from_properties(&properties, api_base)?;
            let updated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let rows = creator.fetch_view(&view, &updated)?;

            let name = sheet.unwrap_or_else(|| import::sheet_for_view(&view).to_string());
            let mut target = workbook.sheet(&name);
            let written = import::replace_sheet(&mut target, rows)?;
            println!("{} row(s) imported into '{}'.", written, name);
            Ok(())
        }
        Commands::ImportReport { sheet } => {
            let properties = load_properties(cli.properties.as_deref())?;
            let reports = ReportsClient::from_properties(&properties, api_base)?;
            let rows = reports.fetch_report()?;

            let mut target = workbook.sheet(&sheet);
            let written = import::replace_sheet(&mut target, rows)?;
            println!("{} row(s) imported into '{}'.", written, sheet);
            Ok(())
        }
        Commands::HowToUse => {
            print!("{}", help::how_to_use(&settings));
            Ok(())
        }
        Commands::Settings => {
            let toml = settings.to_toml().map_err(|e| CliError::config(e.to_string()))?;
            print!("{}", toml);
            Ok(())
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<SignupSettings, CliError> {
    let Some(path) = path else {
        return Ok(SignupSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
    SignupSettings::from_toml(&text).map_err(|e| CliError {
        code: EXIT_CONFIG,
        message: format!("{}: {}", path.display(), e),
        hint: Some("run `clerk settings` to see every key with its default".to_string()),
    })
}

fn load_properties(path: Option<&Path>) -> Result<Properties, CliError> {
    Properties::load(path).map_err(|e| match e {
        err @ ConfigError::Read { .. } => CliError::io(err.to_string()),
        other => CliError::config(other.to_string()),
    })
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn store(err: StoreError) -> Self {
        let hint = match &err {
            StoreError::Missing { .. } => Some(
                "check --workbook, and the sheet names in --settings (`clerk settings` lists them)"
                    .to_string(),
            ),
            _ => None,
        };
        Self { code: EXIT_IO, message: err.to_string(), hint }
    }
}
