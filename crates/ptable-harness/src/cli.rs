#![forbid(unsafe_code)]

//! Command-line argument parsing for the harness.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `PTABLE_HARNESS_*` prefix; explicit flags win over the environment.
//! Interaction flags are replayed in the order they appear.

use std::env;
use std::fmt;
use std::process;

use ptable::{CatalogMsg, CellId, ViewMode};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Periodic catalog harness: replay interactions and print the resulting frame

USAGE:
    ptable-harness [OPTIONS] [INTERACTIONS]

OPTIONS:
    --catalog=PATH       Catalog JSON document (default: bundled sample)
    --width=PX           Initial container width in pixels (default: 1280)
    --view=MODE          'colors' (default) or 'photos'
    --format=FMT         'summary' (default) or 'json'
    --help, -h           Show this help message
    --version, -V        Show version

INTERACTIONS (applied in order):
    --category=KEY       Select a category ('all' clears the filter)
    --query=TEXT         Edit the search query
    --submit             Focus the top suggestion for the current query
    --pick=ID            Focus a cell by id, e.g. 4-18-NaOH
    --hover=ID           Hover a cell by id
    --leave              Clear the hover
    --resize=PX          Change the container width

ENVIRONMENT VARIABLES:
    PTABLE_HARNESS_CATALOG    Override --catalog
    PTABLE_HARNESS_WIDTH      Override --width
    PTABLE_HARNESS_VIEW       Override --view
    PTABLE_HARNESS_FORMAT     Override --format
    PTABLE_*                  Catalog tunables (cell sizes, caches, ...)
    RUST_LOG                  Log filter, written to stderr";

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Summary,
    Json,
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Msg(CatalogMsg),
    /// Pick by id; the display text is resolved against the loaded catalog.
    Pick(CellId),
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Catalog path; `None` means the bundled sample.
    pub catalog: Option<String>,
    pub width: f64,
    pub view: ViewMode,
    pub format: Format,
    /// Interactions to replay after loading.
    pub script: Vec<Step>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            catalog: None,
            width: 1280.0,
            view: ViewMode::Colors,
            format: Format::Summary,
            script: Vec::new(),
        }
    }
}

/// Outcome of parsing that is not a set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    Help,
    Version,
    Invalid(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str(HELP_TEXT),
            Self::Version => write!(f, "ptable-harness {VERSION}"),
            Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse process arguments and environment, exiting on help, version,
    /// or invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(err @ (CliError::Help | CliError::Version)) => {
                println!("{err}");
                process::exit(0);
            }
            Err(CliError::Invalid(msg)) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `get`.
    pub fn parse_from<F>(args: &[String], mut get: F) -> Result<Self, CliError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first, flags override.
        if let Some(val) = get("PTABLE_HARNESS_CATALOG") {
            opts.catalog = Some(val);
        }
        if let Some(val) = get("PTABLE_HARNESS_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = n;
        }
        if let Some(val) = get("PTABLE_HARNESS_VIEW")
            && let Ok(mode) = val.parse()
        {
            opts.view = mode;
        }
        if let Some(val) = get("PTABLE_HARNESS_FORMAT")
            && let Ok(format) = parse_format(&val)
        {
            opts.format = format;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Err(CliError::Help),
                "--version" | "-V" => return Err(CliError::Version),
                "--submit" => opts.push(CatalogMsg::SubmitSearch),
                "--leave" => opts.push(CatalogMsg::HoverLeave),
                other => opts.apply_valued(other)?,
            }
        }

        Ok(opts)
    }

    fn push(&mut self, msg: CatalogMsg) {
        self.script.push(Step::Msg(msg));
    }

    fn apply_valued(&mut self, arg: &str) -> Result<(), CliError> {
        let Some((flag, val)) = arg.split_once('=') else {
            return Err(CliError::Invalid(format!("Unknown argument: {arg}")));
        };
        match flag {
            "--catalog" => self.catalog = Some(val.to_string()),
            "--width" => self.width = parse_width(flag, val)?,
            "--view" => {
                self.view = val
                    .parse()
                    .map_err(|e| CliError::Invalid(format!("Invalid --view value: {e}")))?;
            }
            "--format" => self.format = parse_format(val)?,
            "--category" => self.push(CatalogMsg::SelectCategory(val.to_string())),
            "--query" => self.push(CatalogMsg::EditQuery(val.to_string())),
            "--pick" => self.script.push(Step::Pick(parse_id(flag, val)?)),
            "--hover" => self.push(CatalogMsg::HoverEnter(parse_id(flag, val)?)),
            "--resize" => self.push(CatalogMsg::Resize(parse_width(flag, val)?)),
            _ => return Err(CliError::Invalid(format!("Unknown argument: {arg}"))),
        }
        Ok(())
    }
}

fn parse_width(flag: &str, val: &str) -> Result<f64, CliError> {
    val.parse()
        .map_err(|_| CliError::Invalid(format!("Invalid {flag} value: {val}")))
}

fn parse_id(flag: &str, val: &str) -> Result<CellId, CliError> {
    val.parse()
        .map_err(|e| CliError::Invalid(format!("Invalid {flag} value: {e}")))
}

fn parse_format(val: &str) -> Result<Format, CliError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "summary" | "text" => Ok(Format::Summary),
        "json" => Ok(Format::Json),
        _ => Err(CliError::Invalid(format!("Invalid --format value: {val}"))),
    }
}
