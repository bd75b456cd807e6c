#![forbid(unsafe_code)]

//! Periodic catalog harness binary entry point.
//!
//! Loads a catalog, replays the scripted interactions, and prints the final
//! frame. Logs go to stderr and follow `RUST_LOG`.

mod cli;
mod report;

use std::fs;
use std::process;

use ptable::core::sample::SAMPLE_CATALOG_JSON;
use ptable::{CatalogMsg, CatalogView, Error};
use tracing_subscriber::EnvFilter;

use crate::cli::{Format, Opts, Step};
use crate::report::Report;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    if let Err(err) = run(&opts) {
        eprintln!("ptable-harness: {err}");
        process::exit(1);
    }
}

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = ptable::config_from_env()?;
    let json = match &opts.catalog {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_CATALOG_JSON.to_string(),
    };
    let mut view = ptable::open(&json, config)?.with_width(opts.width);
    view.update(CatalogMsg::SetViewMode(opts.view));

    for step in &opts.script {
        let msg = resolve(&view, step)?;
        let changed = view.update(msg);
        tracing::debug!(?step, changed, "replayed");
    }

    let suggestions = view.suggestions();
    let width = view.width();
    let frame = view.frame();
    let report = Report {
        width,
        suggestions: &suggestions,
        frame: &frame,
    };
    match opts.format {
        Format::Summary => print!("{}", report.to_summary()),
        Format::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Turn a scripted step into a message, labelling picks from the catalog.
fn resolve(view: &CatalogView, step: &Step) -> Result<CatalogMsg, Error> {
    match step {
        Step::Msg(msg) => Ok(msg.clone()),
        Step::Pick(id) => {
            let cell = view
                .catalog()
                .cells
                .get(id)
                .ok_or_else(|| Error::Catalog(ptable::CatalogError::InvalidCellId(id.to_string())))?;
            let display = cell.name().unwrap_or(&cell.symbol).to_string();
            Ok(CatalogMsg::PickSuggestion {
                cell: id.clone(),
                display,
            })
        }
    }
}
