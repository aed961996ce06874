//! Command-line front end for the driver annotation menu.
//!
//! Loads a server configuration, builds the settings store of one page,
//! replays menu actions against it, and prints the derived menu state
//! together with the filter warnings for an optional list of alterations.
//!
//! # Usage
//!
//! ```sh
//! oncodrive --config portal.json --study brca_tcga \
//!     --action distinguish-drivers=true --action cbioportal-threshold=15 \
//!     --alterations alterations.json --gene TP53 --format text
//! ```

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use oncodrive_core::{
    AnnotatedAlteration, ConfigError, CustomDriverReport, ServerConfig, SettingsStore,
    StudySelection, observable::Observable,
};
use oncodrive_menu::{FetchStatus, MutationsTabMode, SettingsMenu};

use crate::{
    cli::{Args, OutputFormat},
    output::Summary,
};

mod cli;
mod output;
mod version;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("{}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: ConfigError,
    },
    #[display("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("{}: invalid alteration list: {source}", path.display())]
    Alterations {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to serialize output: {_0}")]
    #[from]
    Output(serde_json::Error),
}

fn load_config(path: Option<&Path>) -> Result<ServerConfig, CliError> {
    let Some(path) = path else {
        log::info!("no server configuration given, all capabilities are off");
        return Ok(ServerConfig::default());
    };
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_owned(),
        source,
    })?;
    ServerConfig::from_json_reader(BufReader::new(file)).map_err(|source| CliError::Config {
        path: path.to_owned(),
        source,
    })
}

fn load_alterations(path: &Path) -> Result<Vec<AnnotatedAlteration>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Alterations {
        path: path.to_owned(),
        source,
    })
}

fn fetch_status(args: &Args) -> FetchStatus {
    let custom_driver_report = (args.custom_binary || !args.tiers.is_empty()).then(|| {
        CustomDriverReport {
            has_binary: args.custom_binary,
            tiers: args.tiers.clone(),
        }
    });
    FetchStatus {
        oncokb_failed: args.oncokb_failed,
        hotspots_failed: args.hotspots_failed,
        custom_driver_report,
    }
}

fn run(args: Args) -> Result<String, CliError> {
    let config = Observable::new(load_config(args.config.as_deref())?);
    let studies = Observable::new(args.studies.iter().cloned().collect::<StudySelection>());
    let store = SettingsStore::new(args.page.into(), config, &studies);
    let mut menu = SettingsMenu::new(store, fetch_status(&args));

    for action in args.actions {
        menu.request(action);
    }
    let rejected_actions = menu.apply_pending();
    if rejected_actions > 0 {
        log::warn!("{rejected_actions} action(s) were rejected");
    }

    if !args.switch_studies.is_empty() {
        let next = args.switch_studies.iter().cloned().collect::<StudySelection>();
        log::info!("switching study selection to {next}");
        studies.set(next);
    }

    let alterations = args
        .alterations
        .as_deref()
        .map(load_alterations)
        .transpose()?;
    let mode = args.gene.map(|gene| MutationsTabMode { gene });
    let (visible_alterations, warnings) = match &alterations {
        Some(alterations) => (
            Some(menu.visible(alterations).len()),
            menu.warnings(alterations, mode.as_ref()),
        ),
        None => (None, Vec::new()),
    };

    let summary = Summary {
        page: menu.store().page().to_string(),
        studies: studies.borrow().iter().map(str::to_owned).collect(),
        resets: menu.store().reset_count(),
        rejected_actions,
        effective: menu.effective(),
        controls: menu.controls_state(),
        visible_alterations,
        warnings,
    };

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)? + "\n",
        OutputFormat::Text => summary.to_string(),
    };
    Ok(rendered)
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    log::debug!("oncodrive {}", version::build_version());

    match run(args) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
