use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use oncodrive_core::PageContext;
use oncodrive_menu::SettingsAction;

use crate::version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PageArg {
    Results,
    Study,
}

impl From<PageArg> for PageContext {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Results => PageContext::ResultsView,
            PageArg::Study => PageContext::StudyView,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

/// Replays driver annotation menu actions and prints the resulting state.
#[derive(Debug, Parser)]
#[command(author, version = version::build_version(), about)]
pub(crate) struct Args {
    /// Server configuration JSON file. Without it every capability is off.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Page context the settings belong to.
    #[arg(long, value_name = "PAGE", default_value = "results")]
    pub(crate) page: PageArg,

    /// Selected study identifier. Repeatable.
    #[arg(long = "study", value_name = "ID")]
    pub(crate) studies: Vec<String>,

    /// Study selection to switch to after the actions ran. Repeatable.
    #[arg(long = "switch-study", value_name = "ID")]
    pub(crate) switch_studies: Vec<String>,

    /// Treat the latest OncoKB fetch as failed.
    #[arg(long)]
    pub(crate) oncokb_failed: bool,

    /// Treat the latest hotspot fetch as failed.
    #[arg(long)]
    pub(crate) hotspots_failed: bool,

    /// The dataset carries custom binary driver annotations.
    #[arg(long)]
    pub(crate) custom_binary: bool,

    /// Custom driver tier present in the dataset. Repeatable.
    #[arg(long = "tier", value_name = "NAME")]
    pub(crate) tiers: Vec<String>,

    /// Menu action such as `hotspots=true` or `cosmic-threshold=5`. Repeatable.
    #[arg(long = "action", value_name = "ACTION", value_parser = parse_action)]
    pub(crate) actions: Vec<SettingsAction>,

    /// JSON list of annotated alterations to filter and summarize.
    #[arg(long, value_name = "FILE")]
    pub(crate) alterations: Option<PathBuf>,

    /// Word warnings for the mutations tab of this gene.
    #[arg(long, value_name = "SYMBOL")]
    pub(crate) gene: Option<String>,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum ParseActionError {
    #[display("expected KEY=VALUE, got {input:?}")]
    MissingValue { input: String },
    #[display("unknown action {key:?}")]
    UnknownKey { key: String },
    #[display("invalid boolean {value:?} for {key:?}")]
    InvalidBool { key: String, value: String },
    #[display("tier name must not be empty")]
    EmptyTier,
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ParseActionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ParseActionError::InvalidBool {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

/// Parses `KEY=VALUE` into a menu action.
pub(crate) fn parse_action(input: &str) -> Result<SettingsAction, ParseActionError> {
    let Some((key, value)) = input.rsplit_once('=') else {
        return Err(ParseActionError::MissingValue {
            input: input.to_owned(),
        });
    };
    let key = key.trim();

    if let Some(tier) = key.strip_prefix("tier:") {
        let tier = tier.trim();
        if tier.is_empty() {
            return Err(ParseActionError::EmptyTier);
        }
        return Ok(SettingsAction::SelectCustomDriverAnnotationTier {
            tier: tier.to_owned(),
            selected: parse_bool(key, value)?,
        });
    }

    let action = match key {
        "distinguish-drivers" => SettingsAction::SelectDistinguishDrivers(parse_bool(key, value)?),
        "oncokb" => SettingsAction::SelectAnnotateOncoKb(parse_bool(key, value)?),
        "hotspots" => SettingsAction::SelectAnnotateHotspots(parse_bool(key, value)?),
        "cbioportal" => SettingsAction::SelectAnnotateCBioPortal(parse_bool(key, value)?),
        "cosmic" => SettingsAction::SelectAnnotateCosmic(parse_bool(key, value)?),
        "custom-binary" => {
            SettingsAction::SelectCustomDriverAnnotationBinary(parse_bool(key, value)?)
        }
        "hide-vus" => SettingsAction::SelectHidePutativePassengers(parse_bool(key, value)?),
        "cbioportal-threshold" => {
            SettingsAction::ChangeAnnotateCBioPortalInputValue(value.to_owned())
        }
        "cosmic-threshold" => SettingsAction::ChangeAnnotateCosmicInputValue(value.to_owned()),
        "hide-unprofiled" => SettingsAction::SelectHideUnprofiledSamples(parse_bool(key, value)?),
        "exclude-germline" => {
            SettingsAction::SelectExcludeGermlineMutations(parse_bool(key, value)?)
        }
        _ => {
            return Err(ParseActionError::UnknownKey {
                key: key.to_owned(),
            });
        }
    };
    Ok(action)
}
