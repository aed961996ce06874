//! Read-only state of the driver annotation menu.
//!
//! [`build_controls_state`] derives everything the menu shows from the
//! settings, the server configuration, and the annotation status. The
//! result is a snapshot; build a new one after every change instead of
//! keeping it around.

use oncodrive_core::{DriverAnnotationSettings, ExclusionSettings, ServerConfig};
use serde::Serialize;

use crate::status::AnnotationStatus;

/// Menu entry for an annotation source fetched from an external service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceControl {
    /// Checkbox value, with capability gating applied.
    pub selected: bool,
    /// The server has this source switched off.
    pub disabled: bool,
    /// The latest fetch for this source failed.
    pub error: bool,
}

impl SourceControl {
    /// Returns `true` if a bulk selection may switch this source on.
    #[must_use]
    pub fn can_select(&self) -> bool {
        !self.disabled && !self.error
    }
}

/// Menu entry for a recurrence-count mechanism.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CountControl {
    pub selected: bool,
    /// Threshold as shown in the input box.
    pub threshold_input: String,
}

/// Custom binary driver entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomBinaryControl {
    pub label: String,
    pub selected: bool,
}

/// One custom driver tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierControl {
    pub name: String,
    pub selected: bool,
}

/// Custom tiered driver entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTiersControl {
    pub label: String,
    /// Tiers in the order the dataset reports them.
    pub tiers: Vec<TierControl>,
}

/// Custom driver entries. Each is present only if the dataset carries that
/// kind of annotation and the server configured a label for it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDriverControls {
    pub binary: Option<CustomBinaryControl>,
    pub tiers: Option<CustomTiersControl>,
}

/// Everything the driver annotation menu displays.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[expect(clippy::struct_excessive_bools)]
pub struct DriverControlsState {
    /// Master checkbox: any driver mechanism active.
    pub distinguish_drivers: bool,
    pub oncokb: SourceControl,
    pub hotspots: SourceControl,
    pub cbioportal: CountControl,
    pub cosmic: CountControl,
    pub custom: CustomDriverControls,
    /// Effective VUS exclusion.
    pub hide_putative_passengers: bool,
    pub hide_unprofiled_samples: bool,
    pub exclude_germline_mutations: bool,
}

fn build_custom_controls(
    settings: &DriverAnnotationSettings,
    config: &ServerConfig,
    status: &impl AnnotationStatus,
) -> CustomDriverControls {
    let Some(report) = status.custom_driver_report() else {
        return CustomDriverControls::default();
    };

    let binary = config
        .custom_binary_menu_label()
        .filter(|_| report.has_binary)
        .map(|label| CustomBinaryControl {
            label: label.to_owned(),
            selected: settings.custom_binary(config),
        });

    let tiers = config
        .custom_tiers_menu_label()
        .filter(|_| !report.tiers.is_empty())
        .map(|label| CustomTiersControl {
            label: label.to_owned(),
            tiers: report
                .tiers
                .iter()
                .map(|name| TierControl {
                    name: name.clone(),
                    selected: settings.driver_tier(name),
                })
                .collect(),
        });

    CustomDriverControls { binary, tiers }
}

/// Derives the menu state from the current settings.
#[must_use]
pub fn build_controls_state(
    settings: &DriverAnnotationSettings,
    exclusion: &ExclusionSettings,
    config: &ServerConfig,
    status: &impl AnnotationStatus,
) -> DriverControlsState {
    DriverControlsState {
        distinguish_drivers: settings.drivers_annotated(config),
        oncokb: SourceControl {
            selected: settings.oncokb(config),
            disabled: !config.show_oncokb,
            error: status.oncokb_failed(),
        },
        hotspots: SourceControl {
            selected: settings.hotspots(config),
            disabled: !config.show_hotspot,
            error: status.hotspots_failed(),
        },
        cbioportal: CountControl {
            selected: settings.cbioportal_count(),
            threshold_input: settings.cbioportal_count_threshold().to_string(),
        },
        cosmic: CountControl {
            selected: settings.cosmic_count(),
            threshold_input: settings.cosmic_count_threshold().to_string(),
        },
        custom: build_custom_controls(settings, config, status),
        hide_putative_passengers: settings.exclude_vus(config),
        hide_unprofiled_samples: exclusion.hide_unprofiled_samples,
        exclude_germline_mutations: exclusion.exclude_germline_mutations,
    }
}
