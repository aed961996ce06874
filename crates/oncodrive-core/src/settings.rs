//! Driver annotation settings.
//!
//! [`DriverAnnotationSettings`] stores the user's preferences as they were
//! entered. Reads that depend on server capabilities take the current
//! [`ServerConfig`] and resolve the effective value at call time, so a
//! capability switched off later hides a preference without erasing it.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::ServerConfig;

/// Recurrence threshold applied by [`DriverAnnotationSettings::initialize`].
pub const DEFAULT_COUNT_THRESHOLD: u32 = 10;

/// Resolves a stored preference against a capability flag.
///
/// The preference only takes effect while the capability is on.
#[must_use]
pub const fn gated(stored: bool, capability: bool) -> bool {
    stored && capability
}

/// Resolves a tri-state preference against its configured default.
#[must_use]
pub const fn or_default(stored: Option<bool>, default: bool) -> bool {
    match stored {
        Some(value) => value,
        None => default,
    }
}

/// Which custom driver labels are present in the loaded dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDriverReport {
    /// Whether any alteration carries the custom binary driver flag.
    pub has_binary: bool,
    /// Tier labels found in the dataset.
    pub tiers: Vec<String>,
}

/// Mutable driver annotation preferences for one page context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::struct_excessive_bools)]
pub struct DriverAnnotationSettings {
    exclude_vus: bool,
    cbioportal_count: bool,
    cbioportal_count_threshold: u32,
    cosmic_count: bool,
    cosmic_count_threshold: u32,
    custom_binary: Option<bool>,
    custom_tiers_default: bool,
    driver_tiers: BTreeMap<String, bool>,
    hotspots: bool,
    oncokb: bool,
}

impl DriverAnnotationSettings {
    /// Creates settings initialized from `config`.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            exclude_vus: config.oncoprint_hide_vus_default,
            cbioportal_count: false,
            cbioportal_count_threshold: DEFAULT_COUNT_THRESHOLD,
            cosmic_count: false,
            cosmic_count_threshold: DEFAULT_COUNT_THRESHOLD,
            custom_binary: None,
            custom_tiers_default: config.oncoprint_custom_driver_annotation_tiers_default,
            driver_tiers: BTreeMap::new(),
            hotspots: config.oncoprint_hotspots_default,
            oncokb: config.oncoprint_oncokb_default,
        }
    }

    /// Resets every preference to the defaults in `config`.
    ///
    /// Thresholds return to [`DEFAULT_COUNT_THRESHOLD`], the tier map is
    /// cleared, and the custom binary preference becomes unset so that it
    /// follows the server default again.
    pub fn initialize(&mut self, config: &ServerConfig) {
        *self = Self::new(config);
    }

    /// Returns `true` if any driver annotation mechanism is active.
    #[must_use]
    pub fn drivers_annotated(&self, config: &ServerConfig) -> bool {
        self.oncokb(config)
            || self.hotspots(config)
            || self.cbioportal_count
            || self.cosmic_count
            || self.custom_binary(config)
            || self.driver_tiers.values().any(|enabled| *enabled)
    }

    /// Effective VUS exclusion: only on while some mechanism is active.
    #[must_use]
    pub fn exclude_vus(&self, config: &ServerConfig) -> bool {
        self.exclude_vus && self.drivers_annotated(config)
    }

    /// The VUS exclusion as requested by the user, before gating.
    #[must_use]
    pub fn exclude_vus_preference(&self) -> bool {
        self.exclude_vus
    }

    /// Records the user's VUS exclusion request.
    pub fn set_exclude_vus(&mut self, value: bool) {
        self.exclude_vus = value;
    }

    /// Effective hotspot annotation.
    #[must_use]
    pub fn hotspots(&self, config: &ServerConfig) -> bool {
        gated(self.hotspots, config.show_hotspot)
    }

    /// The hotspot preference as stored, ignoring capability.
    #[must_use]
    pub fn hotspots_preference(&self) -> bool {
        self.hotspots
    }

    /// Stores the hotspot preference.
    pub fn set_hotspots(&mut self, value: bool) {
        self.hotspots = value;
    }

    /// Effective OncoKB annotation.
    #[must_use]
    pub fn oncokb(&self, config: &ServerConfig) -> bool {
        gated(self.oncokb, config.show_oncokb)
    }

    /// The OncoKB preference as stored, ignoring capability.
    #[must_use]
    pub fn oncokb_preference(&self) -> bool {
        self.oncokb
    }

    /// Stores the OncoKB preference.
    pub fn set_oncokb(&mut self, value: bool) {
        self.oncokb = value;
    }

    /// Effective custom binary annotation.
    ///
    /// Follows the server default until the user sets a value explicitly.
    #[must_use]
    pub fn custom_binary(&self, config: &ServerConfig) -> bool {
        or_default(
            self.custom_binary,
            config.oncoprint_custom_driver_annotation_binary_default,
        )
    }

    /// The explicit custom binary preference, or `None` if never set.
    #[must_use]
    pub fn custom_binary_preference(&self) -> Option<bool> {
        self.custom_binary
    }

    /// Stores an explicit custom binary preference.
    pub fn set_custom_binary(&mut self, value: bool) {
        self.custom_binary = Some(value);
    }

    /// Whether the cBioPortal recurrence count classifies drivers.
    #[must_use]
    pub fn cbioportal_count(&self) -> bool {
        self.cbioportal_count
    }

    /// Enables or disables the cBioPortal recurrence count.
    pub fn set_cbioportal_count(&mut self, value: bool) {
        self.cbioportal_count = value;
    }

    /// Minimum cBioPortal recurrence for a driver call.
    #[must_use]
    pub fn cbioportal_count_threshold(&self) -> u32 {
        self.cbioportal_count_threshold
    }

    /// Sets the cBioPortal recurrence threshold.
    pub fn set_cbioportal_count_threshold(&mut self, value: u32) {
        self.cbioportal_count_threshold = value;
    }

    /// Whether the COSMIC recurrence count classifies drivers.
    #[must_use]
    pub fn cosmic_count(&self) -> bool {
        self.cosmic_count
    }

    /// Enables or disables the COSMIC recurrence count.
    pub fn set_cosmic_count(&mut self, value: bool) {
        self.cosmic_count = value;
    }

    /// Minimum COSMIC recurrence for a driver call.
    #[must_use]
    pub fn cosmic_count_threshold(&self) -> u32 {
        self.cosmic_count_threshold
    }

    /// Sets the COSMIC recurrence threshold.
    pub fn set_cosmic_count_threshold(&mut self, value: u32) {
        self.cosmic_count_threshold = value;
    }

    /// Server default applied to tiers discovered in the dataset.
    #[must_use]
    pub fn custom_tiers_default(&self) -> bool {
        self.custom_tiers_default
    }

    /// Overrides the default for newly discovered tiers.
    pub fn set_custom_tiers_default(&mut self, value: bool) {
        self.custom_tiers_default = value;
    }

    /// Returns whether `tier` is enabled. Unknown tiers are disabled.
    #[must_use]
    pub fn driver_tier(&self, tier: &str) -> bool {
        self.driver_tiers.get(tier).copied().unwrap_or(false)
    }

    /// Iterates over all known tiers and their enable flags.
    pub fn driver_tiers(&self) -> btree_map::Iter<'_, String, bool> {
        self.driver_tiers.iter()
    }

    /// Enables or disables a single tier, adding it if unknown.
    pub fn set_driver_tier(&mut self, tier: impl Into<String>, value: bool) {
        self.driver_tiers.insert(tier.into(), value);
    }

    /// Sets every known tier to `value`.
    pub fn set_all_driver_tiers(&mut self, value: bool) {
        for enabled in self.driver_tiers.values_mut() {
            *enabled = value;
        }
    }

    /// Registers tiers reported for the loaded dataset.
    ///
    /// Tiers seen for the first time start at [`Self::custom_tiers_default`];
    /// existing tier preferences are left untouched.
    pub fn apply_custom_driver_report(&mut self, report: &CustomDriverReport) {
        for tier in &report.tiers {
            if !self.driver_tiers.contains_key(tier) {
                self.driver_tiers
                    .insert(tier.clone(), self.custom_tiers_default);
            }
        }
    }

    /// Resolves every gated value against `config` in one read.
    #[must_use]
    pub fn effective(&self, config: &ServerConfig) -> EffectiveDriverSettings {
        EffectiveDriverSettings {
            drivers_annotated: self.drivers_annotated(config),
            exclude_vus: self.exclude_vus(config),
            oncokb: self.oncokb(config),
            hotspots: self.hotspots(config),
            cbioportal_count: self.cbioportal_count,
            cbioportal_count_threshold: self.cbioportal_count_threshold,
            cosmic_count: self.cosmic_count,
            cosmic_count_threshold: self.cosmic_count_threshold,
            custom_binary: self.custom_binary(config),
            driver_tiers: self.driver_tiers.clone(),
        }
    }
}

/// Driver annotation settings with capability gating and defaults applied.
///
/// This is what renderers and counters read to decide whether an
/// alteration counts as a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[expect(clippy::struct_excessive_bools)]
pub struct EffectiveDriverSettings {
    /// Any mechanism active.
    pub drivers_annotated: bool,
    /// VUS exclusion after the annotation gate.
    pub exclude_vus: bool,
    /// OncoKB after capability gating.
    pub oncokb: bool,
    /// Hotspots after capability gating.
    pub hotspots: bool,
    /// cBioPortal recurrence count toggle.
    pub cbioportal_count: bool,
    /// cBioPortal recurrence threshold.
    pub cbioportal_count_threshold: u32,
    /// COSMIC recurrence count toggle.
    pub cosmic_count: bool,
    /// COSMIC recurrence threshold.
    pub cosmic_count_threshold: u32,
    /// Custom binary flag with the server default applied.
    pub custom_binary: bool,
    /// Per-tier enable flags.
    pub driver_tiers: BTreeMap<String, bool>,
}

impl EffectiveDriverSettings {
    /// Returns whether `tier` is enabled.
    #[must_use]
    pub fn driver_tier(&self, tier: &str) -> bool {
        self.driver_tiers.get(tier).copied().unwrap_or(false)
    }
}
