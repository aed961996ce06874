//! Settings mutations behind the driver annotation menu.

use oncodrive_core::{DriverAnnotationSettings, ExclusionSettings, SettingsStore};

use crate::{
    action::{ActionRequestQueue, SettingsAction},
    controls_state::{DriverControlsState, build_controls_state},
    status::AnnotationStatus,
};

/// Menu callbacks bound to one set of settings.
///
/// The controls state passed to [`build_handlers`] must have been built
/// from the same settings; bulk selection reads the disabled and error
/// flags from it.
#[derive(Debug)]
pub struct DriverSettingsHandlers<'a> {
    settings: &'a mut DriverAnnotationSettings,
    exclusion: &'a mut ExclusionSettings,
    controls: &'a DriverControlsState,
}

/// Binds the menu callbacks to `settings` and `exclusion`.
pub fn build_handlers<'a>(
    settings: &'a mut DriverAnnotationSettings,
    exclusion: &'a mut ExclusionSettings,
    controls: &'a DriverControlsState,
) -> DriverSettingsHandlers<'a> {
    DriverSettingsHandlers {
        settings,
        exclusion,
        controls,
    }
}

fn parse_threshold(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

impl DriverSettingsHandlers<'_> {
    /// Selects or deselects every driver mechanism.
    ///
    /// Selecting leaves OncoKB and hotspots off when the server disabled
    /// them or their latest fetch failed, and keeps the VUS exclusion as it
    /// is. Deselecting also clears the VUS exclusion.
    pub fn on_select_distinguish_drivers(&mut self, selected: bool) {
        let settings = &mut *self.settings;
        if selected {
            settings.set_cbioportal_count(true);
            settings.set_cosmic_count(true);
            settings.set_custom_binary(true);
            settings.set_all_driver_tiers(true);
            if self.controls.oncokb.can_select() {
                settings.set_oncokb(true);
            }
            if self.controls.hotspots.can_select() {
                settings.set_hotspots(true);
            }
            log::debug!(
                "selected all driver annotations (oncokb: {}, hotspots: {})",
                self.controls.oncokb.can_select(),
                self.controls.hotspots.can_select(),
            );
        } else {
            settings.set_oncokb(false);
            settings.set_hotspots(false);
            settings.set_cbioportal_count(false);
            settings.set_cosmic_count(false);
            settings.set_custom_binary(false);
            settings.set_all_driver_tiers(false);
            settings.set_exclude_vus(false);
            log::debug!("deselected all driver annotations");
        }
    }

    pub fn on_select_annotate_oncokb(&mut self, selected: bool) {
        self.settings.set_oncokb(selected);
    }

    pub fn on_select_annotate_hotspots(&mut self, selected: bool) {
        self.settings.set_hotspots(selected);
    }

    pub fn on_select_annotate_cbioportal(&mut self, selected: bool) {
        self.settings.set_cbioportal_count(selected);
    }

    pub fn on_select_annotate_cosmic(&mut self, selected: bool) {
        self.settings.set_cosmic_count(selected);
    }

    pub fn on_select_custom_driver_annotation_binary(&mut self, selected: bool) {
        self.settings.set_custom_binary(selected);
    }

    pub fn on_select_custom_driver_annotation_tier(&mut self, tier: &str, selected: bool) {
        self.settings.set_driver_tier(tier, selected);
    }

    pub fn on_select_hide_putative_passengers(&mut self, selected: bool) {
        self.settings.set_exclude_vus(selected);
    }

    /// Sets the cBioPortal threshold and enables the mechanism.
    ///
    /// Returns `false` and changes nothing if `input` is not a
    /// non-negative integer.
    pub fn on_change_annotate_cbioportal_input_value(&mut self, input: &str) -> bool {
        let Some(threshold) = parse_threshold(input) else {
            log::warn!("ignoring cBioPortal count threshold {input:?}: not a non-negative integer");
            return false;
        };
        self.settings.set_cbioportal_count_threshold(threshold);
        self.settings.set_cbioportal_count(true);
        true
    }

    /// Sets the COSMIC threshold and enables the mechanism.
    ///
    /// Returns `false` and changes nothing if `input` is not a
    /// non-negative integer.
    pub fn on_change_annotate_cosmic_input_value(&mut self, input: &str) -> bool {
        let Some(threshold) = parse_threshold(input) else {
            log::warn!("ignoring COSMIC count threshold {input:?}: not a non-negative integer");
            return false;
        };
        self.settings.set_cosmic_count_threshold(threshold);
        self.settings.set_cosmic_count(true);
        true
    }

    pub fn on_select_hide_unprofiled_samples(&mut self, selected: bool) {
        self.exclusion.hide_unprofiled_samples = selected;
    }

    pub fn on_select_exclude_germline_mutations(&mut self, selected: bool) {
        self.exclusion.exclude_germline_mutations = selected;
    }

    /// Applies `action`. Returns `false` if it was rejected.
    pub fn apply(&mut self, action: &SettingsAction) -> bool {
        match action {
            SettingsAction::SelectDistinguishDrivers(selected) => {
                self.on_select_distinguish_drivers(*selected);
            }
            SettingsAction::SelectAnnotateOncoKb(selected) => {
                self.on_select_annotate_oncokb(*selected);
            }
            SettingsAction::SelectAnnotateHotspots(selected) => {
                self.on_select_annotate_hotspots(*selected);
            }
            SettingsAction::SelectAnnotateCBioPortal(selected) => {
                self.on_select_annotate_cbioportal(*selected);
            }
            SettingsAction::SelectAnnotateCosmic(selected) => {
                self.on_select_annotate_cosmic(*selected);
            }
            SettingsAction::SelectCustomDriverAnnotationBinary(selected) => {
                self.on_select_custom_driver_annotation_binary(*selected);
            }
            SettingsAction::SelectCustomDriverAnnotationTier { tier, selected } => {
                self.on_select_custom_driver_annotation_tier(tier, *selected);
            }
            SettingsAction::SelectHidePutativePassengers(selected) => {
                self.on_select_hide_putative_passengers(*selected);
            }
            SettingsAction::ChangeAnnotateCBioPortalInputValue(input) => {
                return self.on_change_annotate_cbioportal_input_value(input);
            }
            SettingsAction::ChangeAnnotateCosmicInputValue(input) => {
                return self.on_change_annotate_cosmic_input_value(input);
            }
            SettingsAction::SelectHideUnprofiledSamples(selected) => {
                self.on_select_hide_unprofiled_samples(*selected);
            }
            SettingsAction::SelectExcludeGermlineMutations(selected) => {
                self.on_select_exclude_germline_mutations(*selected);
            }
        }
        true
    }
}

/// Applies `action` to the settings in `store`.
///
/// The controls state is rebuilt first so bulk selection sees the current
/// disabled and error flags. Returns `false` if the action was rejected.
pub fn handle(
    store: &mut SettingsStore,
    status: &impl AnnotationStatus,
    action: &SettingsAction,
) -> bool {
    let controls = {
        let config = store.config();
        build_controls_state(
            &store.driver_settings(),
            store.exclusion_settings(),
            &config,
            status,
        )
    };
    let (mut settings, exclusion) = store.settings_mut();
    build_handlers(&mut settings, exclusion, &controls).apply(action)
}

/// Drains `queue` and applies each action in order.
///
/// Returns the number of actions that were rejected.
pub fn handle_all(
    store: &mut SettingsStore,
    status: &impl AnnotationStatus,
    queue: &mut ActionRequestQueue,
) -> usize {
    queue
        .take_all()
        .iter()
        .filter(|action| !handle(store, status, action))
        .count()
}
