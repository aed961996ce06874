use std::mem;

use serde::Serialize;

/// A change requested from the driver annotation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsAction {
    /// Master checkbox: select or deselect every driver mechanism.
    SelectDistinguishDrivers(bool),
    SelectAnnotateOncoKb(bool),
    SelectAnnotateHotspots(bool),
    SelectAnnotateCBioPortal(bool),
    SelectAnnotateCosmic(bool),
    SelectCustomDriverAnnotationBinary(bool),
    SelectCustomDriverAnnotationTier { tier: String, selected: bool },
    SelectHidePutativePassengers(bool),
    /// New cBioPortal threshold text; also enables the mechanism.
    ChangeAnnotateCBioPortalInputValue(String),
    /// New COSMIC threshold text; also enables the mechanism.
    ChangeAnnotateCosmicInputValue(String),
    SelectHideUnprofiledSamples(bool),
    SelectExcludeGermlineMutations(bool),
}

#[derive(Debug, Default)]
pub struct ActionRequestQueue {
    actions: Vec<SettingsAction>,
}

impl ActionRequestQueue {
    pub fn request(&mut self, action: SettingsAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn take_all(&mut self) -> Vec<SettingsAction> {
        mem::take(&mut self.actions)
    }
}
