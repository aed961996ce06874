//! The driver annotation menu as seen by a page.

use std::cell::Cell;

use oncodrive_core::{
    AnnotatedAlteration, EffectiveDriverSettings, ExclusionReport, SettingsStore,
    exclusion_reason,
};

use crate::{
    action::{ActionRequestQueue, SettingsAction},
    controls_state::{DriverControlsState, build_controls_state},
    handler,
    status::AnnotationStatus,
    warning::{AlterationFilterWarning, MutationsTabMode, build_warnings},
};

/// Couples a page's settings store with the annotation status it renders
/// against.
///
/// Reads always rebuild from the store, so they reflect every change made
/// through [`SettingsMenu::dispatch`], study selection resets, and server
/// configuration updates. Reported custom tiers are registered again after
/// every reset of the store.
#[derive(Debug)]
pub struct SettingsMenu<S> {
    store: SettingsStore,
    status: S,
    queue: ActionRequestQueue,
    synced_resets: Cell<u64>,
}

impl<S: AnnotationStatus> SettingsMenu<S> {
    #[must_use]
    pub fn new(store: SettingsStore, status: S) -> Self {
        let menu = Self {
            store,
            status,
            queue: ActionRequestQueue::default(),
            synced_resets: Cell::new(0),
        };
        menu.sync_custom_driver_report();
        menu
    }

    #[must_use]
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    #[must_use]
    pub fn status(&self) -> &S {
        &self.status
    }

    /// Replaces the annotation status, e.g. after a fetch completed.
    pub fn set_status(&mut self, status: S) {
        self.status = status;
        self.sync_custom_driver_report();
    }

    /// Registers tiers from the current custom driver report, if loaded.
    pub fn sync_custom_driver_report(&self) {
        if let Some(report) = self.status.custom_driver_report() {
            self.store.apply_custom_driver_report(&report);
        }
        self.synced_resets.set(self.store.reset_count());
    }

    fn sync_after_reset(&self) {
        if self.synced_resets.get() != self.store.reset_count() {
            log::debug!("{}: registering reported custom tiers after reset", self.store.page());
            self.sync_custom_driver_report();
        }
    }

    /// Resolved settings for coloring and counting.
    #[must_use]
    pub fn effective(&self) -> EffectiveDriverSettings {
        self.sync_after_reset();
        self.store.effective()
    }

    /// Builds the current menu state.
    #[must_use]
    pub fn controls_state(&self) -> DriverControlsState {
        self.sync_after_reset();
        let config = self.store.config();
        build_controls_state(
            &self.store.driver_settings(),
            self.store.exclusion_settings(),
            &config,
            &self.status,
        )
    }

    /// Applies `action` immediately. Returns `false` if it was rejected.
    pub fn dispatch(&mut self, action: &SettingsAction) -> bool {
        self.sync_after_reset();
        handler::handle(&mut self.store, &self.status, action)
    }

    /// Queues `action` for [`SettingsMenu::apply_pending`].
    pub fn request(&mut self, action: SettingsAction) {
        self.queue.request(action);
    }

    /// Applies all queued actions. Returns the number rejected.
    pub fn apply_pending(&mut self) -> usize {
        self.sync_after_reset();
        handler::handle_all(&mut self.store, &self.status, &mut self.queue)
    }

    /// Alterations that remain visible under the current settings.
    #[must_use]
    pub fn visible<'a>(
        &self,
        alterations: &'a [AnnotatedAlteration],
    ) -> Vec<&'a AnnotatedAlteration> {
        let effective = self.effective();
        let exclusion = self.store.exclusion_settings();
        alterations
            .iter()
            .filter(|alteration| exclusion_reason(alteration, &effective, exclusion).is_none())
            .collect()
    }

    /// Tallies `alterations` and builds the filter warnings for them.
    #[must_use]
    pub fn warnings(
        &self,
        alterations: &[AnnotatedAlteration],
        mode: Option<&MutationsTabMode>,
    ) -> Vec<AlterationFilterWarning> {
        let effective = self.effective();
        let report = ExclusionReport::tally(alterations, &effective);
        build_warnings(&report, &effective, self.store.exclusion_settings(), mode)
    }
}
