//! Per-page settings store.
//!
//! A [`SettingsStore`] owns the driver annotation and exclusion settings of
//! one page context. It listens to the study selection and re-initializes
//! the driver annotation settings from the live server configuration each
//! time the selection changes, and once at construction.

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    collections::BTreeSet,
    fmt,
    rc::Rc,
};

use crate::{
    CustomDriverReport, DriverAnnotationSettings, EffectiveDriverSettings, ExclusionSettings,
    ServerConfig,
    observable::{Observable, Subscription},
};

/// The page a settings store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum PageContext {
    /// Query results page (oncoprint, mutations tab).
    #[display("results view")]
    ResultsView,
    /// Study summary page.
    #[display("study view")]
    StudyView,
}

/// Identifiers of the currently selected studies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct StudySelection {
    studies: BTreeSet<String>,
}

impl StudySelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no study is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }

    /// Number of selected studies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.studies.len()
    }

    /// Returns `true` if `study` is selected.
    #[must_use]
    pub fn contains(&self, study: &str) -> bool {
        self.studies.contains(study)
    }

    /// Iterates over study identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.studies.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StudySelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            studies: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for StudySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.studies.is_empty() {
            return f.write_str("<none>");
        }
        for (i, study) in self.studies.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(study)?;
        }
        Ok(())
    }
}

/// Settings of one page context.
///
/// The driver annotation settings live behind a shared cell so the study
/// selection listener can reset them. A study change that arrives while a
/// guard from [`SettingsStore::driver_settings`] or
/// [`SettingsStore::driver_settings_mut`] is alive skips the reset.
#[derive(Debug)]
pub struct SettingsStore {
    page: PageContext,
    config: Observable<ServerConfig>,
    driver: Rc<RefCell<DriverAnnotationSettings>>,
    exclusion: ExclusionSettings,
    resets: Rc<Cell<u64>>,
    study_subscription: Subscription,
}

impl SettingsStore {
    /// Creates a store for `page` and subscribes it to `studies`.
    ///
    /// The settings are initialized from `config` immediately, and again
    /// whenever the study selection changes.
    #[must_use]
    pub fn new(
        page: PageContext,
        config: Observable<ServerConfig>,
        studies: &Observable<StudySelection>,
    ) -> Self {
        let driver = Rc::new(RefCell::new(DriverAnnotationSettings::new(&config.borrow())));
        let resets = Rc::new(Cell::new(0));

        let study_subscription = studies.subscribe_immediate({
            let driver = Rc::downgrade(&driver);
            let config = config.clone();
            let resets = Rc::clone(&resets);
            move |selection: &StudySelection| {
                let Some(driver) = driver.upgrade() else {
                    return;
                };
                let Ok(mut driver) = driver.try_borrow_mut() else {
                    log::warn!(
                        "{page}: driver annotation settings are borrowed, skipping reset for studies {selection}"
                    );
                    return;
                };
                driver.initialize(&config.borrow());
                resets.set(resets.get() + 1);
                log::debug!("{page}: driver annotation settings reset for studies {selection}");
            }
        });

        Self {
            page,
            config,
            driver,
            exclusion: ExclusionSettings::default(),
            resets,
            study_subscription,
        }
    }

    /// The page this store belongs to.
    #[must_use]
    pub fn page(&self) -> PageContext {
        self.page
    }

    /// Borrows the live server configuration.
    #[must_use]
    pub fn config(&self) -> Ref<'_, ServerConfig> {
        self.config.borrow()
    }

    /// Handle to the live server configuration.
    #[must_use]
    pub fn config_handle(&self) -> &Observable<ServerConfig> {
        &self.config
    }

    /// Borrows the driver annotation settings.
    #[must_use]
    pub fn driver_settings(&self) -> Ref<'_, DriverAnnotationSettings> {
        self.driver.borrow()
    }

    /// Mutably borrows the driver annotation settings.
    #[must_use]
    pub fn driver_settings_mut(&self) -> RefMut<'_, DriverAnnotationSettings> {
        self.driver.borrow_mut()
    }

    /// Sample and germline exclusion toggles.
    #[must_use]
    pub fn exclusion_settings(&self) -> &ExclusionSettings {
        &self.exclusion
    }

    /// Mutable access to the exclusion toggles.
    pub fn exclusion_settings_mut(&mut self) -> &mut ExclusionSettings {
        &mut self.exclusion
    }

    /// Mutably borrows both settings records at once.
    pub fn settings_mut(
        &mut self,
    ) -> (RefMut<'_, DriverAnnotationSettings>, &mut ExclusionSettings) {
        (self.driver.borrow_mut(), &mut self.exclusion)
    }

    /// Resolves the driver annotation settings against the current config.
    #[must_use]
    pub fn effective(&self) -> EffectiveDriverSettings {
        self.driver.borrow().effective(&self.config.borrow())
    }

    /// Registers the tiers reported for the loaded dataset.
    pub fn apply_custom_driver_report(&self, report: &CustomDriverReport) {
        self.driver.borrow_mut().apply_custom_driver_report(report);
    }

    /// Number of times the settings were initialized from the study
    /// selection, including the initial one.
    #[must_use]
    pub fn reset_count(&self) -> u64 {
        self.resets.get()
    }

    /// Returns `true` until [`SettingsStore::destroy`] is called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.study_subscription.is_active()
    }

    /// Stops listening to the study selection. Idempotent.
    pub fn destroy(&mut self) {
        if self.study_subscription.is_active() {
            self.study_subscription.unsubscribe();
            log::debug!("{}: settings store released", self.page);
        }
    }
}
