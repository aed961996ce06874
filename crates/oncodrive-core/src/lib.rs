//! Driver annotation settings for a cancer genomics viewer.
//!
//! This crate holds the configuration that decides whether a mutation or
//! copy number alteration counts as a putative driver, and keeps that
//! decision consistent across every view of a page.
//!
//! # Overview
//!
//! - [`config`]: server capability flags, defaults, and menu labels.
//! - [`settings`]: the user's driver annotation preferences, with
//!   capability gating and the VUS exclusion gate applied at read time.
//! - [`store`]: one [`SettingsStore`] per page context, reset whenever the
//!   study selection changes.
//! - [`observable`]: the single-threaded signal type the store listens to.
//! - [`alteration`]: driver classification and exclusion of individual
//!   alterations, and the per-category counts shown in filter warnings.
//!
//! # Examples
//!
//! ```
//! use oncodrive_core::{
//!     PageContext, ServerConfig, SettingsStore, StudySelection, observable::Observable,
//! };
//!
//! let config = Observable::new(ServerConfig {
//!     show_hotspot: true,
//!     oncoprint_hotspots_default: true,
//!     oncoprint_hide_vus_default: true,
//!     ..ServerConfig::default()
//! });
//! let studies = Observable::new(["brca_tcga"].into_iter().collect::<StudySelection>());
//! let store = SettingsStore::new(PageContext::ResultsView, config.clone(), &studies);
//!
//! assert!(store.effective().hotspots);
//! assert!(store.effective().exclude_vus);
//!
//! // Switching the capability off hides the preference without erasing it.
//! config.update(|c| c.show_hotspot = false);
//! assert!(!store.effective().hotspots);
//! assert!(!store.effective().exclude_vus);
//! assert!(store.driver_settings().hotspots_preference());
//! ```

pub mod alteration;
pub mod config;
mod exclusion;
pub mod observable;
pub mod settings;
pub mod store;

pub use self::{
    alteration::{
        AlterationCounts, AlterationKind, AnnotatedAlteration, ExclusionReason, ExclusionReport,
        exclusion_reason, is_putative_driver,
    },
    config::{ConfigError, ServerConfig},
    exclusion::ExclusionSettings,
    settings::{
        CustomDriverReport, DEFAULT_COUNT_THRESHOLD, DriverAnnotationSettings,
        EffectiveDriverSettings,
    },
    store::{PageContext, SettingsStore, StudySelection},
};
