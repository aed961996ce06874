//! Driver annotation menu: derived controls state, settings actions, and
//! alteration filter warnings.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod controls_state;
pub mod handler;
pub mod menu;
pub mod status;
pub mod warning;

pub use self::{
    action::{ActionRequestQueue, SettingsAction},
    controls_state::{DriverControlsState, build_controls_state},
    handler::{DriverSettingsHandlers, build_handlers},
    menu::SettingsMenu,
    status::{AnnotationStatus, FetchStatus},
    warning::{AlterationFilterWarning, MutationsTabMode, WarningCategory, build_warnings},
};
