use oncodrive_core::CustomDriverReport;

/// State of the annotation sources, as seen by the data-loading layer.
///
/// Implementations are queried each time a controls state is built, so
/// they should answer from already loaded data without blocking.
pub trait AnnotationStatus {
    /// Whether the latest OncoKB annotation fetch failed.
    fn oncokb_failed(&self) -> bool;

    /// Whether the latest hotspot annotation fetch failed.
    fn hotspots_failed(&self) -> bool;

    /// Custom driver labels present in the loaded dataset, or `None` while
    /// the dataset has not been loaded.
    fn custom_driver_report(&self) -> Option<CustomDriverReport>;
}

impl<T: AnnotationStatus + ?Sized> AnnotationStatus for &T {
    fn oncokb_failed(&self) -> bool {
        (**self).oncokb_failed()
    }

    fn hotspots_failed(&self) -> bool {
        (**self).hotspots_failed()
    }

    fn custom_driver_report(&self) -> Option<CustomDriverReport> {
        (**self).custom_driver_report()
    }
}

/// Annotation status held as plain values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStatus {
    /// See [`AnnotationStatus::oncokb_failed`].
    pub oncokb_failed: bool,
    /// See [`AnnotationStatus::hotspots_failed`].
    pub hotspots_failed: bool,
    /// See [`AnnotationStatus::custom_driver_report`].
    pub custom_driver_report: Option<CustomDriverReport>,
}

impl AnnotationStatus for FetchStatus {
    fn oncokb_failed(&self) -> bool {
        self.oncokb_failed
    }

    fn hotspots_failed(&self) -> bool {
        self.hotspots_failed
    }

    fn custom_driver_report(&self) -> Option<CustomDriverReport> {
        self.custom_driver_report.clone()
    }
}
