use serde::{Deserialize, Serialize};

/// Sample and germline exclusion toggles.
///
/// These are independent of driver annotation and are not reset when the
/// study selection changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSettings {
    /// Hide samples that were not profiled for the queried genes.
    pub hide_unprofiled_samples: bool,
    /// Exclude germline mutations from counts and views.
    pub exclude_germline_mutations: bool,
}
