//! Banner text describing alterations left out by the active filters.
//!
//! In the mutations tab each warning speaks about the gene shown below and
//! offers a toggle button. Everywhere else the warnings summarize what the
//! analysis includes or excludes.

use oncodrive_core::{AlterationCounts, EffectiveDriverSettings, ExclusionReport, ExclusionSettings};
use serde::Serialize;

use crate::action::SettingsAction;

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    /// Alterations no active mechanism calls a driver.
    #[display("putative passenger")]
    Vus,
    /// Germline mutations.
    #[display("germline")]
    Germline,
    /// Mutations with loss of heterozygosity.
    #[display("loss of heterozygosity")]
    Loh,
}

/// Selects mutations-tab wording for a single gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationsTabMode {
    /// Hugo symbol of the gene shown in the tab.
    pub gene: String,
}

/// Button that flips the filter behind a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningToggle {
    /// `"Show"` while the alterations are hidden, `"Hide"` otherwise.
    pub label: &'static str,
    pub action: SettingsAction,
}

/// One banner line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlterationFilterWarning {
    pub category: WarningCategory,
    pub count: usize,
    /// Whether the alterations are currently left out.
    pub excluded: bool,
    pub message: String,
    /// Present in mutations-tab mode only.
    pub toggle: Option<WarningToggle>,
}

fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn be(count: usize) -> &'static str {
    if count == 1 { "is" } else { "are" }
}

fn describe_counts(counts: &AlterationCounts) -> String {
    let parts = [
        (counts.mutations, "mutation", "mutations"),
        (
            counts.copy_number,
            "copy number alteration",
            "copy number alterations",
        ),
        (
            counts.structural_variants,
            "structural variant",
            "structural variants",
        ),
    ]
    .into_iter()
    .filter(|(count, _, _)| *count > 0)
    .map(|(count, singular, plural)| counted(count, singular, plural))
    .collect::<Vec<_>>();

    match parts.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

struct Category {
    category: WarningCategory,
    count: usize,
    excluded: bool,
    toggle_action: fn(bool) -> SettingsAction,
}

fn tab_warning(entry: &Category, mode: &MutationsTabMode) -> AlterationFilterWarning {
    let Category {
        category,
        count,
        excluded,
        toggle_action,
    } = *entry;
    let gene = &mode.gene;
    let subject = match category {
        WarningCategory::Vus => counted(
            count,
            "putative passenger mutation",
            "putative passenger mutations",
        ),
        WarningCategory::Germline => counted(count, "germline mutation", "germline mutations"),
        WarningCategory::Loh => counted(
            count,
            "mutation with loss of heterozygosity",
            "mutations with loss of heterozygosity",
        ),
    };
    let state = if excluded { "hidden" } else { "shown" };
    AlterationFilterWarning {
        category,
        count,
        excluded,
        message: format!("{subject} in {gene} {} {state} below.", be(count)),
        toggle: Some(WarningToggle {
            label: if excluded { "Show" } else { "Hide" },
            action: toggle_action(!excluded),
        }),
    }
}

fn aggregate_warning(entry: &Category, vus: &AlterationCounts) -> AlterationFilterWarning {
    let Category {
        category,
        count,
        excluded,
        ..
    } = *entry;
    let subject = match category {
        WarningCategory::Vus => {
            format!("{} annotated as putative passengers", describe_counts(vus))
        }
        WarningCategory::Germline => counted(count, "germline mutation", "germline mutations"),
        WarningCategory::Loh => counted(
            count,
            "mutation with loss of heterozygosity",
            "mutations with loss of heterozygosity",
        ),
    };
    let state = if excluded {
        "excluded from analysis"
    } else {
        "included in analysis"
    };
    AlterationFilterWarning {
        category,
        count,
        excluded,
        message: format!("{subject} {} {state}.", be(count)),
        toggle: None,
    }
}

/// Builds one warning per non-empty exclusion category.
///
/// `mode` selects mutations-tab wording; `report` should then cover the
/// tab's gene only. Germline and loss-of-heterozygosity mutations are
/// hidden together by the germline exclusion toggle. Nothing is reported
/// as putative passenger while no driver mechanism is active.
#[must_use]
pub fn build_warnings(
    report: &ExclusionReport,
    effective: &EffectiveDriverSettings,
    exclusion: &ExclusionSettings,
    mode: Option<&MutationsTabMode>,
) -> Vec<AlterationFilterWarning> {
    let vus_count = if !effective.drivers_annotated {
        0
    } else if mode.is_some() {
        report.vus.mutations
    } else {
        report.vus.total()
    };

    let categories = [
        Category {
            category: WarningCategory::Vus,
            count: vus_count,
            excluded: effective.exclude_vus,
            toggle_action: SettingsAction::SelectHidePutativePassengers,
        },
        Category {
            category: WarningCategory::Germline,
            count: report.germline_mutations,
            excluded: exclusion.exclude_germline_mutations,
            toggle_action: SettingsAction::SelectExcludeGermlineMutations,
        },
        Category {
            category: WarningCategory::Loh,
            count: report.loh_mutations,
            excluded: exclusion.exclude_germline_mutations,
            toggle_action: SettingsAction::SelectExcludeGermlineMutations,
        },
    ];

    categories
        .iter()
        .filter(|entry| entry.count > 0)
        .map(|entry| match mode {
            Some(mode) => tab_warning(entry, mode),
            None => aggregate_warning(entry, &report.vus),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use oncodrive_core::{
        AlterationCounts, DriverAnnotationSettings, EffectiveDriverSettings, ExclusionReport,
        ExclusionSettings, ServerConfig,
    };

    use super::{MutationsTabMode, WarningCategory, build_warnings};
    use crate::action::SettingsAction;

    fn effective(exclude_vus: bool) -> EffectiveDriverSettings {
        let config = ServerConfig {
            show_oncokb: true,
            ..ServerConfig::default()
        };
        let mut settings = DriverAnnotationSettings::new(&config);
        settings.set_oncokb(true);
        settings.set_exclude_vus(exclude_vus);
        settings.effective(&config)
    }

    fn report() -> ExclusionReport {
        ExclusionReport {
            vus: AlterationCounts {
                mutations: 3,
                copy_number: 1,
                structural_variants: 0,
            },
            germline_mutations: 1,
            loh_mutations: 0,
        }
    }

    fn tab() -> MutationsTabMode {
        MutationsTabMode {
            gene: "TP53".to_owned(),
        }
    }

    #[test]
    fn tab_mode_reports_hidden_mutations_with_toggle() {
        let warnings = build_warnings(
            &report(),
            &effective(true),
            &ExclusionSettings::default(),
            Some(&tab()),
        );

        assert_eq!(warnings.len(), 2);
        let vus = &warnings[0];
        assert_eq!(vus.category, WarningCategory::Vus);
        assert_eq!(vus.count, 3);
        assert!(vus.excluded);
        assert_eq!(
            vus.message,
            "3 putative passenger mutations in TP53 are hidden below."
        );
        let toggle = vus.toggle.as_ref().unwrap();
        assert_eq!(toggle.label, "Show");
        assert_eq!(
            toggle.action,
            SettingsAction::SelectHidePutativePassengers(false)
        );

        let germline = &warnings[1];
        assert_eq!(germline.category, WarningCategory::Germline);
        assert_eq!(germline.message, "1 germline mutation in TP53 is shown below.");
        let toggle = germline.toggle.as_ref().unwrap();
        assert_eq!(toggle.label, "Hide");
        assert_eq!(
            toggle.action,
            SettingsAction::SelectExcludeGermlineMutations(true)
        );
    }

    #[test]
    fn aggregate_mode_summarizes_all_kinds() {
        let exclusion = ExclusionSettings {
            exclude_germline_mutations: true,
            ..ExclusionSettings::default()
        };
        let warnings = build_warnings(&report(), &effective(false), &exclusion, None);

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].count, 4);
        assert_eq!(
            warnings[0].message,
            "3 mutations and 1 copy number alteration annotated as putative passengers are included in analysis."
        );
        assert!(warnings[0].toggle.is_none());
        assert_eq!(
            warnings[1].message,
            "1 germline mutation is excluded from analysis."
        );
    }

    #[test]
    fn loh_follows_germline_toggle() {
        let report = ExclusionReport {
            loh_mutations: 2,
            ..ExclusionReport::default()
        };
        let exclusion = ExclusionSettings {
            exclude_germline_mutations: true,
            ..ExclusionSettings::default()
        };

        let warnings = build_warnings(&report, &effective(false), &exclusion, Some(&tab()));

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, WarningCategory::Loh);
        assert_eq!(
            warnings[0].message,
            "2 mutations with loss of heterozygosity in TP53 are hidden below."
        );
    }

    #[test]
    fn no_vus_warning_without_annotation() {
        let config = ServerConfig::default();
        let settings = DriverAnnotationSettings::new(&config);
        let warnings = build_warnings(
            &report(),
            &settings.effective(&config),
            &ExclusionSettings::default(),
            None,
        );

        assert!(warnings.iter().all(|w| w.category != WarningCategory::Vus));
    }

    #[test]
    fn empty_report_yields_nothing() {
        let warnings = build_warnings(
            &ExclusionReport::default(),
            &effective(true),
            &ExclusionSettings::default(),
            Some(&tab()),
        );
        assert!(warnings.is_empty());
    }
}
