//! Driver classification and exclusion of individual alterations.
//!
//! Every view that colors or counts alterations goes through
//! [`is_putative_driver`] and [`exclusion_reason`], so an alteration is
//! treated the same way in the oncoprint, the tables, and the warnings.

use serde::{Deserialize, Serialize};

use crate::{EffectiveDriverSettings, ExclusionSettings};

/// Broad class of a genomic alteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum AlterationKind {
    /// Point mutation or small indel.
    Mutation,
    /// Amplification or deep deletion.
    CopyNumber,
    /// Fusion or other rearrangement.
    StructuralVariant,
}

/// An alteration with the annotations the driver mechanisms look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools)]
pub struct AnnotatedAlteration {
    /// Alteration class.
    pub kind: AlterationKind,
    /// OncoKB calls it oncogenic.
    pub oncokb_driver: bool,
    /// Falls on a known mutational hotspot.
    pub hotspot: bool,
    /// Recurrence of this variant across the portal.
    pub cbioportal_count: u32,
    /// Recurrence of this variant in COSMIC.
    pub cosmic_count: u32,
    /// Driver flag supplied with the uploaded data.
    pub custom_driver_binary: bool,
    /// Driver tier supplied with the uploaded data.
    pub custom_driver_tier: Option<String>,
    /// Germline rather than somatic origin.
    pub germline: bool,
    /// Loss of heterozygosity at the mutated locus.
    pub loh: bool,
}

impl Default for AnnotatedAlteration {
    fn default() -> Self {
        Self {
            kind: AlterationKind::Mutation,
            oncokb_driver: false,
            hotspot: false,
            cbioportal_count: 0,
            cosmic_count: 0,
            custom_driver_binary: false,
            custom_driver_tier: None,
            germline: false,
            loh: false,
        }
    }
}

/// Why an alteration is left out of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExclusionReason {
    /// Not classified as a driver while VUS are excluded.
    #[display("putative passenger")]
    Vus,
    /// Germline mutation while germline mutations are excluded.
    #[display("germline")]
    Germline,
    /// Mutation with loss of heterozygosity while germline mutations are
    /// excluded.
    #[display("loss of heterozygosity")]
    Loh,
}

/// Returns `true` if any active mechanism calls `alteration` a driver.
#[must_use]
pub fn is_putative_driver(
    alteration: &AnnotatedAlteration,
    effective: &EffectiveDriverSettings,
) -> bool {
    (effective.oncokb && alteration.oncokb_driver)
        || (effective.hotspots && alteration.hotspot)
        || (effective.cbioportal_count
            && alteration.cbioportal_count >= effective.cbioportal_count_threshold)
        || (effective.cosmic_count && alteration.cosmic_count >= effective.cosmic_count_threshold)
        || (effective.custom_binary && alteration.custom_driver_binary)
        || alteration
            .custom_driver_tier
            .as_deref()
            .is_some_and(|tier| effective.driver_tier(tier))
}

/// Returns the reason `alteration` is hidden, or `None` if it is shown.
///
/// VUS exclusion takes precedence, then germline origin. Mutations with
/// loss of heterozygosity are hidden together with germline mutations.
#[must_use]
pub fn exclusion_reason(
    alteration: &AnnotatedAlteration,
    effective: &EffectiveDriverSettings,
    exclusion: &ExclusionSettings,
) -> Option<ExclusionReason> {
    if effective.exclude_vus && !is_putative_driver(alteration, effective) {
        return Some(ExclusionReason::Vus);
    }
    if !exclusion.exclude_germline_mutations || !alteration.kind.is_mutation() {
        return None;
    }
    if alteration.germline {
        Some(ExclusionReason::Germline)
    } else if alteration.loh {
        Some(ExclusionReason::Loh)
    } else {
        None
    }
}

/// Counts of alterations by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterationCounts {
    /// Mutations.
    pub mutations: usize,
    /// Copy number alterations.
    pub copy_number: usize,
    /// Structural variants.
    pub structural_variants: usize,
}

impl AlterationCounts {
    /// Adds one alteration of `kind`.
    pub fn add(&mut self, kind: AlterationKind) {
        match kind {
            AlterationKind::Mutation => self.mutations += 1,
            AlterationKind::CopyNumber => self.copy_number += 1,
            AlterationKind::StructuralVariant => self.structural_variants += 1,
        }
    }

    /// Total over all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.mutations + self.copy_number + self.structural_variants
    }
}

/// How many alterations fall into each exclusion category.
///
/// Counts do not depend on the exclude flags, so a view can report what
/// would be hidden as well as what is hidden.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionReport {
    /// Alterations no active mechanism calls a driver.
    pub vus: AlterationCounts,
    /// Germline mutations.
    pub germline_mutations: usize,
    /// Mutations with loss of heterozygosity.
    pub loh_mutations: usize,
}

impl ExclusionReport {
    /// Tallies `alterations` under `effective`.
    ///
    /// VUS are only counted while some driver mechanism is active.
    #[must_use]
    pub fn tally<'a, I>(alterations: I, effective: &EffectiveDriverSettings) -> Self
    where
        I: IntoIterator<Item = &'a AnnotatedAlteration>,
    {
        let mut report = Self::default();
        for alteration in alterations {
            if effective.drivers_annotated && !is_putative_driver(alteration, effective) {
                report.vus.add(alteration.kind);
            }
            if alteration.kind.is_mutation() {
                if alteration.germline {
                    report.germline_mutations += 1;
                }
                if alteration.loh {
                    report.loh_mutations += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AlterationKind, AnnotatedAlteration, ExclusionReason, ExclusionReport, exclusion_reason,
        is_putative_driver,
    };
    use crate::{DriverAnnotationSettings, ExclusionSettings, ServerConfig};

    fn config() -> ServerConfig {
        ServerConfig {
            show_hotspot: true,
            show_oncokb: true,
            ..ServerConfig::default()
        }
    }

    fn base_settings() -> DriverAnnotationSettings {
        let mut settings = DriverAnnotationSettings::new(&config());
        settings.set_oncokb(false);
        settings.set_hotspots(false);
        settings.set_custom_binary(false);
        settings
    }

    fn mutation() -> AnnotatedAlteration {
        AnnotatedAlteration::default()
    }

    #[test]
    fn count_threshold_is_inclusive() {
        let mut settings = base_settings();
        settings.set_cbioportal_count(true);
        settings.set_cbioportal_count_threshold(15);
        let effective = settings.effective(&config());

        let below = AnnotatedAlteration {
            cbioportal_count: 14,
            ..mutation()
        };
        let at = AnnotatedAlteration {
            cbioportal_count: 15,
            ..mutation()
        };
        assert!(!is_putative_driver(&below, &effective));
        assert!(is_putative_driver(&at, &effective));
    }

    #[test]
    fn suppressed_capability_does_not_classify() {
        let mut settings = base_settings();
        settings.set_hotspots(true);
        let hotspot = AnnotatedAlteration {
            hotspot: true,
            ..mutation()
        };
        assert!(is_putative_driver(&hotspot, &settings.effective(&config())));

        let disabled = ServerConfig {
            show_hotspot: false,
            ..config()
        };
        assert!(!is_putative_driver(&hotspot, &settings.effective(&disabled)));
    }

    #[test]
    fn tiers_classify_only_when_enabled() {
        let mut settings = base_settings();
        settings.set_driver_tier("Class 1", true);
        settings.set_driver_tier("Class 2", false);
        let effective = settings.effective(&config());

        let class1 = AnnotatedAlteration {
            custom_driver_tier: Some("Class 1".to_owned()),
            ..mutation()
        };
        let class2 = AnnotatedAlteration {
            custom_driver_tier: Some("Class 2".to_owned()),
            ..mutation()
        };
        assert!(is_putative_driver(&class1, &effective));
        assert!(!is_putative_driver(&class2, &effective));
    }

    #[test]
    fn vus_excluded_only_when_gate_open() {
        let mut settings = base_settings();
        settings.set_exclude_vus(true);
        let exclusion = ExclusionSettings::default();
        let passenger = mutation();

        assert_eq!(
            exclusion_reason(&passenger, &settings.effective(&config()), &exclusion),
            None
        );

        settings.set_oncokb(true);
        assert_eq!(
            exclusion_reason(&passenger, &settings.effective(&config()), &exclusion),
            Some(ExclusionReason::Vus)
        );
    }

    #[test]
    fn germline_exclusion_applies_to_mutations() {
        let settings = base_settings();
        let effective = settings.effective(&config());
        let exclusion = ExclusionSettings {
            exclude_germline_mutations: true,
            ..ExclusionSettings::default()
        };
        let germline = AnnotatedAlteration {
            germline: true,
            ..mutation()
        };
        let germline_cna = AnnotatedAlteration {
            kind: AlterationKind::CopyNumber,
            germline: true,
            ..mutation()
        };

        assert_eq!(
            exclusion_reason(&germline, &effective, &exclusion),
            Some(ExclusionReason::Germline)
        );
        assert_eq!(exclusion_reason(&germline_cna, &effective, &exclusion), None);
    }

    #[test]
    fn loh_mutations_follow_germline_exclusion() {
        let effective = base_settings().effective(&config());
        let loh = AnnotatedAlteration {
            loh: true,
            ..mutation()
        };
        let germline_loh = AnnotatedAlteration {
            germline: true,
            loh: true,
            ..mutation()
        };
        let loh_cna = AnnotatedAlteration {
            kind: AlterationKind::CopyNumber,
            loh: true,
            ..mutation()
        };

        assert_eq!(
            exclusion_reason(&loh, &effective, &ExclusionSettings::default()),
            None
        );

        let exclusion = ExclusionSettings {
            exclude_germline_mutations: true,
            ..ExclusionSettings::default()
        };
        assert_eq!(
            exclusion_reason(&loh, &effective, &exclusion),
            Some(ExclusionReason::Loh)
        );
        assert_eq!(
            exclusion_reason(&germline_loh, &effective, &exclusion),
            Some(ExclusionReason::Germline)
        );
        assert_eq!(exclusion_reason(&loh_cna, &effective, &exclusion), None);
    }

    #[test]
    fn tally_counts_by_category() {
        let mut settings = base_settings();
        settings.set_oncokb(true);
        let effective = settings.effective(&config());
        let alterations = [
            AnnotatedAlteration {
                oncokb_driver: true,
                ..mutation()
            },
            mutation(),
            AnnotatedAlteration {
                germline: true,
                loh: true,
                ..mutation()
            },
            AnnotatedAlteration {
                kind: AlterationKind::CopyNumber,
                ..mutation()
            },
            AnnotatedAlteration {
                kind: AlterationKind::StructuralVariant,
                oncokb_driver: true,
                ..mutation()
            },
        ];

        let report = ExclusionReport::tally(&alterations, &effective);

        assert_eq!(report.vus.mutations, 2);
        assert_eq!(report.vus.copy_number, 1);
        assert_eq!(report.vus.structural_variants, 0);
        assert_eq!(report.vus.total(), 3);
        assert_eq!(report.germline_mutations, 1);
        assert_eq!(report.loh_mutations, 1);
    }

    #[test]
    fn tally_reports_no_vus_without_annotation() {
        let effective = base_settings().effective(&config());
        let report = ExclusionReport::tally(&[mutation(), mutation()], &effective);
        assert_eq!(report.vus.total(), 0);
    }
}
