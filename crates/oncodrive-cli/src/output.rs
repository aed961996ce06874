use std::fmt;

use oncodrive_core::EffectiveDriverSettings;
use oncodrive_menu::{AlterationFilterWarning, DriverControlsState};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Summary {
    pub(crate) page: String,
    pub(crate) studies: Vec<String>,
    pub(crate) resets: u64,
    pub(crate) rejected_actions: usize,
    pub(crate) effective: EffectiveDriverSettings,
    pub(crate) controls: DriverControlsState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) visible_alterations: Option<usize>,
    pub(crate) warnings: Vec<AlterationFilterWarning>,
}

fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn flags(disabled: bool, error: bool) -> &'static str {
    match (disabled, error) {
        (true, true) => " (disabled, fetch failed)",
        (true, false) => " (disabled)",
        (false, true) => " (fetch failed)",
        (false, false) => "",
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controls = &self.controls;

        write!(f, "{} | studies: ", self.page)?;
        if self.studies.is_empty() {
            f.write_str("<none>")?;
        } else {
            f.write_str(&self.studies.join(","))?;
        }
        writeln!(f, " | resets: {}", self.resets)?;
        if self.rejected_actions > 0 {
            writeln!(f, "rejected actions: {}", self.rejected_actions)?;
        }

        writeln!(
            f,
            "{} Distinguish drivers",
            checkbox(controls.distinguish_drivers)
        )?;
        writeln!(
            f,
            "  {} OncoKB{}",
            checkbox(controls.oncokb.selected),
            flags(controls.oncokb.disabled, controls.oncokb.error)
        )?;
        writeln!(
            f,
            "  {} Hotspots{}",
            checkbox(controls.hotspots.selected),
            flags(controls.hotspots.disabled, controls.hotspots.error)
        )?;
        writeln!(
            f,
            "  {} cBioPortal count >= {}",
            checkbox(controls.cbioportal.selected),
            controls.cbioportal.threshold_input
        )?;
        writeln!(
            f,
            "  {} COSMIC count >= {}",
            checkbox(controls.cosmic.selected),
            controls.cosmic.threshold_input
        )?;
        if let Some(binary) = &controls.custom.binary {
            writeln!(f, "  {} {}", checkbox(binary.selected), binary.label)?;
        }
        if let Some(tiers) = &controls.custom.tiers {
            writeln!(f, "  {}:", tiers.label)?;
            for tier in &tiers.tiers {
                writeln!(f, "    {} {}", checkbox(tier.selected), tier.name)?;
            }
        }
        writeln!(
            f,
            "{} Hide putative passengers",
            checkbox(controls.hide_putative_passengers)
        )?;
        writeln!(
            f,
            "{} Hide unprofiled samples",
            checkbox(controls.hide_unprofiled_samples)
        )?;
        writeln!(
            f,
            "{} Exclude germline mutations",
            checkbox(controls.exclude_germline_mutations)
        )?;

        if let Some(visible) = self.visible_alterations {
            writeln!(f, "visible alterations: {visible}")?;
        }
        for warning in &self.warnings {
            write!(f, "! {}", warning.message)?;
            if let Some(toggle) = &warning.toggle {
                write!(f, " [{}]", toggle.label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oncodrive_core::{DriverAnnotationSettings, ExclusionSettings, ServerConfig};
    use oncodrive_menu::{
        AlterationFilterWarning, FetchStatus, SettingsAction, WarningCategory,
        build_controls_state, warning::WarningToggle,
    };

    use super::Summary;

    fn summary() -> Summary {
        let config = ServerConfig {
            show_hotspot: true,
            ..ServerConfig::default()
        };
        let mut settings = DriverAnnotationSettings::new(&config);
        settings.set_hotspots(true);
        let status = FetchStatus {
            oncokb_failed: true,
            ..FetchStatus::default()
        };
        Summary {
            page: "results view".to_owned(),
            studies: vec!["brca_tcga".to_owned()],
            resets: 1,
            rejected_actions: 0,
            effective: settings.effective(&config),
            controls: build_controls_state(
                &settings,
                &ExclusionSettings::default(),
                &config,
                &status,
            ),
            visible_alterations: None,
            warnings: vec![AlterationFilterWarning {
                category: WarningCategory::Germline,
                count: 2,
                excluded: false,
                message: "2 germline mutations in TP53 are shown below.".to_owned(),
                toggle: Some(WarningToggle {
                    label: "Hide",
                    action: SettingsAction::SelectExcludeGermlineMutations(true),
                }),
            }],
        }
    }

    #[test]
    fn text_lists_controls_and_warnings() {
        let text = summary().to_string();

        assert!(text.starts_with("results view | studies: brca_tcga | resets: 1\n"));
        assert!(text.contains("[x] Distinguish drivers\n"));
        assert!(text.contains("  [ ] OncoKB (disabled, fetch failed)\n"));
        assert!(text.contains("  [x] Hotspots\n"));
        assert!(text.contains("  [ ] COSMIC count >= 10\n"));
        assert!(text.contains("! 2 germline mutations in TP53 are shown below. [Hide]\n"));
        assert!(!text.contains("rejected"));
    }

    #[test]
    fn json_omits_missing_alteration_count() {
        let json = serde_json::to_value(summary()).unwrap();
        assert!(json.get("visible_alterations").is_none());
        assert_eq!(json["controls"]["hotspots"]["selected"], true);
        assert_eq!(json["warnings"][0]["toggle"]["label"], "Hide");
    }
}
