use super::domain::RiskLevel;
use super::snapshot::ComplianceSnapshot;
use serde::Serialize;

/// Human-readable follow-ups derived from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardInsights {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

impl DashboardInsights {
    pub fn from_snapshot(snapshot: &ComplianceSnapshot) -> Self {
        let mut observations = Vec::new();
        let mut recommended_actions = Vec::new();

        if snapshot.total_checks == 0 {
            // Zero checks score as 100%; say so rather than imply a clean day.
            observations.push(
                "Ingen kontroller registrert i dag; samsvar vises som 100 %".to_string(),
            );
            recommended_actions
                .push("Registrer dagens temperatur-, renholds- og hygienekontroller".to_string());
        } else {
            observations.push(format!(
                "{} av {} kontroller uten avvik ({} % samsvar)",
                snapshot.total_checks.saturating_sub(snapshot.violations),
                snapshot.total_checks,
                snapshot.compliance_percent_rounded()
            ));
        }

        if snapshot.open_critical_incidents > 0 {
            observations.push(format!(
                "{} åpne kritiske avvik",
                snapshot.open_critical_incidents
            ));
            recommended_actions
                .push("Lukk kritiske avvik før neste servering".to_string());
        }

        if snapshot.temperature_violation_count > 0 {
            observations.push(format!(
                "{} temperaturmåling{} utenfor grenseverdi (snitt {:.1} °C)",
                snapshot.temperature_violation_count,
                if snapshot.temperature_violation_count == 1 { "" } else { "er" },
                snapshot.average_temperature
            ));
            recommended_actions.push(
                "Kontroller kjøle- og fryseutstyr og mål temperaturen på nytt".to_string(),
            );
        }

        if snapshot.cleaning_tasks_outstanding > 0 {
            observations.push(format!(
                "{} renholdsoppgave{} gjenstår",
                snapshot.cleaning_tasks_outstanding,
                if snapshot.cleaning_tasks_outstanding == 1 { "" } else { "r" }
            ));
            recommended_actions.push("Fullfør og signer dagens renholdsplan".to_string());
        }

        if snapshot.hygiene_checks_failed > 0 {
            observations.push(format!(
                "{} hygienekontroll{} ikke bestått",
                snapshot.hygiene_checks_failed,
                if snapshot.hygiene_checks_failed == 1 { "" } else { "er" }
            ));
            recommended_actions
                .push("Gå gjennom hygienerutiner med ansatte på vakt".to_string());
        }

        if snapshot.risk_level >= RiskLevel::High && snapshot.reports_filed_today == 0 {
            recommended_actions
                .push("Dokumenter dagens avvik i internkontrollen".to_string());
        }

        Self {
            observations,
            recommended_actions,
        }
    }
}
