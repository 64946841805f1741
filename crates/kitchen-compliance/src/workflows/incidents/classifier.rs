use super::domain::{IncidentText, Severity, SeverityTier, TriageResult};
use super::keywords::match_category;
use super::playbook;

/// Stateless lookup from incident text to a triage result.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriageClassifier;

impl TriageClassifier {
    pub fn classify(&self, text: &IncidentText) -> TriageResult {
        // Only the description is scanned so stored classifications stay reproducible.
        let category = match_category(&text.description);
        let tier = text.tier();

        TriageResult {
            category,
            tier,
            analysis: playbook::analysis(category).to_string(),
            consequences: to_owned(playbook::consequences(tier)),
            remediation_steps: to_owned(playbook::remediation(tier)),
        }
    }
}

/// Classify a single incident.
pub fn classify(title: &str, description: &str, severity: Option<Severity>) -> TriageResult {
    TriageClassifier.classify(&IncidentText::new(title, description, severity))
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::incidents::domain::IncidentCategory;

    #[test]
    fn leaking_freezer_is_a_temperature_incident() {
        let result = classify(
            "Leak",
            "Fryseren lekker og temperaturen stiger",
            Some(Severity::High),
        );

        assert_eq!(result.category, IncidentCategory::Temperature);
        assert_eq!(result.analysis, playbook::analysis(IncidentCategory::Temperature));
        assert_eq!(result.consequences.len(), 4);
        assert_eq!(result.remediation_steps.len(), 5);
        assert_eq!(result.tier, SeverityTier::High);
    }

    #[test]
    fn title_keywords_are_ignored() {
        let result = classify("Brann i kjøkkenet", "Se vedlagt rapport", None);
        assert_eq!(result.category, IncidentCategory::General);
    }

    #[test]
    fn output_is_independent_of_input_wording() {
        let a = classify("A", "Kjøleskap 2 viser 8 grader", Some(Severity::Critical));
        let b = classify("B", "KJØLESKAP", Some(Severity::Critical));
        assert_eq!(a, b);
    }
}
