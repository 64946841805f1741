use kitchen_compliance::workflows::incidents::{
    classify, match_category, IncidentCategory, Severity, SeverityTier,
};

#[test]
fn freezer_leak_reported_as_high() {
    let result = classify(
        "Leak",
        "Fryseren lekker og temperaturen stiger",
        Some(Severity::High),
    );

    assert_eq!(result.category, IncidentCategory::Temperature);
    assert_eq!(result.tier, SeverityTier::High);
    assert_eq!(result.consequences.len(), 4);
    assert_eq!(result.remediation_steps.len(), 5);
    assert!(!result.analysis.is_empty());
}

#[test]
fn each_family_is_reachable() {
    let cases = [
        ("Kjølerommet holdt 9 grader", IncidentCategory::Temperature),
        ("Utløpt kylling funnet på lager", IncidentCategory::Food),
        ("Spor etter rotte bak benken", IncidentCategory::Hygiene),
        ("Ovnen slår seg av", IncidentCategory::Equipment),
        ("Ansatt sklei på gulvet", IncidentCategory::Safety),
        ("Leveransen kom for sent", IncidentCategory::General),
        ("Maten lukter vondt", IncidentCategory::Food),
        ("Gjest fikk dårlig mat", IncidentCategory::Food),
        ("Oppvaskmaskinen er defekt", IncidentCategory::Equipment),
        ("انقطاع التبريد في المطبخ", IncidentCategory::Temperature),
        ("دجاج منتهي الصلاحية", IncidentCategory::Food),
        ("حريق صغير", IncidentCategory::Safety),
    ];

    for (description, expected) in cases {
        assert_eq!(match_category(description), expected, "{description}");
    }
}

#[test]
fn missing_severity_uses_standard_playbook() {
    let result = classify("", "Ansatt kuttet seg i fingeren", None);

    assert_eq!(result.category, IncidentCategory::Safety);
    assert_eq!(result.tier, SeverityTier::Standard);
    assert_eq!(result.consequences.len(), 3);
    assert_eq!(result.remediation_steps.len(), 4);
}

#[test]
fn localized_severity_labels_parse() {
    assert_eq!(Severity::parse(" Kritisk "), Some(Severity::Critical));
    assert_eq!(Severity::parse("حرجة"), Some(Severity::Critical));
    assert_eq!(Severity::parse("moderat"), Some(Severity::Medium));
    assert_eq!(Severity::parse("asap"), None);
}
