use crate::infra::{CheckEntry, DashboardState};
use chrono::{Local, NaiveDate};
use clap::Args;
use kitchen_compliance::config::AppConfig;
use kitchen_compliance::error::AppError;
use kitchen_compliance::workflows::dashboard::{
    ComplianceAggregator, ComplianceSnapshotView, DailyCheckCounts, TemperatureLogImporter,
};
use kitchen_compliance::workflows::incidents::{
    IncidentId, IncidentRegister, IncidentText, IncidentTriageService, Severity,
    TriageClassifier, TriageResult,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardSnapshotArgs {
    /// JSON file with the day's counts (missing fields default to zero)
    #[arg(long)]
    pub(crate) counts_json: Option<PathBuf>,
    /// Temperature log CSV replacing the readings from the counts file
    #[arg(long)]
    pub(crate) temperature_csv: Option<PathBuf>,
    /// Day to take from the temperature log (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) day: Option<NaiveDate>,
    /// Treat the day as having an open critical incident
    #[arg(long)]
    pub(crate) open_incident: bool,
    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct IncidentTriageArgs {
    /// Short incident title (stored, not used for classification)
    #[arg(long)]
    pub(crate) title: String,
    /// Free-text description scanned for category keywords
    #[arg(long)]
    pub(crate) description: String,
    /// Severity label in English, Norwegian, or Arabic
    #[arg(long)]
    pub(crate) severity: Option<String>,
    /// Print the triage result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Day to simulate (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) day: Option<NaiveDate>,
    /// Stop after the dashboard portion of the demo.
    #[arg(long)]
    pub(crate) skip_incidents: bool,
}

pub(crate) fn run_dashboard_snapshot(args: DashboardSnapshotArgs) -> Result<(), AppError> {
    let DashboardSnapshotArgs {
        counts_json,
        temperature_csv,
        day,
        open_incident,
        json,
    } = args;

    let config = AppConfig::load()?;
    let day = day.unwrap_or_else(|| Local::now().date_naive());

    let mut counts: DailyCheckCounts = match counts_json {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => DailyCheckCounts::default(),
    };
    if let Some(path) = temperature_csv {
        counts.temperature_readings =
            TemperatureLogImporter::readings_for_day(File::open(path)?, day)?;
    }

    let open_incidents_exist = open_incident || counts.open_critical_incidents > 0;
    let snapshot = ComplianceAggregator::new(config.dashboard.risk_policy)
        .compute_snapshot(&counts, open_incidents_exist);
    let view = snapshot.to_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render_snapshot(day, &view);
    }
    Ok(())
}

pub(crate) fn run_incident_triage(args: IncidentTriageArgs) -> Result<(), AppError> {
    let text = IncidentText::from_raw(
        args.title,
        args.description,
        args.severity.as_deref().unwrap_or_default(),
    );
    let result = TriageClassifier.classify(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_triage(&text, &result);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let day = args.day.unwrap_or_else(|| Local::now().date_naive());
    let state = DashboardState::in_memory(ComplianceAggregator::default());

    println!("Kitchen compliance demo");
    for entry in scripted_checks() {
        if let Err(err) = state.checks.record(day, entry) {
            println!("  Check log unavailable: {}", err);
            return Ok(());
        }
    }

    let morning = state.compute(day);
    render_snapshot(day, &morning.snapshot.to_view());

    if args.skip_incidents {
        return Ok(());
    }

    println!("\nIncident register demo");
    report_and_render(
        state.incidents.as_ref(),
        IncidentText::new(
            "Fryser",
            "Fryseren lekker og temperaturen stiger",
            Some(Severity::High),
        ),
        day,
    );
    let fire = report_and_render(
        state.incidents.as_ref(),
        IncidentText::new(
            "Brann",
            "Brann i frityrgryta, slukket med brannteppe",
            Some(Severity::Critical),
        ),
        day,
    );

    let during = state.compute(day);
    println!(
        "\nWith an open critical incident: risk {} ({})",
        during.snapshot.risk_level.label(),
        during.snapshot.risk_reason
    );

    if let Some(id) = fire {
        match state.incidents.close(&id, day) {
            Ok(record) => println!("- Closed {} on {}", record.id.0, day),
            Err(err) => println!("- Close failed: {}", err),
        }
        let after = state.compute(day);
        println!(
            "After closing: risk {} ({})",
            after.snapshot.risk_level.label(),
            after.snapshot.risk_reason
        );
    }

    Ok(())
}

fn report_and_render<R>(
    service: &IncidentTriageService<R>,
    text: IncidentText,
    day: NaiveDate,
) -> Option<IncidentId>
where
    R: IncidentRegister + 'static,
{
    match service.report(text, day) {
        Ok(record) => {
            println!("\nRegistered {}", record.id.0);
            render_triage(&record.text, &record.triage);
            Some(record.id)
        }
        Err(err) => {
            println!("  Incident register unavailable: {}", err);
            None
        }
    }
}

/// Ten readings with two out of range, twenty cleaning tasks with two left,
/// ten hygiene checks with one failure.
fn scripted_checks() -> Vec<CheckEntry> {
    let mut entries = Vec::new();
    for value in [2.5, 3.0, 3.5, 4.0, 1.5, 2.0, 3.0, 3.5, 6.5, 7.0] {
        entries.push(CheckEntry::Temperature {
            value,
            min: Some(0.0),
            max: Some(4.0),
            within_range: None,
        });
    }
    for index in 0..20 {
        entries.push(CheckEntry::Cleaning {
            completed: index < 18,
        });
    }
    for index in 0..10 {
        entries.push(CheckEntry::Hygiene { passed: index != 0 });
    }
    entries.push(CheckEntry::Report);
    entries
}

pub(crate) fn render_snapshot(day: NaiveDate, view: &ComplianceSnapshotView) {
    println!("\nCompliance dashboard for {}", day);
    println!(
        "Compliance: {}% | Risk: {} ({})",
        view.compliance_percent, view.risk_label, view.risk_reason
    );
    println!(
        "Average temperature {:.1} °C | {} reading(s) out of range",
        view.average_temperature, view.temperature_violation_count
    );
    println!(
        "Open critical incidents: {} | Reports filed today: {}",
        view.open_critical_incidents, view.reports_filed_today
    );

    println!("\nCategories");
    for entry in &view.categories {
        println!(
            "- {}: {:.0}% ({} checks, {} deviations)",
            entry.label, entry.score_percent, entry.checks, entry.violations
        );
    }

    if !view.insights.observations.is_empty() {
        println!("\nObservations");
        for note in &view.insights.observations {
            println!("- {}", note);
        }
    }

    if !view.insights.recommended_actions.is_empty() {
        println!("\nRecommended actions");
        for action in &view.insights.recommended_actions {
            println!("- {}", action);
        }
    }
}

pub(crate) fn render_triage(text: &IncidentText, result: &TriageResult) {
    let severity = text
        .preselected_severity
        .map(Severity::label)
        .unwrap_or("Ikke angitt");
    println!(
        "Incident: {} | Severity: {} | Category: {}",
        text.title,
        severity,
        result.category.label()
    );
    println!("Analysis: {}", result.analysis);

    println!("Consequences");
    for line in &result.consequences {
        println!("- {}", line);
    }
    println!("Remediation");
    for (index, step) in result.remediation_steps.iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_compliance::workflows::dashboard::RiskLevel;

    #[test]
    fn scripted_day_matches_reference_scenario() {
        let state = DashboardState::in_memory(ComplianceAggregator::default());
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date");
        for entry in scripted_checks() {
            state.checks.record(day, entry).expect("recorded");
        }

        let refreshed = state.compute(day);
        assert_eq!(refreshed.snapshot.total_checks, 40);
        assert_eq!(refreshed.snapshot.violations, 5);
        assert_eq!(refreshed.snapshot.compliance_percent_rounded(), 88);
        assert_eq!(refreshed.snapshot.risk_level, RiskLevel::Low);
        assert_eq!(refreshed.snapshot.reports_filed_today, 1);
    }

    #[test]
    fn demo_runs_end_to_end() {
        let args = DemoArgs {
            day: NaiveDate::from_ymd_opt(2025, 3, 4),
            skip_incidents: false,
        };
        run_demo(args).expect("demo completes");
    }

    #[test]
    fn triage_command_accepts_missing_severity() {
        let args = IncidentTriageArgs {
            title: "Mus".to_string(),
            description: "Spor etter mus på lageret".to_string(),
            severity: None,
            json: true,
        };
        run_incident_triage(args).expect("triage prints");
    }
}
