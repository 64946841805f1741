use super::domain::{IncidentCategory, SeverityTier};

/// Fixed analysis sentence per category.
pub fn analysis(category: IncidentCategory) -> &'static str {
    match category {
        IncidentCategory::Temperature => {
            "Temperaturavvik kan gi bakterievekst og gjøre maten helsefarlig. Kjølekjeden må kontrolleres umiddelbart."
        }
        IncidentCategory::Food => {
            "Avviket gjelder mattrygghet og kan føre til matbåren sykdom eller allergiske reaksjoner hos gjester."
        }
        IncidentCategory::Hygiene => {
            "Hygieneavvik øker risikoen for krysskontaminering og spredning av bakterier i produksjonen."
        }
        IncidentCategory::Equipment => {
            "Feil på utstyr kan påvirke mattryggheten og sikkerheten til ansatte dersom det ikke utbedres."
        }
        IncidentCategory::Safety => {
            "Avviket utgjør en fare for ansattes helse og sikkerhet og skal følges opp etter HMS-rutinene."
        }
        IncidentCategory::General => {
            "Avviket krever nærmere undersøkelse for å fastslå årsak og risiko."
        }
    }
}

const CRITICAL_CONSEQUENCES: &[&str] = &[
    "Alvorlig helserisiko for gjester og ansatte",
    "Mulige pålegg, bøter eller stenging fra Mattilsynet",
    "Betydelig skade på restaurantens omdømme",
    "Økonomisk tap som følge av kassering og driftsstans",
];

const HIGH_CONSEQUENCES: &[&str] = &[
    "Moderat helserisiko dersom avviket ikke lukkes",
    "Mulig advarsel ved tilsyn fra Mattilsynet",
    "Redusert tillit hos gjestene",
    "Økonomiske kostnader til utbedring",
];

const STANDARD_CONSEQUENCES: &[&str] = &[
    "Begrenset påvirkning på kvalitet",
    "Kan bli notert av inspektør ved tilsyn",
    "Mulighet til å forbedre rutiner og praksis",
];

const CRITICAL_REMEDIATION: &[&str] = &[
    "Stans berørt drift umiddelbart",
    "Isoler og kasser berørte produkter",
    "Varsle daglig leder og Mattilsynet",
    "Rengjør og desinfiser berørte områder",
    "Gjennomgå sikkerhetsrutinene med alle ansatte",
    "Oppdater internkontrollen og HACCP-planen",
];

const HIGH_REMEDIATION: &[&str] = &[
    "Vurder omfanget av avviket",
    "Kontroller og skill ut berørte produkter",
    "Gjennomfør korrigerende tiltak",
    "Gjennomgå gjeldende rutiner",
    "Øk hyppigheten på kontroller den neste perioden",
];

const STANDARD_REMEDIATION: &[&str] = &[
    "Vurder situasjonen",
    "Iverksett nødvendige tiltak",
    "Gjennomgå rutinene",
    "Dokumenter avviket",
];

pub fn consequences(tier: SeverityTier) -> &'static [&'static str] {
    match tier {
        SeverityTier::Critical => CRITICAL_CONSEQUENCES,
        SeverityTier::High => HIGH_CONSEQUENCES,
        SeverityTier::Standard => STANDARD_CONSEQUENCES,
    }
}

/// Ordered checklist; steps are meant to be carried out top to bottom.
pub fn remediation(tier: SeverityTier) -> &'static [&'static str] {
    match tier {
        SeverityTier::Critical => CRITICAL_REMEDIATION,
        SeverityTier::High => HIGH_REMEDIATION,
        SeverityTier::Standard => STANDARD_REMEDIATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_sizes_are_fixed() {
        assert_eq!(consequences(SeverityTier::Critical).len(), 4);
        assert_eq!(consequences(SeverityTier::High).len(), 4);
        assert_eq!(consequences(SeverityTier::Standard).len(), 3);
        assert_eq!(remediation(SeverityTier::Critical).len(), 6);
        assert_eq!(remediation(SeverityTier::High).len(), 5);
        assert_eq!(remediation(SeverityTier::Standard).len(), 4);
    }

    #[test]
    fn critical_checklist_starts_by_halting_and_ends_with_plan_update() {
        let steps = remediation(SeverityTier::Critical);
        assert!(steps[0].starts_with("Stans"));
        assert!(steps[5].contains("HACCP-planen"));
    }
}
