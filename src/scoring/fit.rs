use super::domain::AccountAttributes;
use super::settings::FitSettings;

/// Outcome of the static-attribute scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub points: f64,
    pub breakdown: Vec<String>,
}

/// Scores industry and location matches against the configured targets.
/// Missing or empty attributes contribute zero; there are no error cases.
pub fn compute_fit(attributes: &AccountAttributes, settings: &FitSettings) -> FitOutcome {
    let mut points = 0.0;
    let mut breakdown = Vec::new();

    let industry = attributes.industry.trim();
    if !industry.is_empty() && settings.target_industries.contains(industry) {
        points += settings.industry_match_score;
        breakdown.push(format!(
            "industry '{industry}' matches target industries (+{})",
            settings.industry_match_score
        ));
    }

    if location_matches(&attributes.location, settings) {
        points += settings.location_match_score;
        breakdown.push(format!(
            "location '{}' within coverage (+{})",
            attributes.location.trim(),
            settings.location_match_score
        ));
    }

    FitOutcome {
        points: points.min(settings.max_points).max(0.0),
        breakdown,
    }
}

fn location_matches(location: &str, settings: &FitSettings) -> bool {
    if settings.worldwide {
        return true;
    }

    let targets: Vec<String> = settings
        .target_countries
        .iter()
        .map(|country| normalize_country(&country.to_uppercase()))
        .collect();

    location
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| normalize_country(&token.to_uppercase()))
        .any(|token| targets.iter().any(|target| *target == token))
}

/// Collapses common country names to their ISO 3166-1 alpha-2 code so a
/// location like "Kuala Lumpur, Malaysia" matches a target list of "MY".
fn normalize_country(token: &str) -> String {
    let code = match token {
        "MALAYSIA" => "MY",
        "SINGAPORE" => "SG",
        "INDONESIA" => "ID",
        "THAILAND" => "TH",
        "VIETNAM" => "VN",
        "PHILIPPINES" => "PH",
        "INDIA" => "IN",
        "CHINA" => "CN",
        "JAPAN" => "JP",
        "KOREA" => "KR",
        "AUSTRALIA" => "AU",
        "USA" | "AMERICA" => "US",
        "UK" | "ENGLAND" | "BRITAIN" => "GB",
        "GERMANY" => "DE",
        "FRANCE" => "FR",
        "SPAIN" => "ES",
        "ITALY" => "IT",
        "NETHERLANDS" => "NL",
        "CANADA" => "CA",
        "BRAZIL" => "BR",
        "MEXICO" => "MX",
        other => other,
    };
    code.to_string()
}
