use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How soon a maintenance issue needs attention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Classifies free text the way the analysis completion is read:
    /// "high" wins over "low", anything else is medium.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("high") {
            Urgency::High
        } else if lower.contains("low") {
            Urgency::Low
        } else {
            Urgency::Medium
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUrgency(pub String);

impl fmt::Display for InvalidUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid urgency '{}': must be low, medium, or high", self.0)
    }
}

impl std::error::Error for InvalidUrgency {}

/// Strict parse, case-insensitive. Used for stored rows and client input,
/// never for model output (see [`Urgency::classify`]).
impl FromStr for Urgency {
    type Err = InvalidUrgency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(InvalidUrgency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Urgency {
    type Error = InvalidUrgency;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Trade category a user can tag a request with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Plumbing,
    Electrical,
    #[serde(rename = "HVAC")]
    Hvac,
    Structural,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Plumbing,
        Category::Electrical,
        Category::Hvac,
        Category::Structural,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plumbing => "Plumbing",
            Category::Electrical => "Electrical",
            Category::Hvac => "HVAC",
            Category::Structural => "Structural",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// Structured reading of a model completion. Every text field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub diagnosis: String,
    pub urgency: Urgency,
    pub estimated_cost: String,
    pub contractor_type: String,
    pub next_steps: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_high_over_low() {
        assert_eq!(
            Urgency::classify("this is HIGH priority and not low"),
            Urgency::High
        );
    }

    #[test]
    fn test_classify_low() {
        assert_eq!(Urgency::classify("Low - cosmetic"), Urgency::Low);
    }

    #[test]
    fn test_classify_defaults_to_medium() {
        assert_eq!(Urgency::classify("MEDIUM"), Urgency::Medium);
        assert_eq!(Urgency::classify("soon-ish"), Urgency::Medium);
        assert_eq!(Urgency::classify(""), Urgency::Medium);
    }

    #[test]
    fn test_classify_matches_inside_words() {
        // "highly" contains "high"; substring containment is intentional
        assert_eq!(Urgency::classify("highly recommended"), Urgency::High);
        assert_eq!(Urgency::classify("follow the flow"), Urgency::Low);
    }

    #[test]
    fn test_urgency_from_str_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Urgency>().unwrap(), Urgency::High);
        assert_eq!(" Medium ".parse::<Urgency>().unwrap(), Urgency::Medium);
        assert!("urgent".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_urgency_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), r#""high""#);
        let u: Urgency = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(u, Urgency::Low);
    }

    #[test]
    fn test_category_hvac_wire_name() {
        assert_eq!(serde_json::to_string(&Category::Hvac).unwrap(), r#""HVAC""#);
        assert_eq!("HVAC".parse::<Category>(), Ok(Category::Hvac));
        assert!("hvac".parse::<Category>().is_err());
    }

    #[test]
    fn test_analysis_result_camel_case() {
        let result = AnalysisResult {
            diagnosis: "Leak".to_string(),
            urgency: Urgency::High,
            estimated_cost: "$100".to_string(),
            contractor_type: "Plumber".to_string(),
            next_steps: "Shut off water".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["estimatedCost"], "$100");
        assert_eq!(json["contractorType"], "Plumber");
        assert_eq!(json["nextSteps"], "Shut off water");
        assert_eq!(json["urgency"], "high");
    }
}
