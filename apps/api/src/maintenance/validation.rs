use serde::{Deserialize, Serialize};

use crate::maintenance::models::{Category, Urgency};

pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Body of an analysis request as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_address: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// An analysis request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAnalyzeRequest {
    pub description: String,
    pub property_address: Option<String>,
    pub category: Option<Category>,
}

/// Checks description length (in characters) and category membership.
/// An empty category string means "no category".
pub fn validate_analyze_request(req: AnalyzeRequest) -> Result<ValidAnalyzeRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let description = req.description.unwrap_or_default();
    let length = description.chars().count();
    if length < DESCRIPTION_MIN_CHARS {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at least {DESCRIPTION_MIN_CHARS} characters"),
        ));
    } else if length > DESCRIPTION_MAX_CHARS {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        ));
    }

    let category = match req.category.as_deref() {
        None | Some("") => None,
        Some(raw) => match raw.parse::<Category>() {
            Ok(c) => Some(c),
            Err(()) => {
                let allowed: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                errors.push(FieldError::new(
                    "category",
                    format!("Category must be one of: {}", allowed.join(", ")),
                ));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidAnalyzeRequest {
        description,
        property_address: req.property_address.filter(|a| !a.is_empty()),
        category,
    })
}

/// Body of a save request: an analysis the client wants to keep.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_address: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
    #[serde(default)]
    pub contractor_type: Option<String>,
    #[serde(default)]
    pub next_steps: Option<String>,
}

/// A save request that passed validation. Optional fields are `None` when blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSaveRequest {
    pub description: String,
    pub property_address: Option<String>,
    pub category: Option<String>,
    pub diagnosis: String,
    pub urgency: Urgency,
    pub estimated_cost: Option<String>,
    pub contractor_type: Option<String>,
    pub next_steps: Option<String>,
}

/// Requires description, diagnosis and urgency; urgency must name a level
/// (any case). Missing fields are all reported together.
pub fn validate_save_request(req: SaveRequest) -> Result<ValidSaveRequest, Vec<FieldError>> {
    let description = non_empty(req.description);
    let diagnosis = non_empty(req.diagnosis);
    let urgency = non_empty(req.urgency);

    let missing: Vec<FieldError> = [
        ("description", description.is_none()),
        ("diagnosis", diagnosis.is_none()),
        ("urgency", urgency.is_none()),
    ]
    .into_iter()
    .filter(|(_, is_missing)| *is_missing)
    .map(|(field, _)| FieldError::new(field, "Missing required field"))
    .collect();

    let (Some(description), Some(diagnosis), Some(urgency)) = (description, diagnosis, urgency)
    else {
        return Err(missing);
    };

    let urgency = urgency.parse::<Urgency>().map_err(|_| {
        vec![FieldError::new(
            "urgency",
            "Invalid urgency value. Must be low, medium, or high.",
        )]
    })?;

    Ok(ValidSaveRequest {
        description,
        property_address: non_empty(req.property_address),
        category: non_empty(req.category),
        diagnosis,
        urgency,
        estimated_cost: non_empty(req.estimated_cost),
        contractor_type: non_empty(req.contractor_type),
        next_steps: non_empty(req.next_steps),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
