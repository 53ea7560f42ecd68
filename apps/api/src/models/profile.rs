//! The canonical structured résumé record produced by the analysis pipeline.
//!
//! Field names on the wire follow the JSON shape requested from the reasoning
//! service (`personal_info`, `resume_rating`), so a decoded service response
//! and a serialized profile share one layout.

use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredProfile {
    #[serde(rename = "personal_info", default, deserialize_with = "null_as_default")]
    pub personal: PersonalInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: Analysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "null_as_default")]
    pub core_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub language: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub institution: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub degree: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub field_of_study: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub graduation_date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub url: Option<String>,
}

/// Scoring and advice. `rating` is always within `0.0..=MAX_RATING` once a
/// profile has been normalized; the normalizer rewrites the raw value before
/// this struct is decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "resume_rating", default)]
    pub rating: f64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub strengths: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub improvement_areas: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub upskill_suggestions: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_sections: Vec<String>,
}

impl StructuredProfile {
    pub fn rating_in_range(&self) -> bool {
        (0.0..=MAX_RATING).contains(&self.analysis.rating)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts text, numbers and booleans for free-text fields. Services routinely
/// answer `"gpa": 3.8` or `"graduation_date": 2021` where text was asked for.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected text, found {}",
            json_kind(&other)
        ))),
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
