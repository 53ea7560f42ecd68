//! Turns the reasoning service's raw text into a `StructuredProfile`.
//!
//! Recovery is narrow: strict decode, then one retry with a
//! surrounding code fence removed. Anything else is `MalformedAnalysis`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::PipelineError;
use crate::models::profile::{StructuredProfile, MAX_RATING};

/// Non-fatal problems found while normalizing a decoded response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationAnomaly {
    /// A numeric rating outside `0..=10`; replaced with 0.
    RatingOutOfRange { value: f64 },
    /// A rating that is not a number; replaced with 0.
    RatingNotNumeric { value: String },
}

#[derive(Debug)]
pub struct NormalizedProfile {
    pub profile: StructuredProfile,
    pub anomalies: Vec<NormalizationAnomaly>,
}

pub fn normalize_response(
    response: &str,
    resume_text: &str,
) -> Result<NormalizedProfile, PipelineError> {
    let decoded = decode_with_fence_recovery(response)?;

    let Value::Object(mut object) = decoded else {
        return Err(malformed("top-level JSON value is not an object", response));
    };

    let anomalies = sanitize_rating(&mut object);
    for anomaly in &anomalies {
        warn!("Normalization anomaly in analysis response: {anomaly:?}");
    }

    let mut profile: StructuredProfile = serde_json::from_value(Value::Object(object))
        .map_err(|e| malformed(&format!("response does not match profile shape: {e}"), response))?;
    profile.raw_text = resume_text.to_string();

    Ok(NormalizedProfile { profile, anomalies })
}

fn decode_with_fence_recovery(response: &str) -> Result<Value, PipelineError> {
    let first_error = match serde_json::from_str(response) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(inner) = strip_json_fence(response) else {
        return Err(malformed(&first_error.to_string(), response));
    };

    serde_json::from_str(inner)
        .map_err(|e| malformed(&format!("fenced block is not valid JSON: {e}"), response))
}

/// Returns the body of a response wrapped in ``` fences, dropping an optional
/// `json` info tag. `None` when the text is not fully wrapped.
fn strip_json_fence(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("```")?.strip_suffix("```")?;
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    Some(inner.trim())
}

/// Rewrites `analysis.resume_rating` to a number in range, recording why when
/// the incoming value was unusable. An absent rating simply defaults to 0.
fn sanitize_rating(object: &mut Map<String, Value>) -> Vec<NormalizationAnomaly> {
    let Some(Value::Object(analysis)) = object.get_mut("analysis") else {
        return Vec::new();
    };
    let Some(raw) = analysis.get("resume_rating") else {
        return Vec::new();
    };

    let (rating, anomaly) = match raw {
        Value::Null => (0.0, None),
        Value::Number(n) => match n.as_f64() {
            Some(v) if (0.0..=MAX_RATING).contains(&v) => (v, None),
            Some(v) => (0.0, Some(NormalizationAnomaly::RatingOutOfRange { value: v })),
            None => (
                0.0,
                Some(NormalizationAnomaly::RatingNotNumeric {
                    value: n.to_string(),
                }),
            ),
        },
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if (0.0..=MAX_RATING).contains(&v) => (v, None),
            Ok(v) if v.is_finite() => {
                (0.0, Some(NormalizationAnomaly::RatingOutOfRange { value: v }))
            }
            _ => (
                0.0,
                Some(NormalizationAnomaly::RatingNotNumeric { value: s.clone() }),
            ),
        },
        other => (
            0.0,
            Some(NormalizationAnomaly::RatingNotNumeric {
                value: other.to_string(),
            }),
        ),
    };

    analysis.insert("resume_rating".to_string(), Value::from(rating));
    anomaly.into_iter().collect()
}

fn malformed(reason: &str, response: &str) -> PipelineError {
    PipelineError::MalformedAnalysis {
        reason: reason.to_string(),
        raw_response: response.to_string(),
    }
}
