//! Structured extraction pipeline: one model call with a strict four-field
//! JSON contract, falling back to the deterministic rule-based extractor
//! whenever the call is unavailable or returns unusable output.

pub mod handlers;
pub mod prompts;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::LlmClient;

/// The four semantic fields extracted from a free-text outing description.
/// Each field is independently nullable; in the rule-based path an unknown
/// sentinel (e.g. 未知鱼种) is a distinct value from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(default)]
    pub fish_type: Option<String>,
    #[serde(default)]
    pub bait: Option<String>,
    #[serde(default)]
    pub rod: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Extracts a structured record from free text.
///
/// With no configured client the rule-based extractor answers directly.
/// Otherwise a single deterministic model call is issued; any failure in the
/// call or in parsing its output is swallowed and the rule-based result is
/// returned instead. This function never fails past its own boundary.
pub async fn extract(text: &str, llm: Option<&LlmClient>) -> ExtractedRecord {
    let Some(client) = llm else {
        return rules::extract_rule_based(text);
    };

    match client
        .call_json::<ExtractedRecord>(text, prompts::EXTRACT_SYSTEM)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            warn!("Model extraction failed, falling back to rule-based: {e}");
            rules::extract_rule_based(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_client_equals_rule_based() {
        let text = "用蚯蚓钓鲫鱼，天气晴朗微风";
        assert_eq!(extract(text, None).await, rules::extract_rule_based(text));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let record: ExtractedRecord = serde_json::from_str(r#"{"fish_type": "鲈鱼"}"#).unwrap();
        assert_eq!(record.fish_type.as_deref(), Some("鲈鱼"));
        assert_eq!(record.bait, None);
        assert_eq!(record.rod, None);
        assert_eq!(record.environment, None);
    }

    #[test]
    fn test_explicit_nulls_deserialize_as_none() {
        let record: ExtractedRecord = serde_json::from_str(
            r#"{"fish_type": null, "bait": "米诺", "rod": null, "environment": null}"#,
        )
        .unwrap();
        assert_eq!(record.bait.as_deref(), Some("米诺"));
        assert_eq!(record.fish_type, None);
    }
}
