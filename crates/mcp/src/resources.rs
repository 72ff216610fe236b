use filekeeper_core::Config;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CallError;

pub const FILE_RULES_URI: &str = "prompts://file-rules";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

pub fn list_resources() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: FILE_RULES_URI.to_string(),
        name: "file-rules".to_string(),
        description: "Rules for organizing files and supported text extensions".to_string(),
        mime_type: "application/json".to_string(),
    }]
}

pub fn read_resource(uri: &str, config: &Config) -> Result<Value, CallError> {
    match uri {
        FILE_RULES_URI => {
            let text = serde_json::to_string_pretty(&config.rules)?;
            Ok(json!({
                "contents": [{
                    "uri": FILE_RULES_URI,
                    "mimeType": "application/json",
                    "text": text
                }]
            }))
        }
        _ => Err(CallError::UnknownResource(uri.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekeeper_core::RuleTable;

    #[test]
    fn rules_resource_is_the_active_table() {
        let mut config = Config::default();
        config
            .rules
            .organize
            .insert(".zip".to_string(), "Archives".to_string());

        let value = read_resource(FILE_RULES_URI, &config).unwrap();
        let text = value["contents"][0]["text"].as_str().unwrap();
        let rules: RuleTable = serde_json::from_str(text).unwrap();

        assert_eq!(rules, config.rules);
    }

    #[test]
    fn unknown_uri_is_rejected() {
        let err = read_resource("prompts://nope", &Config::default()).unwrap_err();
        assert!(matches!(err, CallError::UnknownResource(_)));
    }
}
