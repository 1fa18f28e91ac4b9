//! Action selection by looking for a marker in the raw request body.
//!
//! This is a substring match, not an XML parse: the first rule whose marker
//! appears verbatim in the body wins.

use serde::{Deserialize, Serialize};
use soapenv::EXAMPLE_NS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SniffRule {
    pub marker: String,
    pub action: String,
}

impl SniffRule {
    pub fn new(marker: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            action: action.into(),
        }
    }
}

/// Returns the action of the first rule whose marker occurs in `body`.
pub fn sniff<'a>(rules: &'a [SniffRule], body: &[u8]) -> Option<&'a str> {
    let text = String::from_utf8_lossy(body);
    rules
        .iter()
        .find(|rule| !rule.marker.is_empty() && text.contains(rule.marker.as_str()))
        .map(|rule| rule.action.as_str())
}

/// Rules matching the request elements of `processA` and `processB` as
/// written by the encoder.
pub fn default_rules() -> Vec<SniffRule> {
    vec![
        SniffRule::new(
            format!("<ProcessARequest xmlns=\"{EXAMPLE_NS}\">"),
            "processA",
        ),
        SniffRule::new(
            format!("<ProcessBRequest xmlns=\"{EXAMPLE_NS}\">"),
            "processB",
        ),
    ]
}
