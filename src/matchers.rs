//! Label matchers as query parameters.

use crate::record::Record;

/// Label set of an alert or rule.
pub type Labels = Record;

/// Query key carrying one `name=value` matcher.
pub const MATCHER_QUERY_KEY: &str = "matcher";

/// Whether `name` is an internal label such as `__alert_rule_uid__`.
pub fn is_private_label(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}

/// Turn labels into `matcher` query parameters, one equality matcher per
/// label. Internal labels are skipped.
///
/// ```
/// use alertkit::matchers::{matcher_query_params, Labels};
///
/// let labels = Labels::from([
///     ("team".to_string(), "ops".to_string()),
///     ("__name__".to_string(), "up".to_string()),
/// ]);
/// assert_eq!(
///     matcher_query_params(&labels),
///     vec![("matcher".to_string(), "team=ops".to_string())]
/// );
/// ```
pub fn matcher_query_params(labels: &Labels) -> Vec<(String, String)> {
    labels
        .iter()
        .filter(|(name, _)| !is_private_label(name))
        .map(|(name, value)| {
            (
                MATCHER_QUERY_KEY.to_string(),
                format!("{}={}", name, value),
            )
        })
        .collect()
}
