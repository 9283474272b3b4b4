//! Stable string identifiers for alert rules.
//!
//! Rules managed by the application are addressed by their uid. Rules living
//! in an external source have no id of their own, so they are addressed by
//! their location plus a hash of their definition:
//!
//! ```text
//! cri$<source>$<namespace>$<group>$<hash>
//! ```
//!
//! A `$` inside any part is written as `_DOLLAR_`.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use thiserror::Error;

use crate::record::Record;
use crate::rule::{CombinedRule, PromRule, RulerRule};
use crate::query::decode_uri_component;

const CLOUD_RULE_PREFIX: &str = "cri";
const SEPARATOR: char = '$';
const ESCAPED_SEPARATOR: &str = "_DOLLAR_";

/// Errors produced while building or parsing rule identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIdError {
    /// The rule has neither a ruler nor a rules API definition to derive an id from.
    #[error("could not create an id for a rule that is missing both its ruler and prom definitions")]
    MissingDefinition,
    /// The string is not a valid rule identifier.
    #[error("failed to parse rule location: {0}")]
    Malformed(String),
}

/// Identifies a rule across page loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleIdentifier {
    /// A rule managed by the application.
    Grafana {
        /// Rule uid.
        uid: String,
    },
    /// A rule stored in an external rules source.
    Cloud {
        /// Name of the rules source.
        rules_source_name: String,
        /// Namespace the rule group lives in.
        namespace: String,
        /// Rule group name.
        group_name: String,
        /// Hash of the rule definition.
        rule_hash: i32,
    },
}

impl RuleIdentifier {
    /// Build the identifier of `rule`, stored in the source named `rules_source_name`.
    ///
    /// The ruler definition takes precedence over the rules API one.
    pub fn from_combined_rule(
        rules_source_name: &str,
        rule: &CombinedRule,
    ) -> Result<Self, RuleIdError> {
        let rule_hash = match (&rule.ruler_rule, &rule.prom_rule) {
            (Some(RulerRule::Grafana { uid }), _) => {
                return Ok(RuleIdentifier::Grafana { uid: uid.clone() })
            }
            (Some(ruler_rule), _) => hash_ruler_rule(ruler_rule),
            (None, Some(prom_rule)) => hash_prom_rule(prom_rule),
            (None, None) => return Err(RuleIdError::MissingDefinition),
        };

        Ok(RuleIdentifier::Cloud {
            rules_source_name: rules_source_name.to_string(),
            namespace: rule.namespace.clone(),
            group_name: rule.group.clone(),
            rule_hash,
        })
    }

    /// Render the identifier as a string.
    ///
    /// ```
    /// use alertkit::rule_id::RuleIdentifier;
    ///
    /// let id = RuleIdentifier::Cloud {
    ///     rules_source_name: "prom".into(),
    ///     namespace: "ops$infra".into(),
    ///     group_name: "node".into(),
    ///     rule_hash: -42,
    /// };
    /// assert_eq!(id.stringify(), "cri$prom$ops_DOLLAR_infra$node$-42");
    /// ```
    pub fn stringify(&self) -> String {
        match self {
            RuleIdentifier::Grafana { uid } => uid.clone(),
            RuleIdentifier::Cloud {
                rules_source_name,
                namespace,
                group_name,
                rule_hash,
            } => {
                let rule_hash = rule_hash.to_string();
                [
                    CLOUD_RULE_PREFIX,
                    rules_source_name.as_str(),
                    namespace.as_str(),
                    group_name.as_str(),
                    rule_hash.as_str(),
                ]
                .map(escape_dollars)
                .join("$")
            }
        }
    }

    /// Parse an identifier produced by [`stringify`](Self::stringify).
    ///
    /// With `decode_from_uri`, `value` is percent-decoded first, for values
    /// taken straight from a URL path.
    pub fn parse(value: &str, decode_from_uri: bool) -> Result<Self, RuleIdError> {
        let source = if decode_from_uri {
            decode_uri_component(value)
                .ok_or_else(|| RuleIdError::Malformed(value.to_string()))?
                .into_owned()
        } else {
            value.to_string()
        };

        let parts: Vec<String> = source.split(SEPARATOR).map(unescape_dollars).collect();

        match parts.as_slice() {
            [_] => Ok(RuleIdentifier::Grafana { uid: source }),
            [prefix, rules_source_name, namespace, group_name, rule_hash]
                if prefix == CLOUD_RULE_PREFIX =>
            {
                let rule_hash = rule_hash
                    .parse()
                    .map_err(|_| RuleIdError::Malformed(value.to_string()))?;
                Ok(RuleIdentifier::Cloud {
                    rules_source_name: rules_source_name.clone(),
                    namespace: namespace.clone(),
                    group_name: group_name.clone(),
                    rule_hash,
                })
            }
            _ => Err(RuleIdError::Malformed(value.to_string())),
        }
    }

    /// Returns true for identifiers of application-managed rules.
    pub fn is_grafana(&self) -> bool {
        matches!(self, RuleIdentifier::Grafana { .. })
    }
}

impl fmt::Display for RuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl FromStr for RuleIdentifier {
    type Err = RuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

fn escape_dollars(value: &str) -> String {
    value.replace(SEPARATOR, ESCAPED_SEPARATOR)
}

fn unescape_dollars(value: &str) -> String {
    value.replace(ESCAPED_SEPARATOR, "$")
}

/// 32-bit string hash over UTF-16 code units (`h = h * 31 + c`, wrapping).
fn hash(value: &str) -> i32 {
    value.encode_utf16().fold(0i32, |h, c| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(c))
    })
}

/// JSON text of the entries, sorted by key, as `[key, value]` pairs.
fn hash_labels(record: &Record) -> String {
    Value::Array(
        record
            .iter()
            .map(|(key, value)| json!([key, value]))
            .collect(),
    )
    .to_string()
}

fn hash_ruler_rule(rule: &RulerRule) -> i32 {
    let fingerprint = match rule {
        RulerRule::Grafana { uid } => json!([uid]),
        RulerRule::Alerting {
            alert,
            expr,
            labels,
            annotations,
        } => json!([alert, expr, hash_labels(annotations), hash_labels(labels)]),
        RulerRule::Recording {
            record,
            expr,
            labels,
        } => json!([record, expr, hash_labels(labels)]),
    };
    hash(&fingerprint.to_string())
}

fn hash_prom_rule(rule: &PromRule) -> i32 {
    let fingerprint = match rule {
        PromRule::Alerting {
            query,
            labels,
            annotations,
        } => json!([
            "alerting",
            query,
            hash_labels(annotations),
            hash_labels(labels)
        ]),
        PromRule::Recording { query, labels } => {
            json!(["recording", query, hash_labels(labels)])
        }
    };
    hash(&fingerprint.to_string())
}
