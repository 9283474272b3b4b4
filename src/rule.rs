//! The slice of the alert rule model that links and identifiers need.

use crate::record::Record;

/// Name of the built-in rules source.
pub const GRAFANA_RULES_SOURCE_NAME: &str = "grafana";

/// Where a rule is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RulesSource {
    /// Rules managed by the application itself.
    Grafana,
    /// Rules stored in an external data source (Prometheus, Loki, ...).
    DataSource {
        /// Data source name.
        name: String,
    },
}

impl RulesSource {
    /// Create an external data source.
    pub fn data_source(name: impl Into<String>) -> Self {
        RulesSource::DataSource { name: name.into() }
    }

    /// The name used for this source in URLs and identifiers.
    ///
    /// ```
    /// use alertkit::rule::RulesSource;
    ///
    /// assert_eq!(RulesSource::Grafana.name(), "grafana");
    /// assert_eq!(RulesSource::data_source("prometheus").name(), "prometheus");
    /// ```
    pub fn name(&self) -> &str {
        match self {
            RulesSource::Grafana => GRAFANA_RULES_SOURCE_NAME,
            RulesSource::DataSource { name } => name,
        }
    }
}

/// A rule definition as read from a ruler API.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RulerRule {
    /// A rule managed by the application, addressed by uid.
    Grafana {
        /// Unique rule id.
        uid: String,
    },
    /// An external alerting rule.
    Alerting {
        /// Alert name.
        alert: String,
        /// Query expression.
        expr: String,
        /// Labels attached to fired alerts.
        labels: Record,
        /// Annotations attached to fired alerts.
        annotations: Record,
    },
    /// An external recording rule.
    Recording {
        /// Name of the recorded series.
        record: String,
        /// Query expression.
        expr: String,
        /// Labels attached to the recorded series.
        labels: Record,
    },
}

/// A rule as reported by a Prometheus-compatible rules API.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PromRule {
    /// An alerting rule.
    Alerting {
        /// Query expression.
        query: String,
        /// Rule labels.
        labels: Record,
        /// Rule annotations.
        annotations: Record,
    },
    /// A recording rule.
    Recording {
        /// Query expression.
        query: String,
        /// Rule labels.
        labels: Record,
    },
}

/// A rule merged from its ruler and Prometheus representations.
///
/// Either representation may be missing; see
/// [`RuleIdentifier::from_combined_rule`](crate::rule_id::RuleIdentifier::from_combined_rule).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedRule {
    /// Display name.
    pub name: String,
    /// Query expression.
    pub query: String,
    /// Labels.
    pub labels: Record,
    /// Annotations.
    pub annotations: Record,
    /// Namespace (folder) name.
    pub namespace: String,
    /// Rule group name.
    pub group: String,
    /// Definition from the ruler API.
    pub ruler_rule: Option<RulerRule>,
    /// State from the rules API.
    pub prom_rule: Option<PromRule>,
}
