//! Typed filter state read from URL query parameters.

use crate::query::UrlQueryMap;

/// Query key holding the free-text search.
pub const QUERY_STRING_KEY: &str = "queryString";
/// Query key holding the alert state filter.
pub const ALERT_STATE_KEY: &str = "alertState";
/// Query key holding the data source filter.
pub const DATA_SOURCE_KEY: &str = "dataSource";
/// Query key holding the rule type filter.
pub const RULE_TYPE_KEY: &str = "ruleType";
/// Query key holding the comma separated grouping labels.
pub const GROUP_BY_KEY: &str = "groupBy";
/// Query key holding the silence state filter.
pub const SILENCE_STATE_KEY: &str = "silenceState";

/// Filters of the alert rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterState {
    /// Free-text search.
    pub query_string: Option<String>,
    /// Alert state, e.g. `firing`.
    pub alert_state: Option<String>,
    /// Rules source name.
    pub data_source: Option<String>,
    /// Labels to group the list by.
    pub group_by: Option<Vec<String>>,
    /// Rule type, e.g. `alerting` or `recording`.
    pub rule_type: Option<String>,
}

/// Filters of the silence list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SilenceFilterState {
    /// Free-text search.
    pub query_string: Option<String>,
    /// Silence state, e.g. `active`.
    pub silence_state: Option<String>,
}

fn string_param(query: &UrlQueryMap, key: &str) -> Option<String> {
    query.get(key).map(ToString::to_string)
}

/// Read the rule list filters from query parameters.
///
/// Absent keys stay `None`. `groupBy` is split on commas, so both
/// `groupBy=a,b` and a repeated `groupBy` yield `["a", "b"]`.
///
/// ```
/// use alertkit::filters::filters_from_url_params;
/// use alertkit::query::parse_query;
///
/// let filters = filters_from_url_params(&parse_query("alertState=firing&groupBy=team,env"));
/// assert_eq!(filters.alert_state.as_deref(), Some("firing"));
/// assert_eq!(filters.group_by, Some(vec!["team".to_string(), "env".to_string()]));
/// assert_eq!(filters.query_string, None);
/// ```
pub fn filters_from_url_params(query: &UrlQueryMap) -> FilterState {
    FilterState {
        query_string: string_param(query, QUERY_STRING_KEY),
        alert_state: string_param(query, ALERT_STATE_KEY),
        data_source: string_param(query, DATA_SOURCE_KEY),
        group_by: string_param(query, GROUP_BY_KEY)
            .map(|group_by| group_by.split(',').map(str::to_string).collect()),
        rule_type: string_param(query, RULE_TYPE_KEY),
    }
}

/// Read the silence list filters from query parameters.
pub fn silence_filters_from_url_params(query: &UrlQueryMap) -> SilenceFilterState {
    SilenceFilterState {
        query_string: string_param(query, QUERY_STRING_KEY),
        silence_state: string_param(query, SILENCE_STATE_KEY),
    }
}
