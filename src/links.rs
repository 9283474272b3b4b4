//! Deep links into the alerting UI.
//!
//! Every builder takes the [`AppConfig`] explicitly so the same code serves
//! applications mounted under different sub-paths.

use serde_json::json;
use url::form_urlencoded;

use crate::config::AppConfig;
use crate::matchers::{matcher_query_params, Labels};
use crate::rule::{CombinedRule, RulesSource};
use crate::rule_id::{RuleIdError, RuleIdentifier};
use crate::query::{encode_uri_component, render_url, UrlQueryMap};

/// Query key selecting the alertmanager a page operates on.
pub const ALERTMANAGER_NAME_QUERY_KEY: &str = "alertmanager";

/// Link to the detail page of `rule`, returning to `return_to` afterwards.
///
/// Fails if no identifier can be built for the rule.
pub fn create_view_link(
    config: &AppConfig,
    rules_source: &RulesSource,
    rule: &CombinedRule,
    return_to: &str,
) -> Result<String, RuleIdError> {
    let source_name = rules_source.name();
    let identifier = RuleIdentifier::from_combined_rule(source_name, rule)?;

    let path = config.url_for(&format!(
        "/alerting/{}/{}/view",
        encode_uri_component(source_name),
        encode_uri_component(&identifier.stringify()),
    ));
    let query = UrlQueryMap::from([("returnTo".to_string(), return_to.into())]);

    Ok(render_url(&path, &query))
}

/// Link opening `query` against `data_source_name` in Explore, over the last hour.
pub fn create_explore_link(config: &AppConfig, data_source_name: &str, query: &str) -> String {
    let left = json!([
        "now-1h",
        "now",
        data_source_name,
        { "datasource": data_source_name, "expr": query },
        { "ui": [true, true, true, "none"] }
    ]);
    let params = UrlQueryMap::from([("left".to_string(), left.to_string().into())]);

    render_url(&config.url_for("/explore"), &params)
}

/// Scope `path` to an alertmanager. Without a name the path is returned as is.
///
/// ```
/// use alertkit::links::make_am_link;
///
/// assert_eq!(make_am_link("/alerting/silences", Some("team am")), "/alerting/silences?alertmanager=team%20am");
/// assert_eq!(make_am_link("/alerting/silences", None), "/alerting/silences");
/// ```
pub fn make_am_link(path: &str, alertmanager_name: Option<&str>) -> String {
    match alertmanager_name {
        Some(name) if !name.is_empty() => format!(
            "{}?{}={}",
            path,
            ALERTMANAGER_NAME_QUERY_KEY,
            encode_uri_component(name)
        ),
        _ => path.to_string(),
    }
}

/// Link to a new silence matching the alerts of `rule`.
///
/// The rule name is matched as `alertname` unless the rule labels set one.
pub fn make_rule_based_silence_link(
    config: &AppConfig,
    alertmanager_source_name: &str,
    rule: &CombinedRule,
) -> String {
    let mut labels = Labels::from([("alertname".to_string(), rule.name.clone())]);
    labels.extend(
        rule.labels
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );

    make_label_based_silence_link(config, alertmanager_source_name, &labels)
}

/// Link to a new silence pre-filled with one matcher per label.
pub fn make_label_based_silence_link(
    config: &AppConfig,
    alertmanager_source_name: &str,
    labels: &Labels,
) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair(ALERTMANAGER_NAME_QUERY_KEY, alertmanager_source_name);
    for (key, value) in matcher_query_params(labels) {
        params.append_pair(&key, &value);
    }

    format!(
        "{}?{}",
        config.url_for("/alerting/silence/new"),
        params.finish()
    )
}
