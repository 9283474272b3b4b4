//! # alertkit
//!
//! Helpers for alerting UIs: deep links, typed filters read from query
//! parameters, key/value conversions and a time-budgeted async retry.
//!
//! ## Quick Example
//!
//! ```rust
//! use alertkit::prelude::*;
//!
//! let config = AppConfig::new("/grafana");
//!
//! // Filters from the current location
//! let filters = filters_from_url_params(&parse_query("?alertState=firing&groupBy=team"));
//! assert_eq!(filters.alert_state.as_deref(), Some("firing"));
//!
//! // Links to other pages
//! assert_eq!(
//!     make_am_link(&config.url_for("/alerting/silences"), Some("primary")),
//!     "/grafana/alerting/silences?alertmanager=primary"
//! );
//! ```
//!
//! ## Retrying
//!
//! ```rust
//! use alertkit::RetryWhile;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryWhile::new(Duration::from_secs(10)).with_pause(Duration::from_millis(5));
//! let result = policy
//!     .run(|| async { Ok::<_, std::io::Error>("saved") }, |err: &std::io::Error| {
//!         err.kind() == std::io::ErrorKind::TimedOut
//!     })
//!     .await;
//! assert_eq!(result.unwrap(), "saved");
//! # });
//! ```
//!
//! ## Features
//!
//! - `async` (default): the retry executor, on tokio timers.
//! - `tracing`: `debug` events from the retry executor.
//! - `serde`: `Serialize`/`Deserialize` for the value types.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod filters;
pub mod links;
pub mod matchers;
pub mod query;
pub mod record;
pub mod retry;
pub mod rule;
pub mod rule_id;

// Re-exports
pub use config::AppConfig;
pub use filters::{FilterState, SilenceFilterState};
pub use query::{QueryValue, UrlQueryMap};
pub use record::KeyValue;
pub use retry::{RetryEvent, RetryWhile};
pub use rule_id::{RuleIdError, RuleIdentifier};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::filters::{
        filters_from_url_params, silence_filters_from_url_params, FilterState, SilenceFilterState,
    };
    pub use crate::links::{
        create_explore_link, create_view_link, make_am_link, make_label_based_silence_link,
        make_rule_based_silence_link,
    };
    pub use crate::matchers::Labels;
    pub use crate::query::{parse_query, render_url, QueryValue, UrlQueryMap};
    pub use crate::record::{array_to_record, record_to_array, KeyValue, Record};
    #[cfg(feature = "async")]
    pub use crate::retry::retry_while;
    pub use crate::retry::{RetryEvent, RetryWhile};
    pub use crate::rule::{CombinedRule, RulesSource};
    pub use crate::rule_id::{RuleIdError, RuleIdentifier};
}
