//! Filter policy and attribute extraction — decides which of a clicked
//! element's attributes survive into the event record.

use serde::{Deserialize, Serialize};

use clicktrail_core::{AttributeMap, TrailError, TrailResult};

use crate::host::UiElement;

/// Attribute-name patterns dropped by the default policy: presentation
/// attributes, `aria-*` accessibility attributes, and UI-library state
/// attributes. Keeps naive "log everything" usage from flooding the sink
/// with layout noise — business `data-*` attributes survive.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 7] = [
    "aria-",
    "class",
    "height",
    "width",
    "style",
    "data-state",
    "data-sidebar",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncludeAllMode {
    /// Apply the ignore-pattern filter.
    #[default]
    Auto,
    /// Include every attribute unconditionally.
    All,
    /// Explicitly pinned off. Filters like [`Auto`](IncludeAllMode::Auto).
    None,
}

/// Rule set governing which element attributes are surfaced in a click
/// event. Validated once at construction, never per click.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    ignore_patterns: Vec<String>,
    allow_prefix: Option<String>,
    include_all: IncludeAllMode,
}

impl FilterPolicy {
    /// Build a policy. An empty `ignore_patterns` gets the default ignore
    /// set (unless `include_all` is [`IncludeAllMode::All`]).
    ///
    /// Rejects the two forbidden combinations with [`TrailError::Config`]:
    /// a prefix alongside an explicit include-all mode, and
    /// [`IncludeAllMode::All`] alongside caller-supplied ignore patterns.
    pub fn new(
        ignore_patterns: Vec<String>,
        allow_prefix: Option<String>,
        include_all: IncludeAllMode,
    ) -> TrailResult<Self> {
        if allow_prefix.is_some() && include_all != IncludeAllMode::Auto {
            return Err(TrailError::Config(
                "allow_prefix cannot be combined with an explicit include-all mode".into(),
            ));
        }
        if include_all == IncludeAllMode::All && !ignore_patterns.is_empty() {
            return Err(TrailError::Config(
                "include-all cannot be combined with ignore patterns".into(),
            ));
        }

        let ignore_patterns = if ignore_patterns.is_empty() && include_all != IncludeAllMode::All {
            DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            ignore_patterns
        };

        Ok(Self {
            ignore_patterns,
            allow_prefix,
            include_all,
        })
    }

    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore_patterns
    }

    pub fn allow_prefix(&self) -> Option<&str> {
        self.allow_prefix.as_deref()
    }

    pub fn include_all(&self) -> IncludeAllMode {
        self.include_all
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            allow_prefix: None,
            include_all: IncludeAllMode::Auto,
        }
    }
}

/// Extract the filtered attribute map from `element`. An absent element
/// yields an empty map rather than an error.
///
/// Precedence per attribute: include-all admits everything; otherwise a
/// configured prefix admits only matching names (prefix stripped from the
/// output key); otherwise names matching no ignore pattern pass unchanged.
pub fn extract<E: UiElement>(element: Option<&E>, policy: &FilterPolicy) -> AttributeMap {
    let Some(element) = element else {
        return AttributeMap::new();
    };

    let mut map = AttributeMap::new();
    for (name, value) in element.attributes() {
        if policy.include_all == IncludeAllMode::All {
            map.insert(name, value);
        } else if let Some(prefix) = policy.allow_prefix() {
            if let Some(stripped) = name.strip_prefix(prefix) {
                map.insert(stripped.to_string(), value);
            }
        } else if !policy.ignore_patterns.iter().any(|p| name.starts_with(p.as_str())) {
            map.insert(name, value);
        }
    }
    map
}
