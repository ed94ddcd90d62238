//! Author-facing notification spec, as written in `notifications/*.yml`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordering weight of a notification; higher comes first.
///
/// Any YAML number is accepted, integral or not.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(pub f64);

impl Priority {
    pub const DEFAULT: Priority = Priority(1.0);
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Option<f64>> for Priority {
    fn from(value: Option<f64>) -> Self {
        value.map(Priority).unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Applicability requirements of a notification.
///
/// Only `installed` is interpreted; any other key is carried into the feed
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Installed-package constraints, possibly in shorthand form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<Vec<String>>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

/// A notification spec file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSpec {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// First day the notification is shown (inclusive).
    pub start: Option<NaiveDate>,
    /// Last day the notification is shown (inclusive).
    pub end: Option<NaiveDate>,
    pub requirements: Option<Requirements>,
    pub icon: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub accept_button_label: Option<String>,
    pub reject_button_label: Option<String>,
    pub priority: Option<f64>,
}

impl RawSpec {
    /// Top-level keys a spec file may use.
    pub const FIELDS: &'static [&'static str] = &[
        "type",
        "start",
        "end",
        "requirements",
        "icon",
        "title",
        "text",
        "link",
        "accept_button_label",
        "reject_button_label",
        "priority",
    ];

    pub fn priority(&self) -> Priority {
        self.priority.into()
    }
}
