//! Machine-facing notification, as emitted into the feed.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SpecErrorKind;
use crate::raw::{RawSpec, Requirements};
use crate::requirements::translate_installed;

/// Label given to the accept button when a spec names neither button.
pub const DEFAULT_ACCEPT_LABEL: &str = "Ok";

/// A fully explicit notification record.
///
/// Field order here is the field order in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedNotification {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Exclusive lower bound of the display window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Exclusive upper bound of the display window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Requirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_button_label: Option<String>,
}

impl NormalizedNotification {
    /// Translate a raw spec. The returned record has an empty `id`; callers
    /// assign it with [`NormalizedNotification::identify`].
    pub fn from_spec(spec: RawSpec) -> Result<Self, SpecErrorKind> {
        let requirements = spec.requirements.map(translate_requirements).transpose()?;

        // Authored windows are inclusive, the client compares exclusively.
        let start = spec
            .start
            .map(|date| {
                date.pred_opt()
                    .ok_or(SpecErrorKind::DateOutOfRange { field: "start", date })
            })
            .transpose()?;
        let end = spec
            .end
            .map(|date| {
                date.succ_opt()
                    .ok_or(SpecErrorKind::DateOutOfRange { field: "end", date })
            })
            .transpose()?;

        let (accept_button_label, reject_button_label) =
            match (spec.accept_button_label, spec.reject_button_label) {
                (None, None) => (Some(DEFAULT_ACCEPT_LABEL.to_string()), None),
                labels => labels,
            };

        Ok(Self {
            id: String::new(),
            kind: spec.kind,
            start,
            end,
            requirements,
            icon: spec.icon,
            title: spec.title,
            text: spec.text,
            link: spec.link,
            accept_button_label,
            reject_button_label,
        })
    }

    /// Set `id` from the stem of the file the spec came from.
    pub fn identify(mut self, path: &Path) -> Result<Self, SpecErrorKind> {
        self.id = notifeed_common_fs::path::stem(path).ok_or(SpecErrorKind::MissingStem)?;
        Ok(self)
    }
}

fn translate_requirements(mut requirements: Requirements) -> Result<Requirements, SpecErrorKind> {
    if let Some(installed) = requirements.installed.take() {
        requirements.installed = Some(translate_installed(&installed)?);
    }
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::RequirementError;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_accept_label() {
        let n = NormalizedNotification::from_spec(RawSpec::default()).unwrap();
        assert_eq!(n.accept_button_label.as_deref(), Some("Ok"));
        assert_eq!(n.reject_button_label, None);
    }

    #[test]
    fn test_reject_only_is_left_alone() {
        let spec = RawSpec {
            reject_button_label: Some("Later".to_string()),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec).unwrap();
        assert_eq!(n.accept_button_label, None);
        assert_eq!(n.reject_button_label.as_deref(), Some("Later"));
    }

    #[test]
    fn test_accept_only_is_left_alone() {
        let spec = RawSpec {
            accept_button_label: Some("Go".to_string()),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec).unwrap();
        assert_eq!(n.accept_button_label.as_deref(), Some("Go"));
        assert_eq!(n.reject_button_label, None);
    }

    #[test]
    fn test_empty_label_counts_as_present() {
        let spec = RawSpec {
            accept_button_label: Some(String::new()),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec).unwrap();
        assert_eq!(n.accept_button_label.as_deref(), Some(""));
    }

    #[test]
    fn test_dates_widen_by_one_day() {
        let spec = RawSpec {
            start: Some(date(2024, 1, 10)),
            end: Some(date(2024, 1, 20)),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec).unwrap();
        assert_eq!(n.start, Some(date(2024, 1, 9)));
        assert_eq!(n.end, Some(date(2024, 1, 21)));
    }

    #[test]
    fn test_dates_cross_month_and_year() {
        let spec = RawSpec {
            start: Some(date(2024, 1, 1)),
            end: Some(date(2024, 2, 29)),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec).unwrap();
        assert_eq!(n.start, Some(date(2023, 12, 31)));
        assert_eq!(n.end, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_unset_dates_stay_unset() {
        let n = NormalizedNotification::from_spec(RawSpec::default()).unwrap();
        assert_eq!(n.start, None);
        assert_eq!(n.end, None);
    }

    #[test]
    fn test_date_overflow_is_error() {
        let spec = RawSpec {
            end: Some(NaiveDate::MAX),
            ..RawSpec::default()
        };
        assert!(matches!(
            NormalizedNotification::from_spec(spec),
            Err(SpecErrorKind::DateOutOfRange { field: "end", .. })
        ));
    }

    #[test]
    fn test_requirements_translated_and_extras_kept() {
        let mut other = std::collections::BTreeMap::new();
        other.insert("os".to_string(), serde_yaml::Value::String("linux".to_string()));
        let spec = RawSpec {
            requirements: Some(Requirements {
                installed: Some(vec!["vscode".to_string(), "atom<2".to_string()]),
                other: other.clone(),
            }),
            ..RawSpec::default()
        };

        let n = NormalizedNotification::from_spec(spec).unwrap();
        let requirements = n.requirements.unwrap();
        assert_eq!(
            requirements.installed,
            Some(vec![
                "atom<2".to_string(),
                "vscode>=0".to_string(),
                "atom>=0".to_string()
            ])
        );
        assert_eq!(requirements.other, other);
    }

    #[test]
    fn test_invalid_requirement_is_error() {
        let spec = RawSpec {
            requirements: Some(Requirements {
                installed: Some(vec![String::new()]),
                ..Requirements::default()
            }),
            ..RawSpec::default()
        };
        assert!(matches!(
            NormalizedNotification::from_spec(spec),
            Err(SpecErrorKind::Requirement(RequirementError::Empty))
        ));
    }

    #[test]
    fn test_identify_uses_stem() {
        for path in ["notifications/spring-sale.yml", "notifications/spring-sale.yaml"] {
            let n = NormalizedNotification::from_spec(RawSpec::default())
                .unwrap()
                .identify(&PathBuf::from(path))
                .unwrap();
            assert_eq!(n.id, "spring-sale");
        }
    }

    #[test]
    fn test_identify_without_stem() {
        let result = NormalizedNotification::from_spec(RawSpec::default())
            .unwrap()
            .identify(Path::new("notifications/.yml"));
        assert!(matches!(result, Err(SpecErrorKind::MissingStem)));
    }

    #[test]
    fn test_serialized_field_order() {
        let spec = RawSpec {
            kind: Some("info".to_string()),
            title: Some("Hello".to_string()),
            start: Some(date(2024, 5, 2)),
            ..RawSpec::default()
        };
        let n = NormalizedNotification::from_spec(spec)
            .unwrap()
            .identify(Path::new("hello.yml"))
            .unwrap();

        let value = serde_yaml::to_value(&n).unwrap();
        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["id", "type", "start", "title", "accept_button_label"]);
    }
}
