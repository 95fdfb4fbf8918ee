//! Date field binding
//!
//! Handles single, range and multiple selection, the disable policy, and the
//! formatted/ISO output stored in the value map. Display formats are written in
//! date-fns style (`yyyy-MM-dd`) and translated to chrono's strftime syntax.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tracing::warn;

use crate::error::BindError;
use crate::model::{DateConfig, DateDataType, DateMode};

/// Host-supplied hook; returns `true` for dates that cannot be picked
pub type DatePredicate = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

/// A date picker change event
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Single(NaiveDateTime),
    Range(NaiveDateTime, NaiveDateTime),
    Multiple(Vec<NaiveDateTime>),
    /// Typed text in the field's display format
    Text(String),
}

impl DateInput {
    pub fn day(date: NaiveDate) -> Self {
        DateInput::Single(date.and_time(NaiveTime::MIN))
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        DateInput::Range(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    pub fn days(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        DateInput::Multiple(
            dates
                .into_iter()
                .map(|d| d.and_time(NaiveTime::MIN))
                .collect(),
        )
    }
}

/// What a date selection produced: the picked dates, the text shown to the
/// user, and the value stored in the form
#[derive(Debug, Clone, PartialEq)]
pub struct DateEmission {
    pub dates: Vec<NaiveDateTime>,
    pub formatted: String,
    pub value: Value,
}

/// Which dates cannot be picked
#[derive(Debug, Clone, Default)]
pub struct DatePolicy {
    pub disable_today: bool,
    pub disable_past: bool,
    pub disable_future: bool,
    /// Sunday = 0
    pub disabled_weekdays: Vec<u32>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl DatePolicy {
    pub fn is_disabled(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        predicate: Option<&DatePredicate>,
    ) -> bool {
        (self.disable_today && date == today)
            || (self.disable_past && date < today)
            || (self.disable_future && date > today)
            || self
                .disabled_weekdays
                .contains(&date.weekday().num_days_from_sunday())
            || self.min_date.is_some_and(|min| date < min)
            || self.max_date.is_some_and(|max| date > max)
            || predicate.is_some_and(|p| p(date))
    }
}

#[derive(Debug, Clone)]
pub struct DateControl {
    pub mode: DateMode,
    pub data_type: DateDataType,
    pub show_time: bool,
    /// chrono format string
    pub format: String,
    pub policy: DatePolicy,
}

impl DateControl {
    pub fn from_config(config: Option<&DateConfig>, default_format: &str) -> Self {
        let default_config = DateConfig::default();
        let config = config.unwrap_or(&default_config);
        let pattern = config.date_format.as_deref().unwrap_or(default_format);

        Self {
            mode: config.mode,
            data_type: config.data_type,
            show_time: config.show_time,
            format: date_fns_to_chrono(pattern),
            policy: DatePolicy {
                disable_today: config.disable_today,
                disable_past: config.disable_past_dates,
                disable_future: config.disable_future_dates,
                disabled_weekdays: config.disabled_days.clone(),
                min_date: parse_bound("minDate", config.min_date.as_deref()),
                max_date: parse_bound("maxDate", config.max_date.as_deref()),
            },
        }
    }

    pub fn format_date(&self, date: NaiveDateTime) -> String {
        date.format(&self.format).to_string()
    }

    fn iso(&self, date: NaiveDateTime) -> String {
        if self.show_time {
            date.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    fn stored(&self, date: NaiveDateTime) -> Value {
        match self.data_type {
            DateDataType::String => Value::String(self.format_date(date)),
            DateDataType::Date => Value::String(self.iso(date)),
        }
    }

    /// Parse typed text in the display format
    pub fn parse(&self, field: &str, text: &str) -> Result<NaiveDateTime, BindError> {
        let text = text.trim();
        NaiveDateTime::parse_from_str(text, &self.format)
            .or_else(|_| {
                NaiveDate::parse_from_str(text, &self.format).map(|d| d.and_time(NaiveTime::MIN))
            })
            .map_err(|_| BindError::InvalidDate {
                field: field.to_string(),
                input: text.to_string(),
            })
    }

    /// Apply a selection, refusing disabled dates and inputs that do not fit the mode
    pub fn select(
        &self,
        field: &str,
        input: DateInput,
        today: NaiveDate,
        predicate: Option<&DatePredicate>,
    ) -> Result<DateEmission, BindError> {
        let input = match input {
            DateInput::Text(text) => DateInput::Single(self.parse(field, &text)?),
            other => other,
        };

        let dates = match (self.mode, input) {
            (DateMode::Single, DateInput::Single(date)) => vec![date],
            (DateMode::Range, DateInput::Range(start, end)) => {
                if end < start {
                    vec![end, start]
                } else {
                    vec![start, end]
                }
            }
            (DateMode::Multiple, DateInput::Multiple(mut dates)) => {
                dates.sort();
                dates.dedup();
                dates
            }
            (DateMode::Multiple, DateInput::Single(date)) => vec![date],
            (mode, _) => {
                return Err(BindError::InputMismatch {
                    field: field.to_string(),
                    expected: match mode {
                        DateMode::Single => "a single date",
                        DateMode::Range => "a date range",
                        DateMode::Multiple => "a list of dates",
                    },
                })
            }
        };

        if let Some(disabled) = dates
            .iter()
            .find(|d| self.policy.is_disabled(d.date(), today, predicate))
        {
            return Err(BindError::DateDisabled {
                field: field.to_string(),
                date: disabled.date().format("%Y-%m-%d").to_string(),
            });
        }

        let formatted = dates
            .iter()
            .map(|d| self.format_date(*d))
            .collect::<Vec<_>>();
        let (formatted, value) = match self.mode {
            DateMode::Single => (formatted.join(""), self.stored(dates[0])),
            DateMode::Range => (
                formatted.join(" - "),
                Value::Array(dates.iter().map(|d| self.stored(*d)).collect()),
            ),
            DateMode::Multiple => (
                formatted.join(", "),
                Value::Array(dates.iter().map(|d| self.stored(*d)).collect()),
            ),
        };

        Ok(DateEmission {
            dates,
            formatted,
            value,
        })
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    match NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(bound = name, value = raw, error = %e, "ignoring unparseable date bound");
            None
        }
    }
}

/// Translate a date-fns pattern (`dd/MM/yyyy HH:mm`) to chrono's strftime syntax
pub fn date_fns_to_chrono(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // 'quoted literal', '' is an escaped quote
        if c == '\'' {
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }
        let token: String = std::iter::repeat(c).take(run).collect();
        let mapped = match token.as_str() {
            "yyyy" => "%Y",
            "yy" => "%y",
            "MMMM" => "%B",
            "MMM" => "%b",
            "MM" => "%m",
            "M" => "%-m",
            "dd" => "%d",
            "d" => "%-d",
            "EEEE" => "%A",
            "EEE" | "E" => "%a",
            "HH" => "%H",
            "H" => "%-H",
            "hh" => "%I",
            "h" => "%-I",
            "mm" => "%M",
            "m" => "%-M",
            "ss" => "%S",
            "s" => "%-S",
            "a" | "aa" => "%p",
            _ => {
                token.chars().for_each(|ch| push_literal(&mut out, ch));
                i += run;
                continue;
            }
        };
        out.push_str(mapped);
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn control(config: DateConfig) -> DateControl {
        DateControl::from_config(Some(&config), "yyyy-MM-dd")
    }

    #[test]
    fn test_format_translation() {
        assert_eq!(date_fns_to_chrono("yyyy-MM-dd"), "%Y-%m-%d");
        assert_eq!(date_fns_to_chrono("dd/MM/yyyy HH:mm"), "%d/%m/%Y %H:%M");
        assert_eq!(date_fns_to_chrono("d MMM yyyy"), "%-d %b %Y");
        assert_eq!(date_fns_to_chrono("'on' EEEE"), "on %A");
        assert_eq!(date_fns_to_chrono("100%"), "100%%");
    }

    #[test]
    fn test_single_selection_emits_formatted_and_raw() {
        let ctl = control(DateConfig {
            date_format: Some("dd/MM/yyyy".into()),
            ..Default::default()
        });
        let out = ctl
            .select("dob", DateInput::day(d(2024, 3, 9)), d(2024, 6, 1), None)
            .unwrap();
        assert_eq!(out.formatted, "09/03/2024");
        assert_eq!(out.value, json!("09/03/2024"));
        assert_eq!(out.dates[0].date(), d(2024, 3, 9));
    }

    #[test]
    fn test_date_data_type_stores_iso() {
        let ctl = control(DateConfig {
            date_format: Some("dd/MM/yyyy".into()),
            data_type: DateDataType::Date,
            ..Default::default()
        });
        let out = ctl
            .select("dob", DateInput::day(d(2024, 3, 9)), d(2024, 6, 1), None)
            .unwrap();
        assert_eq!(out.value, json!("2024-03-09"));
        assert_eq!(out.formatted, "09/03/2024");
    }

    #[test]
    fn test_policy_flags() {
        let today = d(2024, 6, 12); // a Wednesday
        let ctl = control(DateConfig {
            disable_past_dates: true,
            disable_today: true,
            disabled_days: vec![0, 6],
            ..Default::default()
        });
        let refuse = |date| ctl.select("x", DateInput::day(date), today, None);
        assert!(matches!(refuse(d(2024, 6, 11)), Err(BindError::DateDisabled { .. })));
        assert!(matches!(refuse(today), Err(BindError::DateDisabled { .. })));
        assert!(matches!(refuse(d(2024, 6, 15)), Err(BindError::DateDisabled { .. })));
        assert!(refuse(d(2024, 6, 13)).is_ok());
    }

    #[test]
    fn test_predicate_hook_and_bounds() {
        let today = d(2024, 1, 1);
        let ctl = control(DateConfig {
            max_date: Some("2024-12-31T00:00:00Z".into()),
            ..Default::default()
        });
        let no_firsts: DatePredicate = Arc::new(|date: NaiveDate| date.day() == 1);
        assert!(ctl
            .select("x", DateInput::day(d(2024, 2, 1)), today, Some(&no_firsts))
            .is_err());
        assert!(ctl
            .select("x", DateInput::day(d(2024, 2, 2)), today, Some(&no_firsts))
            .is_ok());
        assert!(ctl
            .select("x", DateInput::day(d(2025, 1, 2)), today, None)
            .is_err());
    }

    #[test]
    fn test_range_mode_orders_endpoints() {
        let ctl = control(DateConfig {
            mode: DateMode::Range,
            ..Default::default()
        });
        let out = ctl
            .select(
                "stay",
                DateInput::range(d(2024, 5, 10), d(2024, 5, 3)),
                d(2024, 1, 1),
                None,
            )
            .unwrap();
        assert_eq!(out.value, json!(["2024-05-03", "2024-05-10"]));
        assert_eq!(out.formatted, "2024-05-03 - 2024-05-10");

        let mismatch = ctl.select("stay", DateInput::day(d(2024, 5, 3)), d(2024, 1, 1), None);
        assert!(matches!(mismatch, Err(BindError::InputMismatch { .. })));
    }

    #[test]
    fn test_multiple_mode_dedups() {
        let ctl = control(DateConfig {
            mode: DateMode::Multiple,
            ..Default::default()
        });
        let out = ctl
            .select(
                "days",
                DateInput::days([d(2024, 5, 3), d(2024, 5, 1), d(2024, 5, 3)]),
                d(2024, 1, 1),
                None,
            )
            .unwrap();
        assert_eq!(out.value, json!(["2024-05-01", "2024-05-03"]));
    }

    #[test]
    fn test_typed_text() {
        let ctl = control(DateConfig {
            date_format: Some("dd.MM.yyyy".into()),
            ..Default::default()
        });
        let out = ctl
            .select("x", DateInput::Text("24.12.2024".into()), d(2024, 1, 1), None)
            .unwrap();
        assert_eq!(out.value, json!("24.12.2024"));
        assert!(matches!(
            ctl.select("x", DateInput::Text("tomorrow".into()), d(2024, 1, 1), None),
            Err(BindError::InvalidDate { .. })
        ));
    }
}
