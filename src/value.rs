//! Typed cell values.
//!
//! Columns declare a [`ValueType`]; cell text is parsed against it into a
//! cached [`ParsedValue`]. The same parser backs both model-side validation
//! and the simple-mode cell editors, so an editor can never commit a value
//! the model would judge differently.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The value type a column declares for its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Boolean,
    Date,
    DateTime,
    Duration,
    Number,
    String,
    Time,
}

impl ValueType {
    /// Canonical lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::DateTime => "dateTime",
            ValueType::Duration => "duration",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Time => "time",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw cell text that parsed successfully under its column's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParsedValue {
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Duration(IsoDuration),
    Number(f64),
    String(String),
    Time(NaiveTime),
}

/// An ISO-8601 duration kept in component form.
///
/// Calendar-aware normalization (e.g. `P1M` vs. `P30D`) is out of scope;
/// components are preserved exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IsoDuration {
    pub negative: bool,
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl std::fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0.0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0.0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.years == 0 && self.months == 0 && self.days == 0 {
            f.write_str("T0S")?;
        }
        Ok(())
    }
}

/// Why a raw cell text failed to parse under its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected true or false, got {0:?}")]
    InvalidBoolean(String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid date-time {0:?}, expected YYYY-MM-DDThh:mm:ss")]
    InvalidDateTime(String),
    #[error("invalid duration {0:?}, expected an ISO-8601 duration such as P1DT2H")]
    InvalidDuration(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("invalid time {0:?}, expected hh:mm:ss")]
    InvalidTime(String),
}

/// Parse raw cell text under the given declared type.
///
/// Blank text is the absence of a value and parses to `None` for every
/// type. Surrounding whitespace is ignored for parsing only; callers keep
/// the raw text exactly as entered.
pub fn parse_value(value_type: ValueType, raw: &str) -> Result<Option<ParsedValue>, ValueError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let parsed = match value_type {
        ValueType::Boolean => match text {
            "true" => ParsedValue::Boolean(true),
            "false" => ParsedValue::Boolean(false),
            _ => return Err(ValueError::InvalidBoolean(text.to_string())),
        },
        ValueType::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(ParsedValue::Date)
            .map_err(|_| ValueError::InvalidDate(text.to_string()))?,
        ValueType::DateTime => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
            .map(ParsedValue::DateTime)
            .map_err(|_| ValueError::InvalidDateTime(text.to_string()))?,
        ValueType::Duration => ParsedValue::Duration(parse_duration(text)?),
        ValueType::Number => {
            let value: f64 = text
                .parse()
                .map_err(|_| ValueError::InvalidNumber(text.to_string()))?;
            if !value.is_finite() {
                return Err(ValueError::InvalidNumber(text.to_string()));
            }
            ParsedValue::Number(value)
        }
        ValueType::String => ParsedValue::String(text.to_string()),
        ValueType::Time => NaiveTime::parse_from_str(text, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
            .map(ParsedValue::Time)
            .map_err(|_| ValueError::InvalidTime(text.to_string()))?,
    };

    Ok(Some(parsed))
}

/// Parse an ISO-8601 duration (`-?PnYnMnDTnHnMnS`, each component optional
/// but at least one required; only seconds may be fractional).
fn parse_duration(text: &str) -> Result<IsoDuration, ValueError> {
    let err = || ValueError::InvalidDuration(text.to_string());

    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let rest = rest.strip_prefix('P').ok_or_else(err)?;
    if rest.is_empty() {
        return Err(err());
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    if matches!(time_part, Some("")) {
        return Err(err());
    }

    let date = parse_components(date_part, &['Y', 'M', 'D'], false).ok_or_else(err)?;
    let time = match time_part {
        Some(part) => parse_components(part, &['H', 'M', 'S'], true).ok_or_else(err)?,
        None => vec![None; 3],
    };

    let whole = |value: Option<f64>| -> Result<u32, ValueError> {
        match value {
            None => Ok(0),
            Some(v) if v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
            Some(_) => Err(err()),
        }
    };

    Ok(IsoDuration {
        negative,
        years: whole(date[0])?,
        months: whole(date[1])?,
        days: whole(date[2])?,
        hours: whole(time[0])?,
        minutes: whole(time[1])?,
        seconds: time[2].unwrap_or(0.0),
    })
}

/// Parse a run of `<number><designator>` components. Designators must
/// appear in the given order, each at most once. Returns `None` on any
/// syntax violation.
fn parse_components(
    mut input: &str,
    designators: &[char],
    fraction_on_last: bool,
) -> Option<Vec<Option<f64>>> {
    let mut out = vec![None; designators.len()];
    let mut next_slot = 0;

    while !input.is_empty() {
        let digits_end = input
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(input.len());
        if digits_end == 0 || digits_end == input.len() {
            return None;
        }

        let (number, rest) = input.split_at(digits_end);
        let designator = rest.chars().next()?;
        let slot = designators[next_slot..]
            .iter()
            .position(|&d| d == designator)?
            + next_slot;

        if number.contains('.') && !(fraction_on_last && slot == designators.len() - 1) {
            return None;
        }

        out[slot] = Some(number.parse().ok()?);
        next_slot = slot + 1;
        input = &rest[designator.len_utf8()..];
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_is_absent() {
        for value_type in [
            ValueType::Boolean,
            ValueType::Date,
            ValueType::Number,
            ValueType::Duration,
        ] {
            assert_eq!(parse_value(value_type, "").unwrap(), None);
            assert_eq!(parse_value(value_type, "   ").unwrap(), None);
        }
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(
            parse_value(ValueType::Boolean, "true").unwrap(),
            Some(ParsedValue::Boolean(true))
        );
        assert_eq!(
            parse_value(ValueType::Boolean, "false").unwrap(),
            Some(ParsedValue::Boolean(false))
        );
        assert!(parse_value(ValueType::Boolean, "True").is_err());
        assert!(parse_value(ValueType::Boolean, "1").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_value(ValueType::Date, "2024-02-29").unwrap(),
            Some(ParsedValue::Date(
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
        assert!(parse_value(ValueType::Date, "2023-02-29").is_err());
        assert!(parse_value(ValueType::Date, "02/29/2024").is_err());
        assert!(parse_value(ValueType::Date, "not a date").is_err());
    }

    #[test]
    fn test_parse_time_with_and_without_seconds() {
        assert_eq!(
            parse_value(ValueType::Time, "09:30:15").unwrap(),
            Some(ParsedValue::Time(
                NaiveTime::from_hms_opt(9, 30, 15).unwrap()
            ))
        );
        assert_eq!(
            parse_value(ValueType::Time, "09:30").unwrap(),
            Some(ParsedValue::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()))
        );
        assert!(parse_value(ValueType::Time, "25:00:00").is_err());
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(
            parse_value(ValueType::DateTime, "2024-01-15T08:00:00").unwrap(),
            Some(ParsedValue::DateTime(
                NaiveDate::from_ymd_opt(2024, 1, 15)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap()
            ))
        );
        assert!(parse_value(ValueType::DateTime, "2024-01-15 08:00:00").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(
            parse_value(ValueType::Number, "-12.5").unwrap(),
            Some(ParsedValue::Number(-12.5))
        );
        assert!(parse_value(ValueType::Number, "twelve").is_err());
        assert!(parse_value(ValueType::Number, "inf").is_err());
        assert!(parse_value(ValueType::Number, "NaN").is_err());
    }

    #[test]
    fn test_parse_string_passthrough() {
        assert_eq!(
            parse_value(ValueType::String, "hello world").unwrap(),
            Some(ParsedValue::String("hello world".to_string()))
        );
    }

    #[test]
    fn test_parse_duration_date_and_time() {
        let parsed = parse_value(ValueType::Duration, "P1DT2H30M").unwrap();
        assert_eq!(
            parsed,
            Some(ParsedValue::Duration(IsoDuration {
                days: 1,
                hours: 2,
                minutes: 30,
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_parse_duration_year_month() {
        let parsed = parse_value(ValueType::Duration, "P2Y6M").unwrap();
        assert_eq!(
            parsed,
            Some(ParsedValue::Duration(IsoDuration {
                years: 2,
                months: 6,
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_parse_duration_negative_and_fractional_seconds() {
        let parsed = parse_value(ValueType::Duration, "-PT1.5S").unwrap();
        assert_eq!(
            parsed,
            Some(ParsedValue::Duration(IsoDuration {
                negative: true,
                seconds: 1.5,
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        for bad in ["P", "PT", "1D", "P1H", "PT1D", "P1.5D", "PD", "P1D2H", "P1M1Y"] {
            assert!(
                parse_value(ValueType::Duration, bad).is_err(),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_duration_display_round_trip() {
        for text in ["P1DT2H30M", "P2Y6M", "-PT1.5S", "PT0S"] {
            let Some(ParsedValue::Duration(duration)) =
                parse_value(ValueType::Duration, text).unwrap()
            else {
                panic!("expected duration");
            };
            assert_eq!(duration.to_string(), text);
        }
    }
}
