//! Pure cell decoding: maps a `RowType` + raw wire string to a [`CellValue`].
//!
//! Nothing here touches the network or an async runtime — it's the same
//! kind of pure parsing helper as a calendar-title parser, just for the
//! Service's cell encoding instead of event titles.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{CellValue, RowType, TypeTag};

/// Decode a single raw cell string according to its declared type.
///
/// `raw == None` (cell absent or JSON `null`) always decodes to
/// [`CellValue::Null`], regardless of the column's declared type. A raw
/// value that fails to parse for its declared type falls back to
/// [`CellValue::Text`] with the original string, rather than panicking or
/// failing the whole row — the Service is authoritative on cell shape, not
/// this client.
pub fn decode_cell(row_type: &RowType, raw: Option<&str>) -> CellValue {
    let Some(raw) = raw else {
        return CellValue::Null;
    };

    match &row_type.type_tag {
        TypeTag::Boolean => CellValue::Boolean(raw == "true"),
        TypeTag::Date => decode_date(raw),
        TypeTag::Fixed if row_type.scale == 0 => decode_fixed_integer(raw),
        TypeTag::Fixed => decode_fixed_decimal(raw, row_type.scale),
        TypeTag::Float => raw.parse::<f64>().map(CellValue::Float).unwrap_or_else(|_| passthrough(raw)),
        TypeTag::Time
        | TypeTag::DateTime
        | TypeTag::Timestamp
        | TypeTag::TimestampLtz
        | TypeTag::TimestampNtz => {
            decode_epoch_seconds(raw).map(CellValue::Instant).unwrap_or_else(|| passthrough(raw))
        }
        TypeTag::TimestampTz => decode_timestamp_tz(raw).unwrap_or_else(|| passthrough(raw)),
        TypeTag::Other(_) => passthrough(raw),
    }
}

fn passthrough(raw: &str) -> CellValue {
    CellValue::Text(raw.to_string())
}

fn decode_date(raw: &str) -> CellValue {
    match raw.parse::<i64>() {
        Ok(days) => epoch_date()
            .checked_add_signed(chrono::Duration::days(days))
            .map(CellValue::Date)
            .unwrap_or_else(|| passthrough(raw)),
        Err(_) => passthrough(raw),
    }
}

fn epoch_date() -> NaiveDate {
    // unwrap is safe: 1970-01-01 is always a valid calendar date.
    #[allow(clippy::unwrap_used)]
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

fn decode_fixed_integer(raw: &str) -> CellValue {
    BigInt::from_str(raw).map(CellValue::Integer).unwrap_or_else(|_| passthrough(raw))
}

fn decode_fixed_decimal(raw: &str, scale: i32) -> CellValue {
    let Ok(value) = Decimal::from_str(raw) else {
        return passthrough(raw);
    };
    let scale = scale.max(0) as u32;
    CellValue::Decimal(value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven))
}

/// Parse `"<seconds>[.<fractional>]"` as an instant in UTC.
fn decode_epoch_seconds(raw: &str) -> Option<DateTime<Utc>> {
    let (secs_str, frac_str) = match raw.split_once('.') {
        Some((s, f)) => (s, f),
        None => (raw, ""),
    };
    let secs: i64 = secs_str.parse().ok()?;
    let nanos: u32 = pad_fractional_nanos(frac_str)?;
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

fn pad_fractional_nanos(frac_str: &str) -> Option<u32> {
    if frac_str.is_empty() {
        return Some(0);
    }
    let mut digits: String = frac_str.chars().take(9).collect();
    while digits.len() < 9 {
        digits.push('0');
    }
    digits.parse().ok()
}

/// Parse `"<seconds> <offset_minutes>"`: the instant is
/// `seconds − offset_minutes*60`. This inverts the usual "add the offset to
/// reach UTC" convention; this is preserved as-is, a possible latent bug in the
/// source this behavior was distilled from, but pins it as the contract.
fn decode_timestamp_tz(raw: &str) -> Option<DateTime<Utc>> {
    let (secs_part, offset_part) = raw.split_once(' ')?;
    let instant = decode_epoch_seconds(secs_part)?;
    let offset_minutes: i64 = offset_part.parse().ok()?;
    instant.checked_sub_signed(chrono::Duration::seconds(offset_minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_type(tag: &str, scale: Option<i32>) -> RowType {
        RowType::new("c", tag, scale)
    }

    #[test]
    fn boolean_is_a_strict_literal_match() {
        assert_eq!(decode_cell(&row_type("boolean", None), Some("true")), CellValue::Boolean(true));
        assert_eq!(decode_cell(&row_type("boolean", None), Some("false")), CellValue::Boolean(false));
        assert_eq!(decode_cell(&row_type("boolean", None), Some("TRUE")), CellValue::Boolean(false));
    }

    #[test]
    fn null_cell_decodes_regardless_of_type() {
        assert_eq!(decode_cell(&row_type("boolean", None), None), CellValue::Null);
        assert_eq!(decode_cell(&row_type("fixed", Some(2)), None), CellValue::Null);
    }

    #[test]
    fn date_epoch_boundaries() {
        assert_eq!(
            decode_cell(&row_type("date", None), Some("0")),
            CellValue::Date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
        );
        assert_eq!(
            decode_cell(&row_type("date", None), Some("-1")),
            CellValue::Date(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap())
        );
        assert_eq!(
            decode_cell(&row_type("date", None), Some("19358")),
            CellValue::Date(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap())
        );
    }

    #[test]
    fn fixed_scale_zero_parses_arbitrary_precision_integer() {
        let value = decode_cell(&row_type("fixed", Some(0)), Some("12345678901234567890"));
        assert_eq!(value, CellValue::Integer(BigInt::from_str("12345678901234567890").unwrap()));
    }

    #[test]
    fn fixed_scale_two_rounds_half_to_even() {
        let value = decode_cell(&row_type("fixed", Some(2)), Some("1.005"));
        assert_eq!(value, CellValue::Decimal(Decimal::from_str("1.00").unwrap()));
    }

    #[test]
    fn timestamp_tz_subtracts_the_offset_from_seconds() {
        let value = decode_cell(&row_type("timestamp_tz", None), Some("1700000000.000000000 -300"));
        let expected = DateTime::<Utc>::from_timestamp(1_700_018_000, 0).unwrap();
        assert_eq!(value, CellValue::Instant(expected));
    }

    #[test]
    fn unknown_type_tag_passes_through_verbatim() {
        let value = decode_cell(&row_type("variant", None), Some(r#"{"a":1}"#));
        assert_eq!(value, CellValue::Text(r#"{"a":1}"#.to_string()));
    }
}
