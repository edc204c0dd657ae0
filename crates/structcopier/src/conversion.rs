//! Built-in coercions between scalar kinds.
//!
//! Every supported pair of (source kind, destination kind) maps to exactly one
//! [`Conversion`]. Pairs missing from the table are not convertible and the
//! destination is left alone.

use crate::value::{Kind, Scalar};
use chrono::{DateTime, NaiveDateTime};

/// Layout used when timestamps are read from or written to text.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
  /// Same kind on both sides.
  Identity,
  /// Any numeric family into any numeric family.
  Numeric,
  /// Unix seconds into a timestamp.
  EpochToTimestamp,
  /// Text in [`TIMESTAMP_LAYOUT`] into a timestamp.
  ParseTimestamp,
  /// Timestamp into Unix seconds.
  TimestampToEpoch,
  /// Timestamp into text in [`TIMESTAMP_LAYOUT`].
  FormatTimestamp,
  /// Numeric into decimal text.
  FormatInteger,
  /// Base-10 text into a number. Malformed text reads as zero.
  ParseInteger,
}

impl Conversion {
  pub fn lookup(from: Kind, to: Kind) -> Option<Self> {
    use Kind::*;

    let conversion = match (from, to) {
      (Bool, Bool) | (Text, Text) | (Timestamp, Timestamp) => Conversion::Identity,
      (f, t) if f.is_numeric() && t.is_numeric() => Conversion::Numeric,
      (f, Timestamp) if f.is_numeric() => Conversion::EpochToTimestamp,
      (Text, Timestamp) => Conversion::ParseTimestamp,
      (Timestamp, t) if t.is_numeric() => Conversion::TimestampToEpoch,
      (Timestamp, Text) => Conversion::FormatTimestamp,
      (f, Text) if f.is_numeric() => Conversion::FormatInteger,
      (Text, t) if t.is_numeric() => Conversion::ParseInteger,
      _ => return None,
    };
    Some(conversion)
  }

  /// Whether the conversion is a plain type conversion rather than a
  /// reinterpretation of the value.
  pub fn is_direct(self) -> bool {
    matches!(self, Conversion::Identity | Conversion::Numeric)
  }

  /// Applies the conversion, producing a scalar of kind `to`.
  ///
  /// Returns `None` when the value does not fit the conversion, or when
  /// text does not parse as a timestamp.
  pub fn apply(self, value: Scalar, to: Kind) -> Option<Scalar> {
    match self {
      Conversion::Identity => Some(value),
      Conversion::Numeric => value.cast(to),
      Conversion::EpochToTimestamp => {
        let secs = value.as_i64()?;
        DateTime::from_timestamp(secs, 0).map(|t| Scalar::Timestamp(t.naive_utc()))
      }
      Conversion::ParseTimestamp => match value {
        Scalar::Text(ref text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_LAYOUT)
          .ok()
          .map(Scalar::Timestamp),
        _ => None,
      },
      Conversion::TimestampToEpoch => match value {
        Scalar::Timestamp(t) => Scalar::Int(t.and_utc().timestamp()).cast(to),
        _ => None,
      },
      Conversion::FormatTimestamp => match value {
        Scalar::Timestamp(t) => Some(Scalar::Text(t.format(TIMESTAMP_LAYOUT).to_string())),
        _ => None,
      },
      Conversion::FormatInteger => match value {
        Scalar::Uint(v) => Some(Scalar::Text(v.to_string())),
        other => other.as_i64().map(|v| Scalar::Text(v.to_string())),
      },
      Conversion::ParseInteger => match value {
        Scalar::Text(ref text) => Scalar::Int(text.parse::<i64>().unwrap_or(0)).cast(to),
        _ => None,
      },
    }
  }
}

/// Converts `value` into kind `to` when the table allows it.
pub fn convert(value: Scalar, to: Kind) -> Option<Scalar> {
  Conversion::lookup(value.kind(), to)?.apply(value, to)
}

/// Like [`convert`], limited to direct conversions.
pub fn convert_direct(value: Scalar, to: Kind) -> Option<Scalar> {
  let conversion = Conversion::lookup(value.kind(), to)?;
  if conversion.is_direct() {
    conversion.apply(value, to)
  } else {
    None
  }
}
