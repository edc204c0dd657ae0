use chrono::NaiveDateTime;

/// Shape of a type as seen by the copy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  Bool,
  /// Signed integers.
  Int,
  /// Unsigned integers.
  Uint,
  Float,
  Text,
  Timestamp,
  Struct,
  Seq,
  /// `Option<T>` and `Box<T>`.
  Pointer,
  /// Anything the engine can only move by same-type assignment.
  Opaque,
}

impl Kind {
  pub fn is_numeric(self) -> bool {
    matches!(self, Kind::Int | Kind::Uint | Kind::Float)
  }

  pub fn is_scalar(self) -> bool {
    matches!(self, Kind::Bool | Kind::Text | Kind::Timestamp) || self.is_numeric()
  }
}

/// An owned primitive value read out of (or written into) a scalar slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
  Bool(bool),
  Int(i64),
  Uint(u64),
  Float(f64),
  Text(String),
  /// Naive UTC.
  Timestamp(NaiveDateTime),
}

impl Scalar {
  pub fn kind(&self) -> Kind {
    match *self {
      Scalar::Bool(_) => Kind::Bool,
      Scalar::Int(_) => Kind::Int,
      Scalar::Uint(_) => Kind::Uint,
      Scalar::Float(_) => Kind::Float,
      Scalar::Text(_) => Kind::Text,
      Scalar::Timestamp(_) => Kind::Timestamp,
    }
  }

  /// Numeric value as `i64`, with `as` semantics for the other families.
  pub fn as_i64(&self) -> Option<i64> {
    match *self {
      Scalar::Int(v) => Some(v),
      Scalar::Uint(v) => Some(v as i64),
      Scalar::Float(v) => Some(v as i64),
      _ => None,
    }
  }

  /// Casts a numeric value into another numeric family.
  pub fn cast(&self, to: Kind) -> Option<Scalar> {
    let value = match (self, to) {
      (&Scalar::Int(v), Kind::Int) => Scalar::Int(v),
      (&Scalar::Int(v), Kind::Uint) => Scalar::Uint(v as u64),
      (&Scalar::Int(v), Kind::Float) => Scalar::Float(v as f64),
      (&Scalar::Uint(v), Kind::Int) => Scalar::Int(v as i64),
      (&Scalar::Uint(v), Kind::Uint) => Scalar::Uint(v),
      (&Scalar::Uint(v), Kind::Float) => Scalar::Float(v as f64),
      (&Scalar::Float(v), Kind::Int) => Scalar::Int(v as i64),
      (&Scalar::Float(v), Kind::Uint) => Scalar::Uint(v as u64),
      (&Scalar::Float(v), Kind::Float) => Scalar::Float(v),
      _ => return None,
    };
    Some(value)
  }
}
