//! Destinations that read arbitrary values themselves.

use crate::conversion;
use crate::normalize::indirect;
use crate::reflect::{Reflect, TypeInfo};
use crate::value::Scalar;
use std::any::Any;
use thiserror::Error;

/// A destination that knows how to take in a value of any type.
///
/// Tried by the copy engine when a value cannot be assigned directly. An
/// error leaves the field unset; it is not reported to the caller.
pub trait Scan {
  fn scan(&mut self, value: &dyn Reflect) -> Result<(), ScanError>;
}

#[derive(Debug, Clone, Error)]
#[error("cannot scan `{from}` into `{into}`")]
pub struct ScanError {
  from: &'static str,
  into: &'static str,
}

impl ScanError {
  pub fn new(from: &dyn Reflect, into: &'static str) -> Self {
    Self {
      from: from.reflect_type_info().type_name(),
      into,
    }
  }
}

/// A scalar that may be missing, filled in by scanning.
///
/// Scanning an absent value (`None`) makes it invalid. Scanning anything
/// that converts directly into `T` makes it valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nullable<T> {
  pub value: T,
  pub valid: bool,
}

impl<T> Nullable<T> {
  pub fn new(value: T) -> Self {
    Self { value, valid: true }
  }

  pub fn get(&self) -> Option<&T> {
    if self.valid {
      Some(&self.value)
    } else {
      None
    }
  }
}

impl<T> Scan for Nullable<T>
where
  T: Reflect + Clone + Default,
{
  fn scan(&mut self, value: &dyn Reflect) -> Result<(), ScanError> {
    let value = match indirect(value) {
      Some(value) => value,
      None => {
        *self = Self::default();
        return Ok(());
      }
    };

    if let Some(other) = value.downcast_ref::<Self>() {
      *self = other.clone();
      return Ok(());
    }

    if self.value.try_set(value) {
      self.valid = true;
      return Ok(());
    }

    let converted = value
      .scalar()
      .and_then(|scalar| conversion::convert_direct(scalar, self.value.kind()));
    if let Some(scalar) = converted {
      if self.value.set_scalar(scalar) {
        self.valid = true;
        return Ok(());
      }
    }
    Err(ScanError::new(value, std::any::type_name::<Self>()))
  }
}

impl<T> Reflect for Nullable<T>
where
  T: Reflect + Clone + Default,
{
  fn type_info() -> TypeInfo {
    TypeInfo::opaque::<Self>()
  }

  fn reflect_type_info(&self) -> TypeInfo {
    <Self as Reflect>::type_info()
  }

  fn as_any(&self) -> &dyn Any {
    self
  }

  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }

  fn as_reflect(&self) -> &dyn Reflect {
    self
  }

  fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
    self
  }

  fn try_set(&mut self, value: &dyn Reflect) -> bool {
    match value.downcast_ref::<Self>() {
      Some(value) => {
        *self = value.clone();
        true
      }
      None => false,
    }
  }

  fn scalar(&self) -> Option<Scalar> {
    self.get().and_then(|value| value.scalar())
  }

  fn as_scanner(&mut self) -> Option<&mut dyn Scan> {
    Some(self)
  }
}
