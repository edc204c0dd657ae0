use crate::reflect::{Pointer, Reflect, Seq, TypeInfo};
use crate::value::{Kind, Scalar};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::any::Any;

macro_rules! reflect_base {
  () => {
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
  };
}

macro_rules! impl_primitive {
  ($kind:ident, $variant:ident as $wide:ty: $($ty:ty),*) => {
    $(
      impl Reflect for $ty {
        fn type_info() -> TypeInfo {
          TypeInfo::scalar::<Self>(Kind::$kind)
        }

        reflect_base!();

        fn scalar(&self) -> Option<Scalar> {
          Some(Scalar::$variant(*self as $wide))
        }

        fn set_scalar(&mut self, value: Scalar) -> bool {
          match value {
            Scalar::$variant(v) => {
              *self = v as $ty;
              true
            }
            _ => false,
          }
        }
      }
    )*
  };
}

impl_primitive!(Bool, Bool as bool: bool);
impl_primitive!(Int, Int as i64: i8, i16, i32, i64, isize);
impl_primitive!(Uint, Uint as u64: u8, u16, u32, u64, usize);
impl_primitive!(Float, Float as f64: f32, f64);

impl Reflect for String {
  fn type_info() -> TypeInfo {
    TypeInfo::scalar::<Self>(Kind::Text)
  }

  reflect_base!();

  fn scalar(&self) -> Option<Scalar> {
    Some(Scalar::Text(self.clone()))
  }

  fn set_scalar(&mut self, value: Scalar) -> bool {
    match value {
      Scalar::Text(v) => {
        *self = v;
        true
      }
      _ => false,
    }
  }
}

impl Reflect for NaiveDateTime {
  fn type_info() -> TypeInfo {
    TypeInfo::scalar::<Self>(Kind::Timestamp)
  }

  reflect_base!();

  fn scalar(&self) -> Option<Scalar> {
    Some(Scalar::Timestamp(*self))
  }

  fn set_scalar(&mut self, value: Scalar) -> bool {
    match value {
      Scalar::Timestamp(v) => {
        *self = v;
        true
      }
      _ => false,
    }
  }
}

impl Reflect for DateTime<Utc> {
  fn type_info() -> TypeInfo {
    TypeInfo::scalar::<Self>(Kind::Timestamp)
  }

  reflect_base!();

  fn scalar(&self) -> Option<Scalar> {
    Some(Scalar::Timestamp(self.naive_utc()))
  }

  fn set_scalar(&mut self, value: Scalar) -> bool {
    match value {
      Scalar::Timestamp(v) => {
        *self = v.and_utc();
        true
      }
      _ => false,
    }
  }
}

impl<T> Reflect for Option<T>
where
  T: Reflect + Clone + Default,
{
  fn type_info() -> TypeInfo {
    TypeInfo::pointer::<Self, T>()
  }

  reflect_base!();

  fn as_pointer(&self) -> Option<&dyn Pointer> {
    Some(self)
  }

  fn as_pointer_mut(&mut self) -> Option<&mut dyn Pointer> {
    Some(self)
  }
}

impl<T> Pointer for Option<T>
where
  T: Reflect + Clone + Default,
{
  fn pointee(&self) -> Option<&dyn Reflect> {
    self.as_ref().map(|v| v as &dyn Reflect)
  }

  fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
    self.as_mut().map(|v| v as &mut dyn Reflect)
  }

  fn alloc(&mut self) -> &mut dyn Reflect {
    self.get_or_insert_with(T::default)
  }

  fn clear(&mut self) -> bool {
    *self = None;
    true
  }
}

impl<T> Reflect for Box<T>
where
  T: Reflect + Clone + Default,
{
  fn type_info() -> TypeInfo {
    TypeInfo::pointer::<Self, T>()
  }

  reflect_base!();

  fn as_pointer(&self) -> Option<&dyn Pointer> {
    Some(self)
  }

  fn as_pointer_mut(&mut self) -> Option<&mut dyn Pointer> {
    Some(self)
  }
}

impl<T> Pointer for Box<T>
where
  T: Reflect + Clone + Default,
{
  fn pointee(&self) -> Option<&dyn Reflect> {
    Some(&**self as &dyn Reflect)
  }

  fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
    Some(&mut **self as &mut dyn Reflect)
  }

  fn alloc(&mut self) -> &mut dyn Reflect {
    &mut **self
  }

  fn clear(&mut self) -> bool {
    false
  }
}

impl<T> Reflect for Vec<T>
where
  T: Reflect + Clone + Default,
{
  fn type_info() -> TypeInfo {
    TypeInfo::seq::<Self, T>()
  }

  reflect_base!();

  fn as_seq(&self) -> Option<&dyn Seq> {
    Some(self)
  }

  fn as_seq_mut(&mut self) -> Option<&mut dyn Seq> {
    Some(self)
  }
}

impl<T> Seq for Vec<T>
where
  T: Reflect + Clone + Default,
{
  fn len(&self) -> usize {
    self.as_slice().len()
  }

  fn get(&self, index: usize) -> Option<&dyn Reflect> {
    self.as_slice().get(index).map(|v| v as &dyn Reflect)
  }

  fn push_default(&mut self) -> &mut dyn Reflect {
    let index = self.as_slice().len();
    self.push(T::default());
    &mut self[index]
  }
}
