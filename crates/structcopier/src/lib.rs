//! # StructCopier
//!
//! Copies field values from one struct to another, even when field names,
//! types or nesting differ.
//!
//! Fields are matched by name. A field can point at a differently named
//! field on the other side with an alias tag, and types can register
//! accessor methods that stand in for fields. Values that do not assign
//! directly go through a small conversion table: numbers to numbers, numbers
//! and text, timestamps and numbers (Unix seconds), timestamps and text
//! (`YYYY-MM-DD hh:mm:ss`). A caller supplied rule can take over any tagged
//! field.
//!
//! Copying is best effort: fields that cannot be matched or converted are
//! skipped. The only error is a destination that cannot be written through.
//!
//! # Example
//! ```
//!   use structcopier::{Options, Reflect};
//!
//!   #[derive(Clone, Default, Reflect)]
//!   struct UserRow {
//!     id: i32,
//!     name: String,
//!     #[copier(alias = "role")]
//!     role_id: i64,
//!   }
//!
//!   #[derive(Clone, Default, Reflect)]
//!   struct User {
//!     id: i64,
//!     name: String,
//!     role: String,
//!   }
//!
//!   let row = UserRow { id: 7, name: "clearlove".into(), role_id: 4396 };
//!   let mut user = User::default();
//!   structcopier::copy(&mut user, &row).unwrap();
//!   assert_eq!(user.id, 7);
//!   assert_eq!(user.role, "4396");
//!
//!   let options = Options::new().rule(|dst, src, field| {
//!     match (field, dst.downcast_mut::<String>(), src.downcast_ref::<i64>()) {
//!       ("role_id", Some(dst), Some(4396)) => {
//!         *dst = "jg".into();
//!         true
//!       }
//!       _ => false,
//!     }
//!   });
//!   structcopier::copy_with(&mut user, &row, &options).unwrap();
//!   assert_eq!(user.role, "jg");
//! ```

extern crate self as structcopier;

mod conversion;
mod engine;
mod error;
mod impls;
mod normalize;
mod options;
mod reflect;
mod scan;
mod value;

pub use conversion::{Conversion, TIMESTAMP_LAYOUT};
pub use engine::{copy, copy_with};
pub use error::{Error, Result};
pub use normalize::deep_fields;
pub use options::{Options, Rule, DEFAULT_TAG_KEY};
pub use reflect::{FieldDescriptor, Pointer, Reflect, Seq, Struct, TypeInfo};
pub use scan::{Nullable, Scan, ScanError};
pub use structcopier_codegen::Reflect;
pub use value::{Kind, Scalar};

#[doc(hidden)]
pub mod __private {
  use crate::normalize::{deep_fields, indirect, indirect_alloc, indirect_mut};
  use crate::reflect::{Reflect, Struct};

  pub use std::any::Any;

  pub fn try_set_clone<T>(this: &mut T, value: &dyn Reflect) -> bool
  where
    T: Reflect + Clone,
  {
    match value.downcast_ref::<T>() {
      Some(value) => {
        *this = value.clone();
        true
      }
      None => false,
    }
  }

  pub fn invoke_setter<S, T, R>(this: &mut S, method: fn(&mut S, T) -> R, value: &dyn Reflect) -> bool
  where
    T: Reflect + Clone,
  {
    match value.downcast_ref::<T>() {
      Some(value) => {
        method(this, value.clone());
        true
      }
      None => false,
    }
  }

  pub fn invoke_getter<S, T>(this: &S, method: fn(&S) -> T) -> Option<Box<dyn Reflect>>
  where
    T: Reflect,
  {
    Some(Box::new(method(this)))
  }

  // Flattened fields may sit behind `Option` or `Box`. An empty `Option` is
  // only allocated when the requested field is declared underneath it.

  pub fn flattened_field<'a, T: Reflect>(value: &'a T, name: &str) -> Option<&'a dyn Reflect> {
    indirect(value)?.as_struct()?.field(name)
  }

  pub fn flattened_field_mut<'a, T: Reflect>(value: &'a mut T, name: &str) -> Option<&'a mut dyn Reflect> {
    let declared = deep_fields(T::type_info()).iter().any(|field| field.name() == name);
    let value = if declared {
      indirect_alloc(value)?
    } else {
      indirect_mut(value)?
    };
    value.as_struct_mut()?.field_mut(name)
  }

  pub fn flattened_setter<T: Reflect>(value: &mut T, name: &str, arg: &dyn Reflect) -> bool {
    indirect_mut(value)
      .and_then(|value| value.as_struct_mut())
      .map_or(false, |value| value.call_setter(name, arg))
  }

  pub fn flattened_getter<T: Reflect>(value: &T, name: &str) -> Option<Box<dyn Reflect>> {
    indirect(value)?.as_struct()?.call_getter(name)
  }
}
