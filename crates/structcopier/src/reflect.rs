//! Descriptor traits a type implements to take part in a copy.
//!
//! Structs get these from `#[derive(Reflect)]`. Primitives, `Option`, `Box`,
//! `Vec` and the chrono timestamps are covered by the crate.

use crate::scan::Scan;
use crate::value::{Kind, Scalar};
use std::any::Any;

/// A value the copy engine can read from and write into.
pub trait Reflect: Any {
  fn type_info() -> TypeInfo
  where
    Self: Sized;

  fn reflect_type_info(&self) -> TypeInfo;

  fn as_any(&self) -> &dyn Any;

  fn as_any_mut(&mut self) -> &mut dyn Any;

  fn as_reflect(&self) -> &dyn Reflect;

  fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

  /// Assigns a clone of `value` if it has exactly this type.
  fn try_set(&mut self, value: &dyn Reflect) -> bool;

  fn kind(&self) -> Kind {
    self.reflect_type_info().kind()
  }

  fn scalar(&self) -> Option<Scalar> {
    None
  }

  /// Stores a scalar of this type's own kind.
  fn set_scalar(&mut self, _value: Scalar) -> bool {
    false
  }

  fn as_struct(&self) -> Option<&dyn Struct> {
    None
  }

  fn as_struct_mut(&mut self) -> Option<&mut dyn Struct> {
    None
  }

  fn as_seq(&self) -> Option<&dyn Seq> {
    None
  }

  fn as_seq_mut(&mut self) -> Option<&mut dyn Seq> {
    None
  }

  fn as_pointer(&self) -> Option<&dyn Pointer> {
    None
  }

  fn as_pointer_mut(&mut self) -> Option<&mut dyn Pointer> {
    None
  }

  fn as_scanner(&mut self) -> Option<&mut dyn Scan> {
    None
  }
}

impl dyn Reflect {
  pub fn is<T: Reflect>(&self) -> bool {
    self.as_any().is::<T>()
  }

  pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
    self.as_any().downcast_ref()
  }

  pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
    self.as_any_mut().downcast_mut()
  }
}

/// A record with named fields.
pub trait Struct: Reflect {
  /// Declared fields, flattened ones included as a single entry.
  fn fields() -> Vec<FieldDescriptor>
  where
    Self: Sized;

  fn field(&self, name: &str) -> Option<&dyn Reflect>;

  /// `None` for unknown and read-only fields.
  fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

  /// Calls the one-argument method registered under `name`. Returns `false`
  /// when there is no such method or `value` has the wrong type.
  fn call_setter(&mut self, _name: &str, _value: &dyn Reflect) -> bool {
    false
  }

  /// Calls the zero-argument accessor registered under `name`.
  fn call_getter(&self, _name: &str) -> Option<Box<dyn Reflect>> {
    None
  }
}

pub trait Seq: Reflect {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn get(&self, index: usize) -> Option<&dyn Reflect>;

  /// Appends a zero element and returns it.
  fn push_default(&mut self) -> &mut dyn Reflect;
}

pub trait Pointer: Reflect {
  fn pointee(&self) -> Option<&dyn Reflect>;

  fn pointee_mut(&mut self) -> Option<&mut dyn Reflect>;

  /// Returns the pointee, allocating a zero value first if there is none.
  fn alloc(&mut self) -> &mut dyn Reflect;

  /// Drops the pointee. Returns `false` if the pointer cannot be empty.
  fn clear(&mut self) -> bool;
}

/// Static description of a type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
  type_name: &'static str,
  kind: Kind,
  elem: Option<fn() -> TypeInfo>,
  fields: fn() -> Vec<FieldDescriptor>,
}

impl TypeInfo {
  pub fn scalar<T: Reflect>(kind: Kind) -> Self {
    Self::new::<T>(kind)
  }

  pub fn opaque<T: Reflect>() -> Self {
    Self::new::<T>(Kind::Opaque)
  }

  pub fn structure<T: Struct>() -> Self {
    Self {
      fields: <T as Struct>::fields as fn() -> Vec<FieldDescriptor>,
      ..Self::new::<T>(Kind::Struct)
    }
  }

  pub fn pointer<T: Reflect, E: Reflect>() -> Self {
    Self {
      elem: Some(<E as Reflect>::type_info as fn() -> TypeInfo),
      ..Self::new::<T>(Kind::Pointer)
    }
  }

  pub fn seq<T: Reflect, E: Reflect>() -> Self {
    Self {
      elem: Some(<E as Reflect>::type_info as fn() -> TypeInfo),
      ..Self::new::<T>(Kind::Seq)
    }
  }

  fn new<T: Reflect>(kind: Kind) -> Self {
    Self {
      type_name: std::any::type_name::<T>(),
      kind,
      elem: None,
      fields: Vec::new,
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn kind(&self) -> Kind {
    self.kind
  }

  /// Element type of a pointer or sequence.
  pub fn elem(&self) -> Option<TypeInfo> {
    self.elem.map(|elem| elem())
  }

  /// Declared fields of a struct, empty for everything else.
  pub fn fields(&self) -> Vec<FieldDescriptor> {
    (self.fields)()
  }

  /// Strips pointer and sequence wrappers.
  pub fn innermost(self) -> TypeInfo {
    let mut info = self;
    while let Some(elem) = info.elem() {
      info = elem;
    }
    info
  }

  /// Strips pointer wrappers only.
  pub fn pointee(self) -> TypeInfo {
    let mut info = self;
    while info.kind == Kind::Pointer {
      match info.elem() {
        Some(elem) => info = elem,
        None => break,
      }
    }
    info
  }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
  name: &'static str,
  ty: fn() -> TypeInfo,
  tags: &'static [(&'static str, &'static str)],
  readonly: bool,
  flatten: bool,
}

impl FieldDescriptor {
  pub fn new(name: &'static str, ty: fn() -> TypeInfo) -> Self {
    Self {
      name,
      ty,
      tags: &[],
      readonly: false,
      flatten: false,
    }
  }

  pub fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
    self.tags = tags;
    self
  }

  pub fn readonly(mut self) -> Self {
    self.readonly = true;
    self
  }

  pub fn flatten(mut self) -> Self {
    self.flatten = true;
    self
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn type_info(&self) -> TypeInfo {
    (self.ty)()
  }

  /// Value of the tag under `key`. Empty values count as absent.
  pub fn tag(&self, key: &str) -> Option<&'static str> {
    self
      .tags
      .iter()
      .find(|(k, _)| *k == key)
      .map(|(_, v)| *v)
      .filter(|v| !v.is_empty())
  }

  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  pub fn is_flatten(&self) -> bool {
    self.flatten
  }
}
