use crate::reflect::{FieldDescriptor, Reflect, TypeInfo};
use crate::value::Kind;

/// Follows pointers down to the value they hold. `None` if any of them is
/// empty.
pub fn indirect(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
  while let Some(pointer) = value.as_pointer() {
    value = pointer.pointee()?;
  }
  Some(value)
}

/// Mutable [`indirect`].
pub fn indirect_mut(mut value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
  while value.kind() == Kind::Pointer {
    value = value.as_pointer_mut()?.pointee_mut()?;
  }
  Some(value)
}

/// Like [`indirect_mut`], allocating empty pointers on the way.
pub fn indirect_alloc(mut value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
  while value.as_pointer().is_some() {
    value = value.as_pointer_mut()?.alloc();
  }
  Some(value)
}

/// Fields of the struct underneath `info`, with flattened fields replaced by
/// their own fields, depth first in declaration order.
pub fn deep_fields(info: TypeInfo) -> Vec<FieldDescriptor> {
  let info = info.innermost();
  if info.kind() != Kind::Struct {
    return Vec::new();
  }

  let mut fields = Vec::new();
  for field in info.fields() {
    if field.is_flatten() {
      fields.extend(deep_fields(field.type_info()));
    } else {
      fields.push(field);
    }
  }
  fields
}
