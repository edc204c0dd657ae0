use crate::conversion;
use crate::error::{Error, Result};
use crate::normalize::{deep_fields, indirect, indirect_alloc, indirect_mut};
use crate::options::{Options, Rule};
use crate::reflect::{FieldDescriptor, Reflect};
use crate::value::Kind;
use log::{debug, trace};

/// Copies `src` into `dst` with the default [`Options`].
pub fn copy<D, S>(dst: &mut D, src: &S) -> Result<()>
where
  D: Reflect + ?Sized,
  S: Reflect + ?Sized,
{
  copy_with(dst, src, &Options::default())
}

/// Copies `src` into `dst`.
///
/// Fields are matched by name, by alias tag, or through the accessor
/// methods the types register. Fields that cannot be matched or converted
/// are skipped. The only error is a destination that cannot be written
/// through.
pub fn copy_with<D, S>(dst: &mut D, src: &S, options: &Options) -> Result<()>
where
  D: Reflect + ?Sized,
  S: Reflect + ?Sized,
{
  debug!(
    "copy `{}` into `{}`",
    src.reflect_type_info().type_name(),
    dst.reflect_type_info().type_name()
  );
  copy_value(dst.as_reflect_mut(), src.as_reflect(), options)
}

fn copy_value(dst: &mut dyn Reflect, src: &dyn Reflect, options: &Options) -> Result<()> {
  let type_name = dst.reflect_type_info().type_name();
  let to = indirect_mut(dst).ok_or(Error::Unaddressable { type_name })?;

  let from = match indirect(src) {
    Some(from) => from,
    None => return Ok(()),
  };

  if to.try_set(from) {
    return Ok(());
  }

  let from_info = from.reflect_type_info();
  let to_info = to.reflect_type_info();
  if from_info.innermost().kind() != Kind::Struct || to_info.innermost().kind() != Kind::Struct {
    return Ok(());
  }

  let plan = FieldPlan::new(
    deep_fields(from_info),
    deep_fields(to_info),
    options.get_tag_key(),
  );

  if let Some(seq) = to.as_seq_mut() {
    match from.as_seq() {
      Some(items) => {
        for index in 0..items.len() {
          let elem = seq.push_default();
          if let Some(item) = items.get(index).and_then(indirect) {
            map_instance(elem, item, &plan, options)?;
          }
        }
      }
      None => map_instance(seq.push_default(), from, &plan, options)?,
    }
    return Ok(());
  }

  if from.as_seq().is_some() {
    trace!("skip sequence source for single destination `{}`", to_info.type_name());
    return Ok(());
  }

  map_instance(to, from, &plan, options)
}

/// Fields of both sides, split into the ones matched by name and the ones
/// carrying an alias tag.
struct FieldPlan {
  declared: Vec<&'static str>,
  readonly: Vec<&'static str>,
  from_fields: Vec<FieldDescriptor>,
  to_fields: Vec<FieldDescriptor>,
  from_tagged: Vec<(FieldDescriptor, &'static str)>,
  to_tagged: Vec<(FieldDescriptor, &'static str)>,
}

impl FieldPlan {
  fn new(from: Vec<FieldDescriptor>, to: Vec<FieldDescriptor>, tag_key: &str) -> Self {
    let declared = to.iter().map(|field| field.name()).collect();
    let readonly = to
      .iter()
      .filter(|field| field.is_readonly())
      .map(|field| field.name())
      .collect();
    let (from_fields, from_tagged) = split_tagged(from, tag_key);
    let (to_fields, to_tagged) = split_tagged(to, tag_key);
    Self {
      declared,
      readonly,
      from_fields,
      to_fields,
      from_tagged,
      to_tagged,
    }
  }

  /// Whether the destination has a field `name`, flattened ones included.
  fn declares(&self, name: &str) -> bool {
    self.declared.iter().any(|declared| *declared == name)
  }

  fn is_readonly(&self, name: &str) -> bool {
    self.readonly.iter().any(|readonly| *readonly == name)
  }
}

fn split_tagged(
  fields: Vec<FieldDescriptor>,
  tag_key: &str,
) -> (Vec<FieldDescriptor>, Vec<(FieldDescriptor, &'static str)>) {
  let mut plain = Vec::new();
  let mut tagged = Vec::new();
  for field in fields {
    match field.tag(tag_key) {
      Some(alias) => tagged.push((field, alias)),
      None => plain.push(field),
    }
  }
  (plain, tagged)
}

fn map_instance(
  dst: &mut dyn Reflect,
  src: &dyn Reflect,
  plan: &FieldPlan,
  options: &Options,
) -> Result<()> {
  let dst = match indirect_alloc(dst) {
    Some(dst) => dst,
    None => return Ok(()),
  };
  let (dest, source) = match (dst.as_struct_mut(), src.as_struct()) {
    (Some(dest), Some(source)) => (dest, source),
    _ => return Ok(()),
  };

  // field to field, or field to setter method
  for field in &plan.from_fields {
    let name = field.name();
    let from_field = match source.field(name) {
      Some(from_field) => from_field,
      None => continue,
    };

    if !plan.declares(name) {
      if !dest.call_setter(name, from_field) {
        trace!("skip field `{}`: no counterpart", name);
      }
      continue;
    }

    if plan.is_readonly(name) {
      trace!("skip field `{}`: destination is read-only", name);
      continue;
    }
    let to_field = match dest.field_mut(name) {
      Some(to_field) => to_field,
      None => continue,
    };
    if !assign(to_field, from_field) && !convert(to_field, from_field, name, None) {
      copy_value(to_field, from_field, options)?;
    }
  }

  // getter method to field
  for field in &plan.to_fields {
    let name = field.name();
    if plan.is_readonly(name) {
      continue;
    }
    if let Some(value) = source.call_getter(name) {
      if let Some(to_field) = dest.field_mut(name) {
        convert(to_field, &*value, name, options.get_rule());
      }
    }
  }

  for (field, alias) in &plan.from_tagged {
    if plan.is_readonly(alias) {
      trace!("skip field `{}`: `{}` is read-only", field.name(), alias);
      continue;
    }
    if let Some(from_field) = source.field(field.name()) {
      match dest.field_mut(alias) {
        Some(to_field) => {
          convert(to_field, from_field, field.name(), options.get_rule());
        }
        None => trace!("skip field `{}`: no settable `{}`", field.name(), alias),
      }
    }
  }

  for (field, alias) in &plan.to_tagged {
    if let Some(to_field) = dest.field_mut(field.name()) {
      match source.field(alias) {
        Some(from_field) => {
          convert(to_field, from_field, field.name(), options.get_rule());
        }
        None => trace!("skip field `{}`: no source `{}`", field.name(), alias),
      }
    }
  }

  Ok(())
}

/// Assigns `src` to `dst` if the types line up, through pointers, direct
/// conversions and scanners. Returns `false` when nothing applies.
pub(crate) fn assign(dst: &mut dyn Reflect, src: &dyn Reflect) -> bool {
  let dst = if dst.as_pointer().is_some() {
    let src_is_empty = src
      .as_pointer()
      .map(|pointer| pointer.pointee().is_none())
      .unwrap_or(false);
    let pointer = match dst.as_pointer_mut() {
      Some(pointer) => pointer,
      None => return false,
    };
    if src_is_empty && pointer.clear() {
      return true;
    }
    pointer.alloc()
  } else {
    dst
  };

  let mut src = src;
  loop {
    if dst.try_set(src) {
      return true;
    }

    let direct = src
      .scalar()
      .and_then(|value| conversion::convert_direct(value, dst.kind()));
    if let Some(value) = direct {
      return dst.set_scalar(value);
    }

    if let Some(scanner) = dst.as_scanner() {
      return match scanner.scan(src) {
        Ok(()) => true,
        Err(err) => {
          trace!("scan failed: {}", err);
          false
        }
      };
    }

    match src.as_pointer() {
      Some(pointer) => match pointer.pointee() {
        Some(inner) => src = inner,
        None => return true,
      },
      None => return false,
    }
  }
}

/// Runs the override rule, then the built-in conversion table. Either the
/// value lands in `dst` or `dst` is left untouched.
pub(crate) fn convert(
  dst: &mut dyn Reflect,
  src: &dyn Reflect,
  name: &str,
  rule: Option<&Rule>,
) -> bool {
  if let Some(rule) = rule {
    if rule(&mut *dst, src, name) {
      return true;
    }
  }

  if dst.try_set(src) {
    return true;
  }

  let value = match indirect(src).and_then(|src| src.scalar()) {
    Some(value) => value,
    None => return false,
  };
  let to = dst.reflect_type_info().pointee().kind();
  let converted = match conversion::convert(value, to) {
    Some(converted) => converted,
    None => {
      trace!("skip field `{}`: no conversion into {:?}", name, to);
      return false;
    }
  };

  match indirect_alloc(dst) {
    Some(slot) => slot.set_scalar(converted),
    None => false,
  }
}
