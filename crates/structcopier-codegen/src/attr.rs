use syn::{Attribute, Ident, Lit, LitStr, Meta, MetaList, NestedMeta};
use thiserror::Error;

pub const ATTR_NAME: &str = "copier";

/// Tag key used by the `alias` shorthand.
const DEFAULT_TAG_KEY: &str = "copy";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
  #[error("Unknown option: {0}")]
  UnknownOption(String),
  #[error("Expected a string literal for `{0}`")]
  ExpectedString(String),
  #[error("Invalid method name: {0}")]
  InvalidMethodName(String),
  #[error("Invalid syntax.")]
  InvalidSyntax,
  #[error("Tag `{0}` is given more than once")]
  DuplicateTag(String),
}

#[derive(Debug, PartialEq)]
pub enum StructOpt {
  // getter = "name"
  Getter(Ident),
  // setter = "name"
  Setter(Ident),
  // scan
  Scan,
}

#[derive(Debug, PartialEq)]
pub enum FieldOpt {
  // alias = "other"
  // tag(key = "other", ..)
  Tag(String, String),
  Skip,
  Readonly,
  Flatten,
}

/// Nested items of every `#[copier(..)]` attribute in `attrs`.
pub fn nested_items(attrs: &[Attribute]) -> syn::Result<Vec<NestedMeta>> {
  let mut items = vec![];
  for attr in attrs {
    if !attr.path.is_ident(ATTR_NAME) {
      continue;
    }
    match attr.parse_meta()? {
      Meta::List(list) => items.extend(list.nested.into_iter()),
      other => return Err(syn::Error::new_spanned(other, "Expected `copier(..)`")),
    }
  }
  Ok(items)
}

impl StructOpt {
  pub fn from_nested_meta(meta: &NestedMeta) -> Result<Self, Error> {
    match meta {
      NestedMeta::Meta(Meta::Path(ref path)) if path.is_ident("scan") => Ok(StructOpt::Scan),
      NestedMeta::Meta(Meta::NameValue(ref v)) => {
        let key = path_name(&v.path)?;
        match key.as_str() {
          "getter" => Ok(StructOpt::Getter(method_ident(&key, &v.lit)?)),
          "setter" => Ok(StructOpt::Setter(method_ident(&key, &v.lit)?)),
          _ => Err(Error::UnknownOption(key)),
        }
      }
      NestedMeta::Meta(ref meta) => Err(Error::UnknownOption(path_name(meta.path())?)),
      NestedMeta::Lit(_) => Err(Error::InvalidSyntax),
    }
  }
}

impl FieldOpt {
  pub fn from_nested_meta(meta: &NestedMeta) -> Result<Vec<Self>, Error> {
    match meta {
      NestedMeta::Meta(Meta::Path(ref path)) => {
        let key = path_name(path)?;
        let opt = match key.as_str() {
          "skip" => FieldOpt::Skip,
          "readonly" => FieldOpt::Readonly,
          "flatten" => FieldOpt::Flatten,
          _ => return Err(Error::UnknownOption(key)),
        };
        Ok(vec![opt])
      }
      NestedMeta::Meta(Meta::NameValue(ref v)) => {
        let key = path_name(&v.path)?;
        if key != "alias" {
          return Err(Error::UnknownOption(key));
        }
        let alias = lit_str(&key, &v.lit)?.value();
        Ok(vec![FieldOpt::Tag(DEFAULT_TAG_KEY.to_string(), alias)])
      }
      // tag(copy = "Id", json = "id")
      NestedMeta::Meta(Meta::List(ref list)) => {
        let key = path_name(&list.path)?;
        if key != "tag" {
          return Err(Error::UnknownOption(key));
        }
        Self::from_tag_list(list)
      }
      NestedMeta::Lit(_) => Err(Error::InvalidSyntax),
    }
  }

  fn from_tag_list(list: &MetaList) -> Result<Vec<Self>, Error> {
    list
      .nested
      .iter()
      .map(|item| match item {
        NestedMeta::Meta(Meta::NameValue(ref v)) => {
          let key = path_name(&v.path)?;
          let value = lit_str(&key, &v.lit)?.value();
          Ok(FieldOpt::Tag(key, value))
        }
        _ => Err(Error::InvalidSyntax),
      })
      .collect()
  }
}

/// A field carries at most one value per tag key, so `alias` cannot be
/// combined with `tag(copy = ..)`.
pub fn check_tags(opts: &[FieldOpt]) -> Result<(), Error> {
  let mut seen = vec![];
  for opt in opts {
    if let FieldOpt::Tag(ref key, _) = *opt {
      if seen.contains(&key) {
        return Err(Error::DuplicateTag(key.clone()));
      }
      seen.push(key);
    }
  }
  Ok(())
}

fn path_name(path: &syn::Path) -> Result<String, Error> {
  path
    .get_ident()
    .map(|ident| ident.to_string())
    .ok_or(Error::InvalidSyntax)
}

fn lit_str<'a>(key: &str, lit: &'a Lit) -> Result<&'a LitStr, Error> {
  if let Lit::Str(ref lit) = lit {
    Ok(lit)
  } else {
    Err(Error::ExpectedString(key.to_string()))
  }
}

fn method_ident(key: &str, lit: &Lit) -> Result<Ident, Error> {
  let lit = lit_str(key, lit)?;
  lit
    .parse::<Ident>()
    .map_err(|_| Error::InvalidMethodName(lit.value()))
}

#[cfg(test)]
fn parse_items(attr: syn::Attribute) -> Vec<NestedMeta> {
  nested_items(&[attr]).unwrap()
}

#[test]
fn test_struct_opts() {
  let items = parse_items(syn::parse_quote!(#[copier(getter = "full_name", setter = "nick", scan)]));
  let opts: Vec<_> = items.iter().map(StructOpt::from_nested_meta).collect::<Result<_, _>>().unwrap();
  assert_eq!(
    opts,
    vec![
      StructOpt::Getter(syn::parse_quote!(full_name)),
      StructOpt::Setter(syn::parse_quote!(nick)),
      StructOpt::Scan,
    ]
  );
}

#[test]
fn test_struct_opt_errors() {
  let items = parse_items(syn::parse_quote!(#[copier(getter = 1, setter = "not a name", flatten)]));
  let errors: Vec<_> = items.iter().map(|item| StructOpt::from_nested_meta(item).unwrap_err()).collect();
  assert_eq!(
    errors,
    vec![
      Error::ExpectedString("getter".into()),
      Error::InvalidMethodName("not a name".into()),
      Error::UnknownOption("flatten".into()),
    ]
  );
}

#[test]
fn test_field_opts() {
  let items = parse_items(syn::parse_quote!(#[copier(alias = "Id", tag(json = "id", db = "user_id"), readonly)]));
  let opts: Vec<_> = items
    .iter()
    .map(FieldOpt::from_nested_meta)
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
    .into_iter()
    .flatten()
    .collect();
  assert_eq!(
    opts,
    vec![
      FieldOpt::Tag("copy".into(), "Id".into()),
      FieldOpt::Tag("json".into(), "id".into()),
      FieldOpt::Tag("db".into(), "user_id".into()),
      FieldOpt::Readonly,
    ]
  );
}

#[test]
fn test_other_attributes_are_ignored() {
  let attr: syn::Attribute = syn::parse_quote!(#[serde(rename = "x")]);
  assert!(nested_items(&[attr]).unwrap().is_empty());
}

#[test]
fn test_duplicate_tag_keys() {
  let parse = |attr: syn::Attribute| -> Vec<FieldOpt> {
    parse_items(attr)
      .iter()
      .map(FieldOpt::from_nested_meta)
      .collect::<Result<Vec<_>, _>>()
      .unwrap()
      .into_iter()
      .flatten()
      .collect()
  };

  let opts = parse(syn::parse_quote!(#[copier(alias = "a", tag(copy = "b"))]));
  assert_eq!(check_tags(&opts), Err(Error::DuplicateTag("copy".into())));

  let opts = parse(syn::parse_quote!(#[copier(alias = "a", alias = "b")]));
  assert_eq!(check_tags(&opts), Err(Error::DuplicateTag("copy".into())));

  let opts = parse(syn::parse_quote!(#[copier(alias = "a", tag(json = "a"), readonly)]));
  assert_eq!(check_tags(&opts), Ok(()));
}
