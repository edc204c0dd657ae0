use crate::reflect::Reflect;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Tag key read from fields when no other key is configured.
pub const DEFAULT_TAG_KEY: &str = "copy";

/// Override consulted before the built-in conversions on tagged fields and
/// on fields filled from accessor methods.
///
/// Receives the destination slot, the source value and the name of the
/// field the value came through. Returning `true` means the field has been
/// dealt with and the engine does nothing more for it.
pub type Rule = dyn Fn(&mut dyn Reflect, &dyn Reflect, &str) -> bool + Send + Sync;

#[derive(Clone)]
pub struct Options {
  tag_key: Cow<'static, str>,
  rule: Option<Arc<Rule>>,
}

impl Options {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the tag key aliases are read from. An empty key keeps the default.
  pub fn tag_key<K>(mut self, key: K) -> Self
  where
    K: Into<Cow<'static, str>>,
  {
    let key = key.into();
    if !key.is_empty() {
      self.tag_key = key;
    }
    self
  }

  pub fn rule<F>(mut self, rule: F) -> Self
  where
    F: Fn(&mut dyn Reflect, &dyn Reflect, &str) -> bool + Send + Sync + 'static,
  {
    self.rule = Some(Arc::new(rule));
    self
  }

  pub fn get_tag_key(&self) -> &str {
    &self.tag_key
  }

  pub fn get_rule(&self) -> Option<&Rule> {
    self.rule.as_deref()
  }
}

impl Default for Options {
  fn default() -> Self {
    Self {
      tag_key: Cow::Borrowed(DEFAULT_TAG_KEY),
      rule: None,
    }
  }
}

impl fmt::Debug for Options {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Options")
      .field("tag_key", &self.tag_key)
      .field("rule", &self.rule.as_ref().map(|_| "<rule>"))
      .finish()
  }
}
