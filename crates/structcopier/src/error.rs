use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// The destination cannot be written through, e.g. it is an empty
  /// `Option`.
  #[error("copy to value is unaddressable: `{type_name}`")]
  Unaddressable { type_name: &'static str },
}
