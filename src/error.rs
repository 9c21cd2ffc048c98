use crate::Value;
use ::thiserror::Error;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("value {value} of `{expression}` is not one of its enumerated values")]
    UnknownEnumValue { expression: String, value: Value },

    #[error("record has no value for ordering expression `{expression}`")]
    MissingValue { expression: String },

    #[error("an order needs at least one rule")]
    EmptyOrder,

    #[error("the last rule of an order must be unique, `{expression}` is not")]
    NonUniqueLastRule { expression: String },

    #[error("enumeration of `{expression}` has no values")]
    EmptyEnumeration { expression: String },

    #[error("enumeration of `{expression}` lists {value} more than once")]
    DuplicateEnumValue { expression: String, value: Value },

    #[error("values of `{expression}` cannot be compared")]
    Incomparable { expression: String },

    #[error("page count is too large, must be less than or equal to {max} (got {count})")]
    PageCountTooLarge { count: u32, max: u32 },
}
