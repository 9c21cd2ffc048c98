//! Keyset ("seek method") pagination predicates.
//!
//! A [`SeekOrder`] describes a total order over a record set. Given one anchor
//! record, [`PredicateBuilder`] derives the condition matching every record
//! strictly before or strictly after it, as a parametrized fragment that can be
//! merged into a query next to the matching `ORDER BY`.

#[macro_use]
extern crate cfg_if;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate serde;

mod anchor;
mod builder;
mod clause;
mod cursor;
mod env;
mod error;
mod order;
mod predicate;
mod rule;
mod scope;
mod value;

pub use crate::anchor::*;
pub use crate::builder::*;
pub use crate::clause::*;
pub use crate::cursor::*;
pub use crate::env::*;
pub use crate::error::*;
pub use crate::order::*;
pub use crate::predicate::*;
pub use crate::rule::*;
pub use crate::scope::*;
pub use crate::value::*;

cfg_if! { if #[cfg(feature = "diesel")] {
    mod diesel;
    pub use crate::diesel::*;
} }
