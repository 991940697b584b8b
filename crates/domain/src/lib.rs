//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod document;
mod rate_limit;

pub use document::{Description, DocType, DocumentGoods, Product};
pub use rate_limit::{RateLimitPolicy, WindowUnit};
