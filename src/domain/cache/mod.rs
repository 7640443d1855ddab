//! Cache protocol domain types
//!
//! Policy constants and call outcomes for the semantic-match cache
//! protocol. The protocol itself lives in
//! `infrastructure::services::CacheService`.

mod outcome;
mod policy;

pub use outcome::{LookupOutcome, WriteReceipt};
pub use policy::CachePolicy;
