//! Data models
//!
//! Boundary types for every payload exchanged with the complaint backend.
//! Raw backend strings are kept as-is on ingress; canonical forms come from
//! [`crate::normalize`]. All IDs are `i64` (backend integer primary keys).

pub mod complaint;
pub mod complaint_update;
pub mod department;
pub mod notification;
pub mod user;
pub mod vocabulary;

// Re-exports
pub use complaint::*;
pub use complaint_update::*;
pub use department::*;
pub use notification::*;
pub use user::*;
pub use vocabulary::*;

use serde::{Deserialize, Deserializer};

/// Decode `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
