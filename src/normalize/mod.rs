//! Pure transformations from provider payloads to the served records.

pub mod quote;
pub mod recipe;
pub mod weather;
