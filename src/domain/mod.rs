//! Domain types and DTOs

pub mod profiles;

pub use profiles::{Profile, ProfilePayload};
