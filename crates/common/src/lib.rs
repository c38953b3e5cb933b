//! Shared types for the Yandex Cloud client workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
