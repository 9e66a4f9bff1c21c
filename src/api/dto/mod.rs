//! Data Transfer Objects for REST request/response serialization.
//!
//! Platform snowflakes are carried as plain JSON integers.

pub mod common_dto;
pub mod palette_dto;
pub mod splash_dto;

pub use common_dto::*;
pub use palette_dto::*;
pub use splash_dto::*;
