//! Authentication module — sign-in and sign-up

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
