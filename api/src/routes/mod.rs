//! Route handlers.

pub mod health;
pub mod infer;
pub mod model;
