//! Repository implementations as `impl SkxStore` blocks, one module per
//! entity family.

pub mod chat;
pub mod connection;
pub mod event;
pub mod resolution;
pub mod review;
pub mod reward;
pub mod session;
pub mod skill;
pub mod user;
