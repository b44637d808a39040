//! # skx-core
//!
//! Core types, ID prefixes, and the storage contract for the skill-exchange
//! engine.
//!
//! This crate provides the foundational types shared across all skx crates:
//! - Entity structs for users, skills, events, connections, chat rooms,
//!   sessions, reviews, session resolutions, and token rewards
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - The `Repository` trait the engine consumes, and its `StoreError`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod repository;
