//! ID prefix constants.
//!
//! Every persisted entity gets an ID of the form `{prefix}-{8 hex chars}`,
//! e.g. `con-a3f8b2c1`. Generation happens in the store; this module only
//! owns the prefixes so every crate agrees on them.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_SKILL: &str = "skl";
pub const PREFIX_CONNECTION: &str = "con";
pub const PREFIX_CHAT_ROOM: &str = "cht";
pub const PREFIX_MESSAGE: &str = "msg";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_REVIEW: &str = "rev";
pub const PREFIX_REWARD: &str = "rwd";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_SKILL,
    PREFIX_CONNECTION,
    PREFIX_CHAT_ROOM,
    PREFIX_MESSAGE,
    PREFIX_EVENT,
    PREFIX_REVIEW,
    PREFIX_REWARD,
];
