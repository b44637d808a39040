//! Entity structs for all skill-exchange domain objects.
//!
//! Each persisted entity maps to a table in the libSQL schema owned by
//! `skx-db`. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for JSON roundtrip and schema validation.

mod chat;
mod connection;
mod event;
mod history;
mod review;
mod reward;
mod session;
mod skill;
mod user;

pub use chat::{ChatRoom, Message};
pub use connection::{Connection, ConnectionView, pair_key};
pub use event::Event;
pub use history::{HistoryEntry, UserStats};
pub use review::{Review, SkillEvaluation};
pub use reward::TokenReward;
pub use session::{Session, SessionResolution};
pub use skill::Skill;
pub use user::User;
