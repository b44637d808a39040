mod chat;
mod connection;
mod event;
mod matches;
mod review;
mod reward;
mod user;

pub use chat::ChatCommands;
pub use connection::ConnectionCommands;
pub use event::EventCommands;
pub use matches::MatchCommands;
pub use review::ReviewCommands;
pub use reward::RewardCommands;
pub use user::UserCommands;
