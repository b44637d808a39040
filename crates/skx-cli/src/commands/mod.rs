pub mod chat;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod event;
pub mod matches;
pub mod review;
pub mod reward;
pub mod shared;
pub mod user;
