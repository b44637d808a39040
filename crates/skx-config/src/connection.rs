//! Connection request defaults.

use serde::{Deserialize, Serialize};

fn default_message() -> String {
    String::from("I'd like to connect with you!")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Message attached to a request when the requester supplies none.
    #[serde(default = "default_message")]
    pub default_message: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            default_message: default_message(),
        }
    }
}
