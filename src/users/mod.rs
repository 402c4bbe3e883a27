/// User registration. Authentication and session mechanics live in the web
/// layer; the engine only owns the uniqueness rule and its recovery policy.
// region:    --- Imports
use crate::auction::model::User;
use crate::error::EngineError;
use crate::store::AuctionStore;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// Register-user command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
}

/// Register a user. A taken username surfaces as `UserExists` so the web
/// layer can re-prompt instead of failing the request pipeline.
pub async fn handle_register_user(
    cmd: RegisterUserCommand,
    store: &impl AuctionStore,
) -> Result<User, EngineError> {
    info!("{:<12} --> register user: {}", "Command", cmd.username);

    if cmd.username.trim().is_empty() {
        return Err(EngineError::Validation("username must not be empty".into()));
    }
    if cmd.email.trim().is_empty() {
        return Err(EngineError::Validation("email must not be empty".into()));
    }

    store.insert_user(&cmd.username, &cmd.email).await
}

// endregion: --- Commands
