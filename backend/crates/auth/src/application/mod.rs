//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_profile;
pub mod login;
pub mod output;
pub mod refresh_token;

// Re-exports
pub use config::AuthConfig;
pub use get_profile::GetProfileUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use output::{AuthOutput, TOKEN_TYPE};
pub use refresh_token::RefreshTokenUseCase;
