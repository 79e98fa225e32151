pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Credentials payload shared by registration and login requests.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// User's email address.
    /// Must be a valid email format, at most 75 characters.
    #[validate(email, length(max = 75))]
    pub email: String,
    /// User's password. Must not be empty.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload for updating the authenticated user's password.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// The current password, re-verified before any change is applied.
    #[validate(length(min = 1))]
    pub password: String,
    /// The replacement password.
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Payload for deleting the authenticated user's account.
/// The current password is required as confirmation.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteAccountRequest {
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after successful authentication (login, registration,
/// or password update). Contains the JWT bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub access_token: String,
}

/// Generic message response, used for account deletion confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
