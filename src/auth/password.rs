use crate::error::AppError;
use rand::RngCore;
use scrypt::{scrypt, Params};

/// Derived key length in bytes.
const KEY_LEN: usize = 32;
/// Raw salt length in bytes (hex-encoded to 16 characters when stored).
const SALT_LEN: usize = 8;

fn scrypt_params() -> Result<Params, AppError> {
    // log2(N) = 14, r = 8, p = 1: the interactive-login defaults.
    Params::new(14, 8, 1, KEY_LEN)
        .map_err(|e| AppError::InternalServerError(format!("Invalid scrypt parameters: {}", e)))
}

/// Derives a hex-encoded scrypt key from a password and a hex salt.
fn derive_key(password: &str, salt: &str) -> Result<String, AppError> {
    let mut key = [0u8; KEY_LEN];
    scrypt(
        password.as_bytes(),
        salt.as_bytes(),
        &scrypt_params()?,
        &mut key,
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))?;
    Ok(hex::encode(key))
}

/// Hashes a password with a freshly generated salt.
///
/// The result is stored as `salt.hash`, both parts hex-encoded, so the salt
/// travels with the hash and verification never needs extra state.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    let hash = derive_key(password, &salt)?;
    Ok(format!("{}.{}", salt, hash))
}

/// Verifies a password against a stored `salt.hash` string.
///
/// Recomputes the derivation with the stored salt and compares the result.
/// Returns `AppError::InternalServerError` if the stored value is not in the
/// expected `salt.hash` format.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AppError> {
    let (salt, stored_hash) = stored.split_once('.').ok_or_else(|| {
        AppError::InternalServerError("Stored password is not in salt.hash format".into())
    })?;

    let hash = derive_key(password, salt)?;
    Ok(hash == stored_hash)
}
