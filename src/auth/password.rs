//! Password Hashing
//!
//! bcrypt with a fixed cost factor. Hashing happens on signup and on
//! password reset; verification on login. A failed hash is a server
//! fault and propagates, while a failed match is an ordinary `false`,
//! so a wrong password never takes the error path.

use crate::error::AppError;

/// bcrypt cost factor (2^10 rounds).
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password for storage.
///
/// bcrypt salts internally, so equal inputs produce distinct digests.
/// The plaintext is read once here and never logged or stored.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    let digest = bcrypt::hash(plaintext, HASH_COST)?;
    Ok(digest)
}

/// Check a plaintext password against a stored digest.
///
/// Returns `false` both for a mismatch and for a digest that will not
/// parse; the latter means the stored value is corrupt, which is worth a
/// log line but must still read as "wrong password" to the caller.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    match bcrypt::verify(plaintext, digest) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password digest failed to parse: {:?}", e);
            false
        }
    }
}
