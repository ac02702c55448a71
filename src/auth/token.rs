use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per token; encodes to 43 URL-safe characters.
const SECRET_BYTES: usize = 32;

/// Hashes a raw token with SHA-256, returned as lowercase hex.
///
/// Unsalted, so a presented token can be matched against stored digests directly.
#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokenGenerator;

impl TokenGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates a new token as unpadded URL-safe base64 of 32 random bytes.
    /// Returns (raw_token, hash)
    #[must_use]
    pub fn generate(&self) -> (String, String) {
        let raw_token = generate_secret();
        let hash = hash_token(&raw_token);
        (raw_token, hash)
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
