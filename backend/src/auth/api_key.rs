//! Opaque API key generation
//!
//! Every user gets a long-lived API key at registration. The field is
//! reserved: no endpoint consumes it yet.

use argon2::password_hash::rand_core::{OsRng, RngCore};

/// Raw entropy per key; hex-encoded the key is twice this length
const API_KEY_BYTES: usize = 30;

/// Generate a high-entropy opaque API key
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
