//! Opaque random tokens (refresh tokens, CSRF tokens)

use rand::RngCore;

/// Number of random bytes behind every opaque token
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Generate a random token: 32 bytes from the OS-seeded CSPRNG, hex encoded.
///
/// The value carries no structure and is only meaningful as a lookup key.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
