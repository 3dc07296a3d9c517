// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const TOKEN_BYTES: usize = 32;

/// Generate a bearer token from the OS RNG: 32 random bytes, URL-safe
/// base64 without padding (~43 chars), safe to hand out in JSON unescaped.
pub fn generate_token() -> String {
    let mut rng = OsRng;
    generate_token_with(&mut rng, TOKEN_BYTES)
}

pub fn generate_token_with<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// SHA-256 of the raw token; only this goes into the sessions table.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
