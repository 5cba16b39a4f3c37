//! Token derivation and verification.
//!
//! Deviations from RFC 4226/6238 are kept on purpose, bit-for-bit, because
//! paired client implementations depend on them:
//!
//! - the digest is a plain hash over the window-counter bytes followed by
//!   the secret bytes, *not* an HMAC;
//! - the counter is encoded as 8 little-endian bytes (the in-memory layout
//!   of the original implementation's `unsigned long` on x86-64/aarch64
//!   Linux, fixed here so the result no longer depends on the host);
//! - decimal digits are stride-sampled across the whole digest instead of
//!   dynamically truncated.

use sha1::Sha1;
use sha2::digest::FixedOutputReset;
use sha2::{Digest, Sha256, Sha512};

use crate::otp::types::{Algorithm, Config};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Time windows
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Current unix timestamp in seconds.
pub fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Time-window counter for a given unix timestamp. All moments within one
/// window share the same token.
///
/// # Panics
///
/// Panics if `window_secs` is zero; [`Config::validate`] rejects such a
/// configuration before any gated path reaches this division.
///
/// [`Config::validate`]: crate::otp::types::Config::validate
pub fn window_at(unix_seconds: u64, window_secs: u32) -> u64 {
    unix_seconds / window_secs as u64
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Engine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Reusable hashing context for the resolved algorithm.
#[derive(Debug)]
enum DigestContext {
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

/// Resolved digest algorithm plus one reusable hashing context.
///
/// Every operation takes `&mut self`, so exclusive use is enforced by the
/// borrow checker rather than by convention; the gate is driven by a single
/// submit event at a time.
#[derive(Debug)]
pub struct TokenEngine {
    algorithm: Algorithm,
    ctx: DigestContext,
}

impl TokenEngine {
    pub fn new(algorithm: Algorithm) -> Self {
        let ctx = match algorithm {
            Algorithm::Sha1 => DigestContext::Sha1(Sha1::new()),
            Algorithm::Sha256 => DigestContext::Sha256(Sha256::new()),
            Algorithm::Sha512 => DigestContext::Sha512(Sha512::new()),
        };
        Self { algorithm, ctx }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Reset the context, feed each input buffer in order, finalize.
    ///
    /// Input order is load-bearing: callers hash the window bytes before
    /// the secret bytes.
    pub fn digest(&mut self, inputs: &[&[u8]]) -> Vec<u8> {
        match &mut self.ctx {
            DigestContext::Sha1(d) => digest_inputs(d, inputs),
            DigestContext::Sha256(d) => digest_inputs(d, inputs),
            DigestContext::Sha512(d) => digest_inputs(d, inputs),
        }
    }

    /// Generate the token for the window containing `unix_seconds`.
    ///
    /// The configuration must already be validated against this engine's
    /// algorithm (see [`TokenGate::open`]): `1 <= token_length <=
    /// output_len`.
    ///
    /// # Panics
    ///
    /// Panics if `config.token_length` is zero.
    ///
    /// [`TokenGate::open`]: crate::otp::service::TokenGate::open
    pub fn generate_at(&mut self, config: &Config, unix_seconds: u64) -> String {
        let window = window_at(unix_seconds, config.time_window_secs);
        let digest = self.digest(&[&window.to_le_bytes(), config.secret.as_bytes()]);
        derive_digits(&digest, config.token_length as usize)
    }
}

fn digest_inputs<D: Digest + FixedOutputReset>(d: &mut D, inputs: &[&[u8]]) -> Vec<u8> {
    Digest::reset(d);
    for input in inputs {
        Digest::update(d, input);
    }
    Digest::finalize_reset(d).to_vec()
}

/// Spread `count` decimal digits across the digest by stride sampling:
/// one byte at every `len / count`-th position, reduced modulo 10.
fn derive_digits(digest: &[u8], count: usize) -> String {
    let step = digest.len() / count;
    (0..count)
        .map(|i| char::from(b'0' + digest[i * step] % 10))
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compare a typed candidate against the expected token.
///
/// True only when the lengths match exactly and every byte agrees. A
/// shorter candidate never matches on a prefix, and the byte comparison
/// inspects all token positions regardless of where a mismatch occurs.
pub fn verify(token: &str, candidate: &[u8]) -> bool {
    constant_time_eq(token.as_bytes(), candidate)
}

/// Constant-time comparison (to prevent timing attacks on code verification).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
