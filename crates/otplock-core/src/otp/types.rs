//! Core types for the token gate: algorithms, configuration, errors.

use std::fmt;

use zeroize::Zeroize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Limits
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Maximum secret length in bytes. The on-disk format reserves 64 bytes for
/// the secret including a terminator.
pub const MAX_SECRET_LEN: usize = 63;

/// Maximum digest-name length in bytes (8 reserved on disk, terminator included).
pub const MAX_DIGEST_NAME_LEN: usize = 7;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm used to mix the time-window counter with the shared secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Resolve a configuration name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self, OtpError> {
        match name.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(OtpError::new(
                OtpErrorKind::UnknownAlgorithm,
                format!("unrecognized digest algorithm \"{name}\""),
            )),
        }
    }

    /// Digest output size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "sha1"),
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Gate configuration, read once at startup and immutable afterwards.
///
/// The secret is kept as NUL-free printable text for compatibility with the
/// whitespace-delimited settings file; it is hashed as raw bytes with no
/// terminator. Wiped on drop.
#[derive(Clone)]
pub struct Config {
    pub secret: String,
    pub time_window_secs: u32,
    pub token_length: u32,
    pub digest_name: String,
}

impl fmt::Debug for Config {
    // The secret never reaches logs or diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("time_window_secs", &self.time_window_secs)
            .field("token_length", &self.token_length)
            .field("digest_name", &self.digest_name)
            .finish()
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
///
/// Every kind is a setup-time failure: the gate aborts rather than run with
/// a partially validated configuration. `Init` is reserved for hashing-context
/// allocation failures; the current backend cannot produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpErrorKind {
    Io,
    Parse,
    UnknownAlgorithm,
    Config,
    Init,
}

/// Crate-level error.
#[derive(Debug, Clone)]
pub struct OtpError {
    pub kind: OtpErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for OtpError {}

impl OtpError {
    pub fn new(kind: OtpErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<OtpError> for String {
    fn from(e: OtpError) -> String {
        e.to_string()
    }
}
