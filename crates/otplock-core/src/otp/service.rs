//! Gate lifecycle: configuration load, engine setup, attempt handling.
//!
//! Every failure in [`TokenGate::open`] is fatal by policy: the gate must
//! never run with an unvalidated or partially initialized configuration,
//! and there is no retry or degraded mode.

use std::path::Path;

use crate::otp::core::{current_unix_time, verify, TokenEngine};
use crate::otp::types::*;

/// Owns the validated configuration and the hashing engine for the life of
/// the process.
///
/// Dropping the gate wipes the secret and releases the hashing context on
/// every exit path, including early aborts during setup.
#[derive(Debug)]
pub struct TokenGate {
    config: Config,
    engine: TokenEngine,
}

impl TokenGate {
    /// Load the settings file at `path`, validate it in full, and set up
    /// the digest engine.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OtpError> {
        let config = Config::load(path)?;
        Self::from_config(config)
    }

    /// Build a gate from an already-parsed configuration.
    pub fn from_config(config: Config) -> Result<Self, OtpError> {
        config.validate()?;
        let algorithm = Algorithm::from_name(&config.digest_name)?;
        if config.token_length as usize > algorithm.output_len() {
            return Err(OtpError::new(
                OtpErrorKind::Config,
                format!(
                    "token length {} exceeds {} digest output ({} bytes)",
                    config.token_length,
                    algorithm,
                    algorithm.output_len()
                ),
            ));
        }
        log::info!(
            "token gate ready: digest={} window={}s digits={}",
            algorithm,
            config.time_window_secs,
            config.token_length
        );
        Ok(Self {
            config,
            engine: TokenEngine::new(algorithm),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token for the window containing the current wall-clock time.
    pub fn current_token(&mut self) -> String {
        self.current_token_at(current_unix_time())
    }

    /// Token for the window containing `unix_seconds`.
    pub fn current_token_at(&mut self, unix_seconds: u64) -> String {
        self.engine.generate_at(&self.config, unix_seconds)
    }

    /// Verify a typed candidate against the current window's token.
    ///
    /// The caller owns the candidate buffer and clears it after each
    /// attempt regardless of outcome.
    pub fn verify_candidate(&mut self, candidate: &[u8]) -> bool {
        self.verify_candidate_at(candidate, current_unix_time())
    }

    /// Verify a candidate against the token for `unix_seconds`.
    pub fn verify_candidate_at(&mut self, candidate: &[u8], unix_seconds: u64) -> bool {
        let token = self.current_token_at(unix_seconds);
        verify(&token, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_settings(dir: &tempfile::TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("hotpSettings");
        fs::write(&path, text).unwrap();
        path
    }

    // ── Opening ──────────────────────────────────────────────────

    #[test]
    fn open_valid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nsha256\n");
        let mut gate = TokenGate::open(&path).unwrap();
        let token = gate.current_token_at(59);
        assert_eq!(token.len(), 6);
        assert!(token.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenGate::open(dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::Io);
    }

    #[test]
    fn open_unknown_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nblake3\n");
        let err = TokenGate::open(&path).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn open_zero_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n0\n6\nsha256\n");
        let err = TokenGate::open(&path).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::Config);
    }

    #[test]
    fn open_token_longer_than_digest() {
        // SHA-1 digests are 20 bytes; 21 digits cannot be sampled.
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n21\nsha1\n");
        let err = TokenGate::open(&path).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::Config);
    }

    #[test]
    fn open_token_length_at_digest_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n32\nsha256\n");
        let mut gate = TokenGate::open(&path).unwrap();
        assert_eq!(gate.current_token_at(0).len(), 32);
    }

    // ── Attempts ─────────────────────────────────────────────────

    #[test]
    fn verify_candidate_accepts_current_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nsha256\n");
        let mut gate = TokenGate::open(&path).unwrap();
        let token = gate.current_token_at(1234);
        assert!(gate.verify_candidate_at(token.as_bytes(), 1234));
    }

    #[test]
    fn verify_candidate_rejects_truncated_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nsha256\n");
        let mut gate = TokenGate::open(&path).unwrap();
        let token = gate.current_token_at(1234);
        assert!(!gate.verify_candidate_at(&token.as_bytes()[..5], 1234));
        assert!(!gate.verify_candidate_at(b"", 1234));
    }

    #[test]
    fn verify_candidate_rejects_wrong_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nsha256\n");
        let mut gate = TokenGate::open(&path).unwrap();
        let token = gate.current_token_at(0);
        let mut flipped = token.clone().into_bytes();
        flipped[0] = b'0' + (flipped[0] - b'0' + 1) % 10;
        // The flipped candidate can never equal the window-0 token.
        assert!(!gate.verify_candidate_at(&flipped, 0));
    }

    #[test]
    fn gates_agree_on_same_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "abc123\n30\n6\nsha256\n");
        let mut a = TokenGate::open(&path).unwrap();
        let mut b = TokenGate::open(&path).unwrap();
        assert_eq!(a.current_token_at(777), b.current_token_at(777));
    }
}
