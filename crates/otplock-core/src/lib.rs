//! # otplock-core — time-windowed token gate
//!
//! Shared-secret one-time-token engine behind the otplock screen gate:
//!
//! - **Flat-file configuration** – secret, window seconds, token length and
//!   digest name, validated in full before anything runs
//! - **Digest engine** – SHA-1, SHA-256 or SHA-512 selected by name, one
//!   reusable hashing context for the life of the process
//! - **Token derivation** – the time-window counter is hashed ahead of the
//!   secret as a plain concatenation (deliberately *not* HMAC, for
//!   compatibility with paired clients), then decimal digits are
//!   stride-sampled across the whole digest
//! - **Constant-time verification** – exact-length, full-width compare
//!
//! The secret is wiped with `zeroize` when the configuration drops.

pub mod otp;
