//! Flat-file configuration loading.
//!
//! The settings file holds four whitespace-separated fields in fixed order:
//!
//! ```text
//! <secret>             NUL-free printable text, at most 63 bytes
//! <timeWindowSeconds>  unsigned integer, must be positive
//! <tokenLength>        unsigned integer, must be positive
//! <digestAlgorithmName> e.g. "sha256", at most 7 bytes
//! ```
//!
//! The field count is checked explicitly: a file with missing or surplus
//! fields is rejected outright, never loaded into a partially filled
//! [`Config`].

use std::fs;
use std::path::Path;

use crate::otp::types::*;

impl Config {
    /// Read and parse the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, OtpError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            OtpError::new(
                OtpErrorKind::Io,
                format!("cannot read settings file {}", path.display()),
            )
            .with_detail(e.to_string())
        })?;
        Config::parse(&text)
    }

    /// Parse the four-field settings text.
    pub fn parse(text: &str) -> Result<Config, OtpError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(OtpError::new(
                OtpErrorKind::Parse,
                format!("expected 4 settings fields, found {}", fields.len()),
            ));
        }

        let secret = fields[0];
        if secret.len() > MAX_SECRET_LEN {
            return Err(OtpError::new(
                OtpErrorKind::Parse,
                format!("secret exceeds {MAX_SECRET_LEN} bytes"),
            ));
        }
        if secret.bytes().any(|b| b == 0) {
            return Err(OtpError::new(
                OtpErrorKind::Parse,
                "secret contains an embedded NUL byte",
            ));
        }

        let time_window_secs = parse_unsigned(fields[1], "timeWindowSeconds")?;
        let token_length = parse_unsigned(fields[2], "tokenLength")?;

        let digest_name = fields[3];
        if digest_name.len() > MAX_DIGEST_NAME_LEN {
            return Err(OtpError::new(
                OtpErrorKind::Parse,
                format!("digest name exceeds {MAX_DIGEST_NAME_LEN} bytes"),
            ));
        }

        Ok(Config {
            secret: secret.to_string(),
            time_window_secs,
            token_length,
            digest_name: digest_name.to_string(),
        })
    }

    /// Semantic checks that do not depend on the resolved algorithm.
    ///
    /// A zero time window would divide by zero when computing the window
    /// counter; a zero token length would let an empty candidate unlock.
    pub fn validate(&self) -> Result<(), OtpError> {
        if self.time_window_secs == 0 {
            return Err(OtpError::new(
                OtpErrorKind::Config,
                "time window must be positive",
            ));
        }
        if self.token_length == 0 {
            return Err(OtpError::new(
                OtpErrorKind::Config,
                "token length must be positive",
            ));
        }
        Ok(())
    }
}

fn parse_unsigned(raw: &str, name: &str) -> Result<u32, OtpError> {
    raw.parse::<u32>().map_err(|e| {
        OtpError::new(
            OtpErrorKind::Parse,
            format!("field {name} is not an unsigned integer"),
        )
        .with_detail(e.to_string())
    })
}
