//! Console gate driver.
//!
//! Loads the token settings, then reads candidate lines from stdin until
//! one verifies against the current time window. Exits 0 on the first
//! match, nonzero on setup failure or end of input — the gate fails
//! closed, never open.
//!
//! Usage: `otplock [SETTINGS_PATH]` (default `hotpSettings`). The display
//! front end owns everything else: grabs, password dots, feedback.

use std::io::{self, BufRead};
use std::process::ExitCode;

use otplock_core::otp::TokenGate;
use tracing_subscriber::EnvFilter;

const DEFAULT_SETTINGS_PATH: &str = "hotpSettings";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let mut gate = match TokenGate::open(&path) {
        Ok(gate) => gate,
        Err(err) => {
            tracing::error!("cannot initialize token gate: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let candidate = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("cannot read candidate: {err}");
                return ExitCode::FAILURE;
            }
        };
        if gate.verify_candidate(candidate.trim().as_bytes()) {
            println!("unlocked");
            return ExitCode::SUCCESS;
        }
        // No reason is given; the comparison should reveal nothing.
        println!("denied");
    }

    // End of input without a valid token: stay locked.
    ExitCode::FAILURE
}
