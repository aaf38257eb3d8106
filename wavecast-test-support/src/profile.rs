//! Environment-driven property-test tuning.
//!
//! Suites call [`proptest_cases`] with their local default so CI can raise or
//! lower the case count for every property in one place.

use std::env;

/// Environment variable overriding proptest case counts.
pub const WAVECAST_PROPTEST_CASES_ENV_KEY: &str = "WAVECAST_PROPTEST_CASES";

/// Case count for a property, honouring [`WAVECAST_PROPTEST_CASES_ENV_KEY`].
///
/// Unparseable or zero overrides are logged and ignored.
///
/// # Examples
/// ```
/// use wavecast_test_support::profile::proptest_cases;
///
/// assert!(proptest_cases(32) > 0);
/// ```
#[must_use]
pub fn proptest_cases(default_cases: u32) -> u32 {
    let Ok(raw) = env::var(WAVECAST_PROPTEST_CASES_ENV_KEY) else {
        return default_cases;
    };
    match parse_cases(&raw) {
        Ok(cases) => cases,
        Err(reason) => {
            tracing::warn!(
                env = WAVECAST_PROPTEST_CASES_ENV_KEY,
                raw = %raw,
                reason = %reason,
                "invalid property-test case override; using default",
            );
            default_cases
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
