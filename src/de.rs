//! Deserialisation helpers for Slack's `ok` envelope flag.
//!
//! Slack's responses share one shape regardless of outcome, so we tell the
//! success and failure variants of the response envelope apart by
//! rejecting the wrong value of `ok` during deserialisation.

use serde::de::{Deserialize, Deserializer, Error};

/// Accept `ok: true` only.
pub fn ok_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_ok(deserializer, true)
}

/// Accept `ok: false` only.
pub fn ok_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_ok(deserializer, false)
}

fn expect_ok<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let ok = bool::deserialize(deserializer)?;

    if ok == expected {
        Ok(ok)
    } else {
        Err(Error::custom(format!("unexpected envelope: ok is {}", ok)))
    }
}
