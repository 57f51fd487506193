//! Terminal escape stripping.

use std::sync::LazyLock;

use regex::Regex;

/// `ESC [ <digits/semicolons> m` (SGR colour) and `ESC [ <digits/semicolons> K`
/// (erase in line). Other escapes and control characters are left alone.
static ANSI_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[mK]").unwrap());

/// Remove colour and line-clear sequences from `input`.
///
/// Idempotent: stripping already-clean text returns it unchanged.
pub fn strip_ansi(input: &str) -> String {
    ANSI_SEQUENCE.replace_all(input, "").into_owned()
}
