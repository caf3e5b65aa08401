//! Folder name to display title.

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern is valid"));

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v\d+(\.\d+)*").expect("version pattern is valid"));

/// Cleans a raw directory or archive base name into a title.
///
/// In order: drops every `[...]` tag, drops `v1.2.3`-style version tokens,
/// turns dots into spaces and trims. Interior whitespace is left alone.
pub fn normalize_title(raw: &str) -> String {
    let name = BRACKETED.replace_all(raw, "");
    let name = VERSION.replace_all(&name, "");
    name.replace('.', " ").trim().to_string()
}
