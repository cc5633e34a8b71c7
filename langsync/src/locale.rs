//! Android resource-directory locale helpers.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use unic_langid::LanguageIdentifier;

/// Directory holding the default (untranslated) resources.
pub const DEFAULT_VALUES_DIR: &str = "values";

lazy_static! {
    static ref LOCALE_DIR_REGEX: Regex = Regex::new(r"^values-[a-z][a-z].*$").unwrap();
}

/// Whether `name` is a locale-qualified resource directory such as
/// `values-fr` or `values-zh-rCN`.
///
/// Non-locale qualifiers that happen to start with two letters
/// (`values-night`, `values-land`) are rejected.
pub fn is_locale_dir(name: &str) -> bool {
    LOCALE_DIR_REGEX.is_match(name)
        && name
            .strip_prefix("values-")
            .and_then(qualifier_to_locale)
            .is_some()
}

/// Converts an Android resource qualifier (`pt-rBR`) to a language identifier
/// (`pt-BR`). Qualifiers after the region (`-night`, `-v21`) are ignored.
pub fn qualifier_to_locale(qualifier: &str) -> Option<LanguageIdentifier> {
    let mut parts = qualifier.split('-');
    let language = parts.next()?;
    if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }

    let region = parts.next().and_then(|part| {
        let code = part.strip_prefix('r')?;
        (code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())).then_some(code)
    });

    let tag = match region {
        Some(region) => format!("{}-{}", language, region),
        None => language.to_string(),
    };
    tag.parse::<LanguageIdentifier>().ok()
}

/// Locale of the nearest locale-qualified `values-*` directory in `path`.
///
/// Returns `None` for files under the default `values` directory.
pub fn locale_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().components().rev().find_map(|c| {
        let component = c.as_os_str().to_str()?;
        let qualifier = component.strip_prefix("values-")?;
        qualifier_to_locale(qualifier).map(|id| id.to_string())
    })
}
