//! Placeholder substitution for notice templates

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::types::FieldBag;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid");
}

/// Replace every `{identifier}` token with its value from `fields`.
///
/// Single left-to-right pass. Tokens without a matching field are kept
/// verbatim; substituted values are not rescanned.
pub fn fill_template(template: &str, fields: &FieldBag) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match fields.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder names referenced by `template`, in order of appearance
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
