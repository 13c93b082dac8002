//! Custom element name validation for the default namespace.

use std::sync::LazyLock;

use regex::Regex;

/// Names that look like valid custom element names but are reserved by
/// SVG and MathML.
const RESERVED_NAMES: &[&str] = &[
	"annotation-xml",
	"color-profile",
	"font-face",
	"font-face-src",
	"font-face-uri",
	"font-face-format",
	"font-face-name",
	"missing-glyph",
];

static VALID_FORM: LazyLock<Regex> = LazyLock::new(|| {
	// Simplified ASCII form: lowercase start, at least one hyphen.
	Regex::new(r"^[a-z][.0-9_a-z]*-[.0-9_a-z-]*$").unwrap_or_else(|e| panic!("valid-form regex: {e}"))
});

/// Returns true when `local_name` may be defined as a custom element in
/// the default (HTML) namespace.
pub fn is_valid_custom_element_name(local_name: &str) -> bool {
	!RESERVED_NAMES.contains(&local_name) && VALID_FORM.is_match(local_name)
}
