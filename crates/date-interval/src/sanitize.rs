//! Input sanitization and message localization collaborators.
//!
//! Every string parameter passes through a [`Sanitizer`] before validation,
//! and every failure message passes through a [`Localizer`] before it is
//! placed in a result. Hosts can swap either one on
//! [`DateIntervalCalculator`](crate::DateIntervalCalculator).

/// Normalizes a raw string parameter before validation.
pub trait Sanitizer {
    fn sanitize(&self, input: &str) -> String;
}

/// Trims surrounding whitespace and HTML-escapes markup characters.
///
/// Escapes `&`, `<`, `>`, `"` and `'` the same way an HTML templating layer
/// would, so sanitized text can be embedded in rendered output verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Sanitizer for HtmlEscaper {
    fn sanitize(&self, input: &str) -> String {
        let trimmed = input.trim();
        let mut out = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#039;"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// Translates a user-visible message into the host's locale.
pub trait Localizer {
    fn localize(&self, message: &str) -> String;
}

/// Returns messages unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn localize(&self, message: &str) -> String {
        message.to_string()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
