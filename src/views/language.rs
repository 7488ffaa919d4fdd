// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Language switcher listing.

use crate::i18n::{self, Language, Message};
use std::fmt::Write;

/// List supported languages, marking `current`. Labels are in `current`.
pub fn render_language_switcher(current: &Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", Message::SelectLanguage.localize(current));
    for language in i18n::available_languages() {
        let marker = if language.code == current.code { "✓" } else { " " };
        let _ = writeln!(
            out,
            " {marker} {} {:<8} {} ({})",
            language.flag(),
            language.native_name,
            language.name,
            language.code
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::SPANISH;

    #[test]
    fn test_marks_current_language() {
        let text = render_language_switcher(&SPANISH);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Seleccionar idioma:");
        assert!(lines[1].starts_with("   🇺🇸"));
        assert!(lines[2].starts_with(" ✓ 🇪🇸"));
        assert!(lines[2].contains("Español"));
    }
}
