// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supported languages and the localized message catalogue.
//!
//! Messages live in Fluent resources under `locales/<code>/orbitah.ftl`,
//! compiled into the binary. A message missing from a language falls back
//! to English.

use crate::validation::Violation;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentError, FluentResource};
use std::sync::OnceLock;
use unic_langid::LanguageIdentifier;

/// Code used when nothing else resolves.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A supported display language.
#[derive(Debug, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    /// ISO 3166-1 alpha-2 codes of countries where the language is common
    pub countries: &'static [&'static str],
}

impl Language {
    pub fn flag(&self) -> &'static str {
        match self.code {
            "en" => "🇺🇸",
            "es" => "🇪🇸",
            _ => "🌐",
        }
    }
}

pub static ENGLISH: Language = Language {
    code: "en",
    name: "English",
    native_name: "English",
    countries: &[
        "US", "GB", "CA", "AU", "NZ", "IE", "ZA", "IN", "PK", "NG", "PH", "KE", "UG", "TZ", "ZW",
        "ZM", "MW", "BW", "LS", "SZ", "NA", "GM", "SL", "LR", "GH", "CM", "BI", "RW", "ET", "SO",
        "DJ", "ER", "SD", "SS", "CF", "CG", "CD", "GA", "GQ", "ST", "AO", "MZ",
    ],
};

pub static SPANISH: Language = Language {
    code: "es",
    name: "Spanish",
    native_name: "Español",
    countries: &[
        "ES", "MX", "AR", "CO", "PE", "VE", "CL", "EC", "GT", "CU", "BO", "DO", "HN", "PY", "SV",
        "NI", "CR", "PA", "UY", "GQ", "PH", "US", "PR", "GU", "VI", "AS", "MP", "FM", "PW", "MH",
        "CK", "NU", "TK", "TO", "WS", "FJ", "VU", "NC", "PF", "WF", "TV", "KI", "NR", "PG", "SB",
    ],
};

static AVAILABLE_LANGUAGES: [&Language; 2] = [&ENGLISH, &SPANISH];

/// Supported languages, in display order.
pub fn available_languages() -> &'static [&'static Language] {
    &AVAILABLE_LANGUAGES
}

/// Look up a supported language by exact code.
pub fn find_language(code: &str) -> Option<&'static Language> {
    AVAILABLE_LANGUAGES.iter().copied().find(|l| l.code == code)
}

pub fn default_language() -> &'static Language {
    &ENGLISH
}

/// Primary subtag of a language tag: `es-MX` → `es`, `es_ES.UTF-8` → `es`.
pub fn primary_subtag(tag: &str) -> String {
    tag.split(['-', '_', '.', '@'])
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Every user-visible string the client renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    Loading,
    Welcome { username: &'a str },
    NotSignedIn,
    SignedOut,
    LoginError,
    RegisterError,
    LanguageChanged { native_name: &'a str },
    SelectLanguage,
    ExperiencePoints,
    CurrentRank,
    StreakDays,
    Location,
    DefaultRank,
    UnknownLocation,
    Goals,
    GoalsSummary { active: usize, completed: usize },
    FocusSessions,
    FocusSummary { count: usize, total: &'a str },
    Groups,
    GroupsEmpty,
    Achievements,
    AchievementsSummary { unlocked: usize, total: usize },
    Exploration,
    ExplorationSummary { unlocked: usize },
    ExplorationNotStarted,
    Profile,
    Invalid(Violation),
}

impl<'a> Message<'a> {
    /// Render in `language`; messages it lacks come out in English.
    pub fn localize(&self, language: &Language) -> String {
        let (id, args) = self.key();
        let catalog = catalog();

        for code in [language.code, DEFAULT_LANGUAGE] {
            if let Some(text) = catalog.bundle(code).and_then(|b| format_message(b, id, &args)) {
                return text;
            }
        }

        tracing::error!(id, language = language.code, "Message missing from every catalogue");
        id.to_string()
    }

    /// Fluent message id and arguments.
    fn key(&self) -> (&'static str, FluentArgs<'a>) {
        let mut args = FluentArgs::new();
        let id = match *self {
            Message::Loading => "loading",
            Message::Welcome { username } => {
                args.set("username", username);
                "welcome"
            }
            Message::NotSignedIn => "not-signed-in",
            Message::SignedOut => "signed-out",
            Message::LoginError => "login-error",
            Message::RegisterError => "register-error",
            Message::LanguageChanged { native_name } => {
                args.set("native_name", native_name);
                "language-changed"
            }
            Message::SelectLanguage => "select-language",
            Message::ExperiencePoints => "experience-points",
            Message::CurrentRank => "current-rank",
            Message::StreakDays => "streak-days",
            Message::Location => "location",
            Message::DefaultRank => "default-rank",
            Message::UnknownLocation => "unknown-location",
            Message::Goals => "goals",
            Message::GoalsSummary { active, completed } => {
                args.set("active", active);
                args.set("completed", completed);
                "goals-summary"
            }
            Message::FocusSessions => "focus-sessions",
            Message::FocusSummary { count, total } => {
                args.set("count", count);
                args.set("total", total);
                "focus-summary"
            }
            Message::Groups => "groups",
            Message::GroupsEmpty => "groups-empty",
            Message::Achievements => "achievements",
            Message::AchievementsSummary { unlocked, total } => {
                args.set("unlocked", unlocked);
                args.set("total", total);
                "achievements-summary"
            }
            Message::Exploration => "exploration",
            Message::ExplorationSummary { unlocked } => {
                args.set("unlocked", unlocked);
                "exploration-summary"
            }
            Message::ExplorationNotStarted => "exploration-not-started",
            Message::Profile => "profile",
            Message::Invalid(violation) => match violation {
                Violation::Required => "validation-required",
                Violation::MinLength { min } => {
                    args.set("min", min);
                    "validation-min-length"
                }
                Violation::Email => "validation-email",
                Violation::PasswordMismatch => "validation-password-mismatch",
            },
        };
        (id, args)
    }
}

type Bundle = FluentBundle<FluentResource>;

/// One compiled bundle per supported language.
struct Catalog {
    bundles: Vec<(&'static str, Bundle)>,
}

impl Catalog {
    fn load() -> Self {
        let bundles = AVAILABLE_LANGUAGES
            .iter()
            .map(|language| (language.code, build_bundle(language)))
            .collect();
        Self { bundles }
    }

    fn bundle(&self, code: &str) -> Option<&Bundle> {
        self.bundles
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, bundle)| bundle)
    }
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::load)
}

fn ftl_source(code: &str) -> &'static str {
    match code {
        "es" => include_str!("../locales/es/orbitah.ftl"),
        _ => include_str!("../locales/en/orbitah.ftl"),
    }
}

fn build_bundle(language: &Language) -> Bundle {
    let langid: LanguageIdentifier = language.code.parse().unwrap_or_default();
    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Terminal output: no bidi isolation marks around arguments
    bundle.set_use_isolating(false);

    let resource = match FluentResource::try_new(ftl_source(language.code).to_string()) {
        Ok(resource) => resource,
        Err((resource, errors)) => {
            tracing::error!(language = language.code, ?errors, "Syntax errors in message catalogue");
            resource
        }
    };
    if let Err(errors) = bundle.add_resource(resource) {
        tracing::error!(language = language.code, ?errors, "Failed to load message catalogue");
    }
    bundle
}

fn format_message(bundle: &Bundle, id: &str, args: &FluentArgs) -> Option<String> {
    let pattern = bundle.get_message(id)?.value()?;
    let mut errors: Vec<FluentError> = Vec::new();
    let text = bundle.format_pattern(pattern, Some(args), &mut errors);
    if !errors.is_empty() {
        tracing::warn!(id, ?errors, "Message formatted with errors");
    }
    Some(text.into_owned())
}
