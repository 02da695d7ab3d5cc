//! Locales and the per-session localization context.
//!
//! Multi-locale responses carry every field as an object keyed by locale
//! code. [`LocalizationContext`] picks the best available value for a
//! requested locale by walking the locale's fallback chain.

use crate::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A locale as configured for a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    /// Locale code, e.g. `"en-US"`.
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Code of the locale to consult when a value is missing in this one.
    #[serde(default)]
    pub fallback_code: Option<String>,
    /// Whether this is the space's default locale.
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            fallback_code: None,
            is_default: false,
        }
    }

    /// Sets the fallback locale code.
    #[must_use]
    pub fn with_fallback(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = Some(code.into());
        self
    }

    /// Marks this locale as the default one.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// The locales known to a decode session and the one currently requested.
///
/// Immutable for the duration of a decode; owned by the client layer and
/// passed explicitly into decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationContext {
    current: String,
    default: String,
    locales: HashMap<String, Locale>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalesPayload {
    Envelope { items: Vec<Locale> },
    List(Vec<Locale>),
}

impl LocalizationContext {
    /// Builds a context whose current locale is the default one.
    ///
    /// Fails with [`DecodeError::NoDefaultLocale`] when no locale is flagged
    /// as default.
    pub fn new(locales: impl IntoIterator<Item = Locale>) -> DecodeResult<Self> {
        let locales: HashMap<String, Locale> = locales
            .into_iter()
            .map(|locale| (locale.code.clone(), locale))
            .collect();

        let mut defaults: Vec<&str> = locales
            .values()
            .filter(|l| l.is_default)
            .map(|l| l.code.as_str())
            .collect();
        defaults.sort_unstable();
        let default = defaults
            .first()
            .map(|code| code.to_string())
            .ok_or(DecodeError::NoDefaultLocale)?;

        Ok(Self {
            current: default.clone(),
            default,
            locales,
        })
    }

    /// Builds a context from a locales API payload: either a bare array of
    /// locale objects or a collection envelope with `items`.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let locales = match LocalesPayload::deserialize(value)? {
            LocalesPayload::Envelope { items } => items,
            LocalesPayload::List(items) => items,
        };
        Self::new(locales)
    }

    /// Returns a copy of this context targeting another locale.
    pub fn with_current(mut self, code: &str) -> DecodeResult<Self> {
        if !self.locales.contains_key(code) {
            return Err(DecodeError::UnknownLocale(code.to_string()));
        }
        self.current = code.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn current(&self) -> &Locale {
        &self.locales[&self.current]
    }

    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.locales[&self.default]
    }

    #[must_use]
    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.locales.get(code)
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.values()
    }

    /// The codes visited when resolving from `start`, in order.
    ///
    /// Stops at the first locale without a fallback, before a fallback code
    /// that names no known locale, or before revisiting a code.
    #[must_use]
    pub fn fallback_chain<'a>(&'a self, start: &'a str) -> Vec<&'a str> {
        let mut chain = Vec::new();
        self.walk(start, |code| {
            chain.push(code);
            false
        });
        chain
    }

    /// Finds the first locale on the fallback chain from `preferred` for
    /// which `has` reports a value.
    pub fn resolve_locale_by<'a>(
        &'a self,
        preferred: &'a str,
        has: impl FnMut(&str) -> bool,
    ) -> Option<&'a str> {
        self.walk(preferred, has)
    }

    /// Finds the locale code whose key is present in a per-locale object.
    pub fn resolve_locale<'a>(
        &'a self,
        preferred: &'a str,
        available: &Map<String, Value>,
    ) -> Option<&'a str> {
        self.walk(preferred, |code| available.contains_key(code))
    }

    /// Returns the best value in a per-locale object, starting at `preferred`.
    pub fn localized_value<'v>(
        &self,
        preferred: &str,
        available: &'v Map<String, Value>,
    ) -> Option<&'v Value> {
        self.resolve_locale(preferred, available)
            .and_then(|code| available.get(code))
    }

    fn walk<'a>(&'a self, start: &'a str, mut has: impl FnMut(&'a str) -> bool) -> Option<&'a str> {
        let mut visited: HashSet<&str> = HashSet::with_capacity(self.locales.len() + 1);
        let mut code = start;
        loop {
            if !visited.insert(code) {
                warn!("Locale fallback cycle detected at {} (starting from {})", code, start);
                return None;
            }
            if has(code) {
                return Some(code);
            }
            match self
                .locales
                .get(code)
                .and_then(|locale| locale.fallback_code.as_deref())
            {
                Some(next) if self.locales.contains_key(next) => code = next,
                Some(next) => {
                    debug!("Locale {} falls back to unknown locale {}", code, next);
                    return None;
                }
                None => return None,
            }
        }
    }
}
