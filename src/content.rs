//! Curiosity and tip selection
//!
//! Short informational texts shown alongside a conversion. Curiosities come
//! from a per-currency text resource and are stable within a calendar day;
//! tips come from small static per-language pools and carry no determinism
//! requirement.

use crate::currency::Currency;
use chrono::{NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Well-known curiosity resource consulted when no explicit path is given
pub const DEFAULT_CURIOSITIES_PATH: &str = "curiosities.txt";

/// Shown when a currency has no curiosity pool
pub const CURIOSITY_UNAVAILABLE: &str = "No curiosity available for this currency.";

/// Content languages supported by the tip pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Pt,
}

impl Language {
    /// Map a BCP 47-ish locale tag ("pt_BR", "es", ...) onto a supported
    /// language, defaulting to English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.starts_with("pt") {
            Language::Pt
        } else if tag.starts_with("es") {
            Language::Es
        } else {
            Language::En
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Selects curiosity and tip lines for a currency
#[derive(Debug, Clone, Default)]
pub struct ContentSelector {
    curiosities: HashMap<Currency, Vec<String>>,
}

impl ContentSelector {
    /// Selector with no curiosity pools loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Load curiosity pools from a `CODE: text` per-line file. A missing or
    /// unreadable file leaves every pool empty; that is not an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_text(&text),
            Err(e) => {
                log::debug!("No curiosity resource loaded: {}", e);
                Self::new()
            }
        }
    }

    /// Parse `CODE: text` lines. Blank lines, lines without a code prefix
    /// and lines for unknown currencies are ignored.
    pub fn from_text(text: &str) -> Self {
        let mut curiosities: HashMap<Currency, Vec<String>> = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((code, rest)) = line.split_once(':') else {
                continue;
            };
            let Ok(currency) = Currency::from_code(code) else {
                continue;
            };
            let body = rest.trim();
            if body.is_empty() {
                continue;
            }
            curiosities.entry(currency).or_default().push(body.to_string());
        }

        Self { curiosities }
    }

    /// Curiosity of the day: the same (currency, day) pair always yields the
    /// same line; a new day may yield a different one. An empty pool yields
    /// the unavailable sentinel.
    pub fn curiosity_for(&self, currency: Currency, day: NaiveDate) -> String {
        let pool = match self.curiosities.get(&currency) {
            Some(pool) if !pool.is_empty() => pool,
            _ => return CURIOSITY_UNAVAILABLE.to_string(),
        };

        let seed = format!("{}{}", currency.code(), day);
        let idx = (fnv1a(seed.as_bytes()) % pool.len() as u64) as usize;
        pool[idx].clone()
    }

    /// A financial tip for the currency. Selection is not stable across
    /// calls; an empty pool yields an empty string, never an error.
    pub fn tip_for(&self, currency: Currency, language: Language) -> String {
        let pool = tips(currency, language);
        if pool.is_empty() {
            return String::new();
        }

        let entropy = Utc::now().nanosecond() as u64;
        pool[(entropy % pool.len() as u64) as usize].to_string()
    }
}

/// 64-bit FNV-1a. Selection must be stable for a given (code, day) across
/// processes, which rules out the std hasher's randomized keys.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Static tip pools per currency and language
fn tips(currency: Currency, language: Language) -> &'static [&'static str] {
    match (currency, language) {
        (Currency::BRL, Language::Pt) => &[
            "Compare taxas entre bancos antes de trocar reais.",
            "O real pode se desvalorizar em anos eleitorais.",
        ],
        (Currency::BRL, Language::Es) => &[
            "Compara tasas entre bancos antes de cambiar reales.",
            "El real puede depreciarse en años electorales.",
        ],
        (Currency::BRL, Language::En) => &[
            "Compare exchange rates before converting BRL.",
            "BRL may weaken during election years.",
        ],
        (Currency::USD, Language::Pt) => &[
            "O dólar é aceito em muitos países.",
            "Taxas de juros nos EUA afetam o valor global.",
        ],
        (Currency::USD, Language::Es) => &[
            "El dólar es aceptado en muchos países.",
            "Las tasas de interés en EE.UU. afectan el valor global.",
        ],
        (Currency::USD, Language::En) => &[
            "The dollar is accepted worldwide.",
            "U.S. interest rates influence global value.",
        ],
        (Currency::EUR, Language::Pt) => &[
            "O euro é estável, mas sensível às decisões do BCE.",
            "É a segunda moeda mais usada em reservas.",
        ],
        (Currency::EUR, Language::Es) => &[
            "El euro es estable, pero sensible al BCE.",
            "Es la segunda moneda más usada en reservas.",
        ],
        (Currency::EUR, Language::En) => &[
            "The euro is stable but sensitive to ECB decisions.",
            "It's the second most used currency globally.",
        ],
        _ => &[],
    }
}
