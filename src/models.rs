// src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Glyphs that are easy to confuse with one another.
pub const SIMILAR_CHARS: &str = "0O1lI";
/// Punctuation that is awkward to type or quote in shells and config files.
pub const AMBIGUOUS_CHARS: &str = "{}[]()/\\'\"`~,;.<>";

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    /// Every class, in the priority order used for required characters.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.alphabet().contains(c)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Uppercase => write!(f, "uppercase"),
            CharacterClass::Lowercase => write!(f, "lowercase"),
            CharacterClass::Digits => write!(f, "digits"),
            CharacterClass::Symbols => write!(f, "symbols"),
        }
    }
}

// Password generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
    pub exclude_ambiguous: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_digits: true,
            include_symbols: true,
            exclude_similar: false,
            exclude_ambiguous: false,
        }
    }
}

impl GenerationConfig {
    /// Selected classes in priority order: uppercase, lowercase, digits, symbols.
    pub fn selected_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.includes(*class))
            .collect()
    }

    pub fn includes(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Digits => self.include_digits,
            CharacterClass::Symbols => self.include_symbols,
        }
    }

    /// Union of the selected alphabets minus any excluded characters.
    pub fn effective_alphabet(&self) -> Vec<char> {
        self.selected_classes()
            .into_iter()
            .flat_map(|class| class.alphabet().chars())
            .filter(|c| !(self.exclude_similar && SIMILAR_CHARS.contains(*c)))
            .filter(|c| !(self.exclude_ambiguous && AMBIGUOUS_CHARS.contains(*c)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            StrengthLevel::Strong
        } else if score >= 60 {
            StrengthLevel::Good
        } else if score >= 40 {
            StrengthLevel::Fair
        } else {
            StrengthLevel::Weak
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLevel::Weak => write!(f, "Weak"),
            StrengthLevel::Fair => write!(f, "Fair"),
            StrengthLevel::Good => write!(f, "Good"),
            StrengthLevel::Strong => write!(f, "Strong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthFactor {
    #[serde(rename = "repeating characters")]
    RepeatingCharacters,
    #[serde(rename = "sequential characters")]
    SequentialCharacters,
    #[serde(rename = "short length")]
    ShortLength,
}

impl fmt::Display for StrengthFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthFactor::RepeatingCharacters => write!(f, "repeating characters"),
            StrengthFactor::SequentialCharacters => write!(f, "sequential characters"),
            StrengthFactor::ShortLength => write!(f, "short length"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthDetails {
    pub length: usize,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digits: bool,
    pub has_symbols: bool,
    pub unique_chars: usize,
    /// Distinct characters over length, as a rounded percentage.
    pub diversity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub score: u8,
    pub level: StrengthLevel,
    pub contributing_factors: Vec<StrengthFactor>,
    pub details: StrengthDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub password: String,
    pub timestamp: DateTime<Utc>,
    pub strength: Option<StrengthLevel>,
}

impl HistoryEntry {
    pub fn new(password: &str, strength: Option<StrengthLevel>) -> Self {
        Self {
            password: password.to_string(),
            timestamp: Utc::now(),
            strength,
        }
    }
}
