// src/strength.rs
use std::collections::HashSet;

use log::trace;

use crate::models::{StrengthDetails, StrengthFactor, StrengthLevel, StrengthReport};

/// Runs that count as "sequential" when any three consecutive characters of
/// one of them appear in a password.
const REFERENCE_SEQUENCES: [&str; 6] = [
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
];

const PENALTY: i32 = 10;

/// Score a password from 0 to 100 and classify it.
///
/// Length is measured in characters, not bytes. The function is total: an
/// empty string gets the lowest length bucket and no class bonuses.
pub fn analyze_password_strength(password: &str) -> StrengthReport {
    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();

    let has_uppercase = chars.iter().any(char::is_ascii_uppercase);
    let has_lowercase = chars.iter().any(char::is_ascii_lowercase);
    let has_digits = chars.iter().any(char::is_ascii_digit);
    let has_symbols = chars.iter().any(|c| !c.is_ascii_alphanumeric());

    let mut score: i32 = length_score(length);

    if has_uppercase {
        score += 15;
    }
    if has_lowercase {
        score += 15;
    }
    if has_digits {
        score += 15;
    }
    if has_symbols {
        score += 20;
    }

    let unique_chars = chars.iter().collect::<HashSet<_>>().len();
    let diversity = if length == 0 {
        0.0
    } else {
        unique_chars as f64 / length as f64
    };
    if diversity > 0.8 {
        score += 10;
    } else if diversity > 0.6 {
        score += 5;
    }

    let mut contributing_factors = Vec::new();

    if has_repeating_run(&chars) {
        score -= PENALTY;
        contributing_factors.push(StrengthFactor::RepeatingCharacters);
    }

    if has_sequential_run(password) {
        score -= PENALTY;
        contributing_factors.push(StrengthFactor::SequentialCharacters);
    }

    if length < 8 {
        contributing_factors.push(StrengthFactor::ShortLength);
    }

    let score = score.clamp(0, 100) as u8;
    trace!("Scored {}-character password at {}", length, score);

    StrengthReport {
        score,
        level: StrengthLevel::from_score(score),
        contributing_factors,
        details: StrengthDetails {
            length,
            has_uppercase,
            has_lowercase,
            has_digits,
            has_symbols,
            unique_chars,
            diversity: (diversity * 100.0).round() as u8,
        },
    }
}

fn length_score(length: usize) -> i32 {
    if length >= 12 {
        25
    } else if length >= 8 {
        15
    } else if length >= 6 {
        10
    } else {
        5
    }
}

// Three or more of the same character in a row. Runs of line terminators
// do not count.
fn has_repeating_run(chars: &[char]) -> bool {
    chars
        .windows(3)
        .any(|w| w[0] == w[1] && w[1] == w[2] && !is_line_terminator(w[0]))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn has_sequential_run(password: &str) -> bool {
    REFERENCE_SEQUENCES.iter().any(|sequence| {
        (0..=sequence.len() - 3).any(|i| password.contains(&sequence[i..i + 3]))
    })
}
