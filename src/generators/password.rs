// src/generators/password.rs
use log::{debug, trace};
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use crate::models::{GenerationConfig, StrengthReport, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

pub const MIN_BATCH_SIZE: usize = 1;
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

pub struct PasswordGenerator;

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, config: &GenerationConfig) -> Result<String> {
        generate_password(config)
    }

    pub fn generate_batch(&self, config: &GenerationConfig, count: usize) -> Result<Vec<String>> {
        generate_batch(config, count)
    }

    pub fn analyze_password_strength(&self, password: &str) -> StrengthReport {
        crate::strength::analyze_password_strength(password)
    }
}

/// Generate one password using the thread-local CSPRNG.
pub fn generate_password(config: &GenerationConfig) -> Result<String> {
    generate_password_with_rng(config, &mut rand::thread_rng())
}

/// Generate one password from `config` using the supplied random source.
///
/// One character per selected class is drawn first, in the order uppercase,
/// lowercase, digits, symbols. These required characters come from the
/// class's full alphabet, so `exclude_similar` and `exclude_ambiguous` only
/// apply to the remaining positions. The rest is filled from the effective
/// alphabet and the whole sequence is then shuffled.
///
/// Indices are taken as `u32 % alphabet_len`. For alphabets of at most 88
/// characters the resulting modulo bias is below 2.1e-8 per draw and is
/// accepted.
pub fn generate_password_with_rng<R>(config: &GenerationConfig, rng: &mut R) -> Result<String>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let alphabet = validate(config)?;
    let classes = config.selected_classes();

    let mut password: Vec<char> = Vec::with_capacity(config.length);

    for class in classes.iter().take(config.length) {
        let class_alphabet: Vec<char> = class.alphabet().chars().collect();
        password.push(random_char(&class_alphabet, rng));
    }

    while password.len() < config.length {
        password.push(random_char(&alphabet, rng));
    }

    shuffle(&mut password, rng);

    trace!(
        "Generated password of {} characters from a {}-character alphabet",
        password.len(),
        alphabet.len()
    );

    Ok(password.into_iter().collect())
}

/// Generate `count` independent passwords with the same configuration.
pub fn generate_batch(config: &GenerationConfig, count: usize) -> Result<Vec<String>> {
    generate_batch_with_rng(config, count, &mut rand::thread_rng())
}

pub fn generate_batch_with_rng<R>(
    config: &GenerationConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
        return Err(GeneratorError::InvalidConfig(format!(
            "Batch size must be between {} and {} (got {})",
            MIN_BATCH_SIZE, MAX_BATCH_SIZE, count
        )));
    }

    debug!("Generating batch of {} passwords", count);

    (0..count)
        .map(|_| generate_password_with_rng(config, rng))
        .collect()
}

/// Check `config` and return its effective alphabet.
pub fn validate(config: &GenerationConfig) -> Result<Vec<char>> {
    if config.length < MIN_PASSWORD_LENGTH || config.length > MAX_PASSWORD_LENGTH {
        return Err(GeneratorError::InvalidConfig(format!(
            "Password length must be between {} and {} characters (got {})",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, config.length
        )));
    }

    if config.selected_classes().is_empty() {
        return Err(GeneratorError::InvalidConfig(
            "At least one character type must be selected".to_string(),
        ));
    }

    let alphabet = config.effective_alphabet();
    if alphabet.is_empty() {
        return Err(GeneratorError::InvalidConfig(
            "No characters left after applying the exclusion filters".to_string(),
        ));
    }

    Ok(alphabet)
}

fn random_char<R>(alphabet: &[char], rng: &mut R) -> char
where
    R: RngCore + ?Sized,
{
    alphabet[rng.next_u32() as usize % alphabet.len()]
}

// Fisher-Yates, walking from the last position down.
fn shuffle<R>(chars: &mut [char], rng: &mut R)
where
    R: RngCore + ?Sized,
{
    for i in (1..chars.len()).rev() {
        let j = rng.next_u32() as usize % (i + 1);
        chars.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CharacterClass, SIMILAR_CHARS};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn config_with(length: usize) -> GenerationConfig {
        GenerationConfig {
            length,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn rejects_length_out_of_range() {
        for length in [0, 3, 129, 500] {
            let err = generate_password(&config_with(length)).unwrap_err();
            assert!(matches!(err, GeneratorError::InvalidConfig(_)), "length {}", length);
        }
    }

    #[test]
    fn accepts_length_bounds() {
        assert_eq!(generate_password(&config_with(4)).unwrap().chars().count(), 4);
        assert_eq!(generate_password(&config_with(128)).unwrap().chars().count(), 128);
    }

    #[test]
    fn rejects_empty_selection() {
        let config = GenerationConfig {
            include_uppercase: false,
            include_lowercase: false,
            include_digits: false,
            include_symbols: false,
            exclude_similar: true,
            exclude_ambiguous: true,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate_password(&config),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn output_stays_within_selected_alphabets() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let configs = [
            GenerationConfig::default(),
            GenerationConfig {
                length: 4,
                include_symbols: false,
                ..GenerationConfig::default()
            },
            GenerationConfig {
                length: 33,
                include_uppercase: false,
                include_lowercase: false,
                exclude_ambiguous: true,
                ..GenerationConfig::default()
            },
        ];

        for config in &configs {
            let union: String = config
                .selected_classes()
                .iter()
                .map(|class| class.alphabet())
                .collect();
            for _ in 0..200 {
                let password = generate_password_with_rng(config, &mut rng).unwrap();
                assert_eq!(password.chars().count(), config.length);
                assert!(password.chars().all(|c| union.contains(c)), "{}", password);
            }
        }
    }

    #[test]
    fn covers_every_selected_class() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for length in [4, 5, 8, 16] {
            let config = config_with(length);
            for _ in 0..250 {
                let password = generate_password_with_rng(&config, &mut rng).unwrap();
                for class in CharacterClass::ALL {
                    assert!(
                        password.chars().any(|c| class.contains(c)),
                        "{} missing from {}",
                        class,
                        password
                    );
                }
            }
        }
    }

    #[test]
    fn exclusions_apply_to_fill_but_not_required_characters() {
        let config = GenerationConfig {
            length: 12,
            include_uppercase: false,
            include_lowercase: false,
            include_symbols: false,
            exclude_similar: true,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut saw_excluded = false;

        for _ in 0..500 {
            let password = generate_password_with_rng(&config, &mut rng).unwrap();
            let excluded = password.chars().filter(|c| SIMILAR_CHARS.contains(*c)).count();
            // only the single required digit may come from the unfiltered alphabet
            assert!(excluded <= 1, "{}", password);
            saw_excluded |= excluded == 1;
        }

        assert!(saw_excluded);
    }

    #[test]
    fn thousand_samples_are_distinct() {
        let config = GenerationConfig::default();
        let samples: HashSet<String> = (0..1000)
            .map(|_| generate_password(&config).unwrap())
            .collect();
        assert_eq!(samples.len(), 1000);
    }

    #[test]
    fn character_frequency_is_roughly_uniform() {
        let config = GenerationConfig {
            length: 128,
            include_uppercase: false,
            include_digits: false,
            include_symbols: false,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let mut counts: HashMap<char, usize> = HashMap::new();

        for _ in 0..2000 {
            for c in generate_password_with_rng(&config, &mut rng).unwrap().chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        let expected = (2000 * 128) as f64 / 26.0;
        assert_eq!(counts.len(), 26);
        for (c, count) in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.15, "{} appeared {} times", c, count);
        }
    }

    #[test]
    fn shuffle_moves_required_characters() {
        // uppercase is required first; without a shuffle it would always lead
        let config = GenerationConfig {
            length: 16,
            include_digits: false,
            include_symbols: false,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let leading_lowercase = (0..200)
            .map(|_| generate_password_with_rng(&config, &mut rng).unwrap())
            .filter(|p| p.starts_with(|c: char| c.is_ascii_lowercase()))
            .count();
        assert!(leading_lowercase > 0);
    }

    #[test]
    fn batch_respects_size_limits() {
        let config = GenerationConfig::default();
        assert!(generate_batch(&config, 0).is_err());
        assert!(generate_batch(&config, 101).is_err());

        let batch = generate_batch(&config, 5).unwrap();
        assert_eq!(batch.len(), 5);
        assert!(batch.iter().all(|p| p.chars().count() == 16));
    }

    #[test]
    fn batch_propagates_config_errors() {
        let err = generate_batch(&config_with(2), 3).unwrap_err();
        assert!(err.to_string().contains("between 4 and 128"));
    }
}
