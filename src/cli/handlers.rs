// src/cli/handlers.rs
use std::error::Error;
use std::path::Path;

use inquire::{Confirm, Password, PasswordDisplayMode};
use serde::Serialize;

use password_master::core::PasswordHistory;
use password_master::exporters::CsvExporter;
use password_master::models::{GenerationConfig, HistoryEntry, StrengthReport};
use password_master::utils::{format_local_timestamp, format_time_ago, mask_password};
use password_master::PasswordGenerator;

#[derive(Serialize)]
struct GeneratedPassword<'a> {
    password: &'a str,
    strength: &'a StrengthReport,
}

// Handlers for CLI commands
pub fn handle_generate(
    history: &mut PasswordHistory,
    config: &GenerationConfig,
    json: bool,
) -> Result<String, Box<dyn Error>> {
    let generator = PasswordGenerator::new();
    let password = generator.generate_password(config)?;
    let report = generator.analyze_password_strength(&password);

    if json {
        let output = GeneratedPassword {
            password: &password,
            strength: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n🔑 Generated Password: {}", password);
        print_report(&report);
    }

    history.record(&password, report.level);
    history.save()?;

    Ok(password)
}

pub fn handle_batch(
    history: &mut PasswordHistory,
    config: &GenerationConfig,
    count: usize,
    export: Option<&Path>,
    json: bool,
) -> Result<Vec<String>, Box<dyn Error>> {
    let generator = PasswordGenerator::new();
    let passwords = generator.generate_batch(config, count)?;
    let reports: Vec<StrengthReport> = passwords
        .iter()
        .map(|p| generator.analyze_password_strength(p))
        .collect();

    if json {
        let output: Vec<GeneratedPassword> = passwords
            .iter()
            .zip(&reports)
            .map(|(password, strength)| GeneratedPassword { password, strength })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n📦 Generated {} passwords:", passwords.len());
        for (i, (password, report)) in passwords.iter().zip(&reports).enumerate() {
            println!("{:>3}. {}  [{} {}/100]", i + 1, password, report.level, report.score);
        }
    }

    for (password, report) in passwords.iter().zip(&reports) {
        history.record(password, report.level);
    }
    history.save()?;

    if let Some(path) = export {
        // strength column is N/A for batch exports
        let entries: Vec<HistoryEntry> = passwords
            .iter()
            .map(|p| HistoryEntry::new(p, None))
            .collect();
        let count = CsvExporter::new().export(path, &entries)?;
        if !json {
            println!("💾 Exported {} passwords to {}", count, path.display());
        }
    }

    Ok(passwords)
}

pub fn handle_analyze(password: Option<String>, json: bool) -> Result<StrengthReport, Box<dyn Error>> {
    let password = match password {
        Some(password) => password,
        None => Password::new("Password to analyze:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?,
    };

    let report = password_master::analyze(&password);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report)
}

pub fn handle_history_list(history: &PasswordHistory, reveal: bool, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(history.entries())?);
        return Ok(());
    }

    if history.is_empty() {
        println!("📭 No passwords in history.");
        return Ok(());
    }

    println!("\n📜 Password history ({} entries):", history.len());
    for (i, entry) in history.entries().iter().enumerate() {
        let shown = if reveal {
            entry.password.clone()
        } else {
            mask_password(&entry.password)
        };
        let strength = entry
            .strength
            .map(|level| level.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "{:>3}. {}  [{}]  {} ({})",
            i + 1,
            shown,
            strength,
            format_local_timestamp(entry.timestamp),
            format_time_ago(entry.timestamp)
        );
    }

    Ok(())
}

pub fn handle_history_remove(history: &mut PasswordHistory, password: &str) -> Result<bool, Box<dyn Error>> {
    let removed = history.remove(password);
    if removed {
        history.save()?;
        println!("✅ Removed password from history.");
    } else {
        println!("❗ Password not found in history.");
    }
    Ok(removed)
}

pub fn handle_history_clear(history: &mut PasswordHistory, yes: bool) -> Result<usize, Box<dyn Error>> {
    if history.is_empty() {
        // Rewrites a file that could not be read back
        history.save()?;
        println!("📭 History is already empty.");
        return Ok(0);
    }

    let confirmed = yes
        || Confirm::new("Clear all password history?")
            .with_default(false)
            .prompt()?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(0);
    }

    let removed = history.clear();
    history.save()?;
    println!("🧹 Cleared {} entries.", removed);
    Ok(removed)
}

pub fn handle_history_export(history: &PasswordHistory, path: &Path) -> Result<usize, Box<dyn Error>> {
    let count = CsvExporter::new().export(path, history.entries())?;
    println!("💾 Exported {} entries to {}", count, path.display());
    Ok(count)
}

pub fn print_report(report: &StrengthReport) {
    let filled = usize::from(report.score) / 5;
    println!(
        "💪 Strength: [{}{}] {}/100 ({})",
        "█".repeat(filled),
        "░".repeat(20 - filled),
        report.score,
        report.level
    );

    let details = &report.details;
    println!("   Length:      {} characters", details.length);
    println!("   Uppercase:   {}", check_mark(details.has_uppercase));
    println!("   Lowercase:   {}", check_mark(details.has_lowercase));
    println!("   Digits:      {}", check_mark(details.has_digits));
    println!("   Symbols:     {}", check_mark(details.has_symbols));
    println!("   Diversity:   {}%", details.diversity);

    if !report.contributing_factors.is_empty() {
        let factors: Vec<String> = report
            .contributing_factors
            .iter()
            .map(|factor| factor.to_string())
            .collect();
        println!("   ⚠️  Watch out for: {}", factors.join(", "));
    }
}

fn check_mark(present: bool) -> &'static str {
    if present {
        "✓"
    } else {
        "✗"
    }
}
