use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use directories::ProjectDirs;

pub fn trim_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn strip_controls_and_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // ANSI escape sequence (ESC … letter)
            '\x1b' => {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }

            // Keep line breaks, lyrics are multi-line
            '\n' => out.push(c),

            c if c.is_control() => {}

            c => out.push(c),
        }
    }

    out.trim().to_string()
}

pub fn ask_yn(prompt: impl Into<String>) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .report(true)
        .wait_for_newline(true)
        .interact()?;
    Ok(answer)
}

/// Platform data directory, without touching the filesystem.
pub fn data_dir_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "lyrics-maker")
        .ok_or_else(|| anyhow!("Could not determine project directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = data_dir_path()?;
    ensure_dir(&data_dir)?;
    Ok(data_dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory at {}", dir.display()))
}
