use std::fmt;

use anyhow::{Result, bail};
use clap::ValueEnum;

pub const MIN_CREATIVITY: f32 = 0.1;
pub const MAX_CREATIVITY: f32 = 1.0;
pub const DEFAULT_CREATIVITY: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Genre {
    Pop,
    Rock,
    #[value(name = "hip-hop")]
    HipHop,
    Jazz,
    Country,
    Classical,
    Electronic,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Pop,
        Genre::Rock,
        Genre::HipHop,
        Genre::Jazz,
        Genre::Country,
        Genre::Classical,
        Genre::Electronic,
        Genre::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::HipHop => "Hip Hop",
            Genre::Jazz => "Jazz",
            Genre::Country => "Country",
            Genre::Classical => "Classical",
            Genre::Electronic => "Electronic",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Purpose {
    Fun,
    Heartfelt,
    Romantic,
    Inspirational,
    Other,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Fun,
        Purpose::Heartfelt,
        Purpose::Romantic,
        Purpose::Inspirational,
        Purpose::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Purpose::Fun => "Fun",
            Purpose::Heartfelt => "Heartfelt",
            Purpose::Romantic => "Romantic",
            Purpose::Inspirational => "Inspirational",
            Purpose::Other => "Other",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Creativity level picked by the user, in tenths between 0.1 and 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Creativity(f32);

impl Creativity {
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite()
            || value < MIN_CREATIVITY - f32::EPSILON
            || value > MAX_CREATIVITY + f32::EPSILON
        {
            bail!(
                "Creativity level must be between {MIN_CREATIVITY} and {MAX_CREATIVITY}, got {value}"
            );
        }
        // snap to the 0.1 step of the slider
        Ok(Self((value * 10.0).round() / 10.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Creativity {
    fn default() -> Self {
        Self(DEFAULT_CREATIVITY)
    }
}

impl fmt::Display for Creativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

pub fn parse_creativity(raw: &str) -> Result<Creativity, String> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    Creativity::new(value).map_err(|err| err.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserSelection {
    pub genre: Genre,
    pub writer_style: String,
    pub theme: String,
    pub purpose: Purpose,
    pub creativity: Creativity,
}
