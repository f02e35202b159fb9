use std::fmt;

#[derive(Clone, Copy, Debug)]
pub struct PaletteColor {
    ansi: &'static str,
}

impl PaletteColor {
    pub const fn new(ansi: &'static str) -> Self {
        Self { ansi }
    }

    pub const fn ansi(self) -> &'static str {
        self.ansi
    }
}

pub struct Palette;

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const SUCCESS: PaletteColor = PaletteColor::new("\x1b[32m");
    pub const WARNING: PaletteColor = PaletteColor::new("\x1b[33m");
    pub const DANGER: PaletteColor = PaletteColor::new("\x1b[31m");
    pub const BORDER: PaletteColor = PaletteColor::new("\x1b[90m");

    pub fn paint(color: PaletteColor, value: impl fmt::Display) -> String {
        format!("{}{}{}", color.ansi(), value, Self::RESET)
    }

    pub fn dim(value: impl fmt::Display) -> String {
        format!("{}{}{}", Self::DIM, value, Self::RESET)
    }

    pub fn bold(value: impl fmt::Display) -> String {
        format!("{}{}{}", Self::BOLD, value, Self::RESET)
    }
}
