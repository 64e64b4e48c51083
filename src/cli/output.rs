use std::io::IsTerminal;

use colored::{ColoredString, Colorize};

use crate::core::classifier::ColorTier;
use crate::core::config::ColorMode;

/// Display attributes for the report. When disabled every method returns
/// the text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// Account row cell colored by severity.
    pub fn cell(&self, text: &str, tier: ColorTier) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tier {
            ColorTier::None => text.to_string(),
            tier => tier_color(text, tier).to_string(),
        }
    }

    /// Totals row cell: always bold, cyan when there is no severity.
    pub fn total_cell(&self, text: &str, tier: ColorTier) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tier {
            ColorTier::None => text.cyan().bold().to_string(),
            tier => tier_color(text, tier).bold().to_string(),
        }
    }

    pub fn total_label(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.bold().to_string()
    }

    pub fn header(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.bold().to_string()
    }
}

fn tier_color(text: &str, tier: ColorTier) -> ColoredString {
    match tier {
        ColorTier::High => text.red(),
        ColorTier::Medium => text.yellow(),
        ColorTier::Low => text.green(),
        ColorTier::None => text.normal(),
    }
}

/// Decide whether to emit ANSI colors.
///
/// `--no-color` and `never` always win; `always` skips terminal detection;
/// `auto` requires stdout to be a terminal and `NO_COLOR` to be unset.
pub fn detect_color(color_flag: bool, mode: ColorMode) -> bool {
    if !color_flag {
        return false;
    }
    match mode {
        ColorMode::Never => false,
        ColorMode::Always => true,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_is_a_no_op() {
        let palette = Palette::plain();
        assert_eq!(palette.cell("1.00↑", ColorTier::High), "1.00↑");
        assert_eq!(palette.total_cell("1.00 ", ColorTier::None), "1.00 ");
        assert_eq!(palette.total_label("TOTAL"), "TOTAL");
        assert_eq!(palette.header("Account"), "Account");
    }

    #[test]
    fn no_color_flag_wins() {
        assert!(!detect_color(false, ColorMode::Always));
        assert!(!detect_color(true, ColorMode::Never));
        assert!(detect_color(true, ColorMode::Always));
    }
}
