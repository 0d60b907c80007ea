//! Formatting value types shared by paragraphs and runs
//!
//! WordprocessingML stores measurements in several units (twips for spacing
//! and indents, half-points for font sizes). The model keeps every length in
//! EMU so values copied between documents never lose precision.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const EMU_PER_INCH: i64 = 914_400;
const EMU_PER_POINT: i64 = 12_700;
const EMU_PER_TWIP: i64 = 635;
const EMU_PER_HALF_POINT: i64 = 6_350;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Length(pub i64);

impl Length {
    pub fn inches(value: f64) -> Self {
        Length((value * EMU_PER_INCH as f64).round() as i64)
    }

    pub fn pt(value: f64) -> Self {
        Length((value * EMU_PER_POINT as f64).round() as i64)
    }

    /// Saturates at the `i64` range; readers use [`Length::checked_twips`].
    pub fn from_twips(twips: i64) -> Self {
        Length(twips.saturating_mul(EMU_PER_TWIP))
    }

    pub fn from_half_points(half_points: i64) -> Self {
        Length(half_points.saturating_mul(EMU_PER_HALF_POINT))
    }

    /// `None` when the value does not fit in EMU.
    pub fn checked_twips(twips: i64) -> Option<Self> {
        twips.checked_mul(EMU_PER_TWIP).map(Length)
    }

    pub fn checked_half_points(half_points: i64) -> Option<Self> {
        half_points.checked_mul(EMU_PER_HALF_POINT).map(Length)
    }

    pub fn emu(self) -> i64 {
        self.0
    }

    pub fn to_pt(self) -> f64 {
        self.0 as f64 / EMU_PER_POINT as f64
    }

    pub fn to_twips(self) -> i64 {
        (self.0 as f64 / EMU_PER_TWIP as f64).round() as i64
    }

    pub fn to_half_points(self) -> i64 {
        (self.0 as f64 / EMU_PER_HALF_POINT as f64).round() as i64
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.to_pt())
    }
}

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse the six hex digits WordprocessingML uses (`"003366"`).
    ///
    /// Returns `None` for `auto` and anything that is not six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(RgbColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl Alignment {
    /// Value written to `w:jc/@w:val`.
    pub fn as_wml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
            Alignment::Distribute => "distribute",
        }
    }
}

impl FromStr for Alignment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "left" | "start" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" | "end" => Ok(Alignment::Right),
            "both" => Ok(Alignment::Justify),
            "distribute" => Ok(Alignment::Distribute),
            _ => Err(()),
        }
    }
}

/// Line spacing of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSpacing {
    /// A multiple of single spacing (`1.0`, `1.15`, `2.0`, ...)
    Multiple(f64),
    /// An exact line height
    Exactly(Length),
    /// A minimum line height
    AtLeast(Length),
}

/// Text highlight colour, as named by `w:highlight/@w:val`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
    White,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
}

impl Highlight {
    pub fn as_wml(self) -> &'static str {
        match self {
            Highlight::Black => "black",
            Highlight::Blue => "blue",
            Highlight::Cyan => "cyan",
            Highlight::Green => "green",
            Highlight::Magenta => "magenta",
            Highlight::Red => "red",
            Highlight::Yellow => "yellow",
            Highlight::White => "white",
            Highlight::DarkBlue => "darkBlue",
            Highlight::DarkCyan => "darkCyan",
            Highlight::DarkGreen => "darkGreen",
            Highlight::DarkMagenta => "darkMagenta",
            Highlight::DarkRed => "darkRed",
            Highlight::DarkYellow => "darkYellow",
            Highlight::DarkGray => "darkGray",
            Highlight::LightGray => "lightGray",
        }
    }
}

impl FromStr for Highlight {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let highlight = match value {
            "black" => Highlight::Black,
            "blue" => Highlight::Blue,
            "cyan" => Highlight::Cyan,
            "green" => Highlight::Green,
            "magenta" => Highlight::Magenta,
            "red" => Highlight::Red,
            "yellow" => Highlight::Yellow,
            "white" => Highlight::White,
            "darkBlue" => Highlight::DarkBlue,
            "darkCyan" => Highlight::DarkCyan,
            "darkGreen" => Highlight::DarkGreen,
            "darkMagenta" => Highlight::DarkMagenta,
            "darkRed" => Highlight::DarkRed,
            "darkYellow" => Highlight::DarkYellow,
            "darkGray" => Highlight::DarkGray,
            "lightGray" => Highlight::LightGray,
            // "none" means no highlight, which the model expresses as absence
            _ => return Err(()),
        };
        Ok(highlight)
    }
}

/// Parse an OOXML on/off value. A missing `w:val` means "on".
pub(crate) fn parse_on_off(value: Option<&str>) -> bool {
    !matches!(value, Some("0" | "false" | "off"))
}
