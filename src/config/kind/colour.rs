//! Colour definitions: a foreground, a background and a bold flag.

use super::ValueError;
use std::fmt;

/// Palette names in terminal colour-number order.
const PALETTE: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A colour from the terminal palette.
///
/// The eight basic colours are addressed by name. Terminals with larger
/// palettes can be addressed by number (`0`-`255`); numbers below 8 are
/// folded into their named equivalent. `#rrggbb` asks for a redefined
/// palette slot, which only terminals with `tcap.rgb` can honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColour {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl PaletteColour {
    /// Parse a palette name (case-insensitive) or number.
    pub fn parse(token: &str) -> Result<Self, ValueError> {
        if let Some(pos) = PALETTE
            .iter()
            .position(|name| name.eq_ignore_ascii_case(token))
        {
            return Ok(Self::from_index(pos as u8));
        }
        if let Some(hex) = token.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ValueError::UnknownColour(token.to_string()));
        }
        token
            .parse::<u8>()
            .map(Self::from_index)
            .map_err(|_| ValueError::UnknownColour(token.to_string()))
    }

    /// Terminal colour number; `None` for RGB colours.
    pub const fn index(&self) -> Option<u8> {
        match self {
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
            Self::Indexed(n) => Some(*n),
            Self::Rgb(..) => None,
        }
    }

    const fn from_index(n: u8) -> Self {
        match n {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            7 => Self::White,
            n => Self::Indexed(n),
        }
    }
}

/// Six hex digits, `rrggbb`.
fn parse_hex(hex: &str) -> Option<PaletteColour> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some(PaletteColour::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl fmt::Display for PaletteColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.index()) {
            (Self::Rgb(r, g, b), _) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            (Self::Indexed(n), _) => write!(f, "{n}"),
            (_, Some(n)) => f.write_str(PALETTE[usize::from(n)]),
            (_, None) => unreachable!("named colours always have an index"),
        }
    }
}

/// A complete colour definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    pub fg: PaletteColour,
    pub bg: PaletteColour,
    pub bold: bool,
}

impl Colour {
    pub const fn new(fg: PaletteColour, bg: PaletteColour, bold: bool) -> Self {
        Self { fg, bg, bold }
    }

    /// Parse the three colour fields: foreground, background, bold flag.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ValueError> {
        let [fg, bg, bold] = tokens else {
            return Err(ValueError::ColourArity(tokens.len()));
        };
        Ok(Self {
            fg: PaletteColour::parse(fg)?,
            bg: PaletteColour::parse(bg)?,
            bold: super::value::parse_bool(bold)?,
        })
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.fg, self.bg, self.bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names_are_case_insensitive() {
        assert_eq!(PaletteColour::parse("white"), Ok(PaletteColour::White));
        assert_eq!(PaletteColour::parse("MAGENTA"), Ok(PaletteColour::Magenta));
        assert_eq!(PaletteColour::parse("Cyan"), Ok(PaletteColour::Cyan));
    }

    #[test]
    fn test_palette_numbers() {
        assert_eq!(PaletteColour::parse("1"), Ok(PaletteColour::Red));
        assert_eq!(PaletteColour::parse("208"), Ok(PaletteColour::Indexed(208)));
        assert_eq!(PaletteColour::Indexed(208).to_string(), "208");
        assert!(PaletteColour::parse("256").is_err());
        assert!(PaletteColour::parse("-1").is_err());
    }

    #[test]
    fn test_rgb_colours() {
        assert_eq!(PaletteColour::parse("#ff8000"), Ok(PaletteColour::Rgb(255, 128, 0)));
        assert_eq!(PaletteColour::parse("#FF8000"), Ok(PaletteColour::Rgb(255, 128, 0)));
        assert_eq!(PaletteColour::Rgb(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(PaletteColour::Rgb(1, 2, 3).index(), None);
        for token in ["#ff80", "#ff80000", "#gg8000", "#", "#+f8000"] {
            assert_eq!(
                PaletteColour::parse(token),
                Err(ValueError::UnknownColour(token.into())),
                "{token}"
            );
        }
    }

    #[test]
    fn test_unknown_colour() {
        assert_eq!(
            PaletteColour::parse("purple"),
            Err(ValueError::UnknownColour("purple".into()))
        );
    }

    #[test]
    fn test_colour_from_tokens() {
        let colour = Colour::from_tokens(&["yellow", "red", "true"]).unwrap();
        assert_eq!(
            colour,
            Colour::new(PaletteColour::Yellow, PaletteColour::Red, true)
        );
        assert_eq!(colour.to_string(), "yellow, red, true");
    }

    #[test]
    fn test_colour_arity() {
        assert_eq!(
            Colour::from_tokens(&["white", "black"]),
            Err(ValueError::ColourArity(2))
        );
        assert_eq!(
            Colour::from_tokens(&["white", "black", "false", "x"]),
            Err(ValueError::ColourArity(4))
        );
    }

    #[test]
    fn test_colour_bad_bold_flag() {
        assert!(matches!(
            Colour::from_tokens(&["white", "black", "maybe"]),
            Err(ValueError::Bool(_))
        ));
    }
}
