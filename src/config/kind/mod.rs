//! Value kinds.
//!
//! | Kind      | Raw form                          | Value                 |
//! |-----------|-----------------------------------|-----------------------|
//! | `bool`    | `true` / `false`                  | [`ConfigValue::Bool`] |
//! | `trit`    | `true` / `false` / `auto`         | [`ConfigValue::Trit`] |
//! | `int`     | signed decimal within `[min,max]` | [`ConfigValue::Int`]  |
//! | `string`  | raw bytes                         | [`ConfigValue::Str`]  |
//! | `wstring` | UTF-8 text                        | [`ConfigValue::WStr`] |
//! | `colour`  | `fg, bg, bold`                    | [`ConfigValue::Colour`] |
//! | `key`     | one to eight key tokens           | [`ConfigValue::Key`]  |

mod colour;
mod key;
mod value;

pub use colour::{Colour, PaletteColour};
pub use key::{KeyCode, MAX_KEYS};
pub use value::{ConfigValue, Trit, ValueError, tokenize};

/// The kind of an option together with its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Trit,
    /// Integer within an inclusive range.
    Int { min: i64, max: i64 },
    /// Byte string; `nullable` options may be absent.
    Str { nullable: bool },
    /// Unicode string; `nullable` options may be absent.
    WStr { nullable: bool },
    Colour,
    Key,
}

impl Kind {
    /// Type tag as written in documentation.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Trit => "trit",
            Self::Int { .. } => "int",
            Self::Str { .. } => "string",
            Self::WStr { .. } => "wstring",
            Self::Colour => "colour",
            Self::Key => "key",
        }
    }

    /// Expected textual form, used as a hint in diagnostics.
    pub fn syntax(&self) -> String {
        match self {
            Self::Bool => "expected `true` or `false`".to_string(),
            Self::Trit => "expected `true`, `false` or `auto`".to_string(),
            Self::Int { min, max } => format!("expected an integer between {min} and {max}"),
            Self::Str { nullable: true } | Self::WStr { nullable: true } => {
                "expected a string (leave empty to unset)".to_string()
            }
            Self::Str { nullable: false } | Self::WStr { nullable: false } => {
                "expected a non-empty string".to_string()
            }
            Self::Colour => "expected `<foreground>, <background>, <bold>` where colours are \
                             black, red, green, yellow, blue, magenta, cyan, white, 0-255 or #rrggbb"
                .to_string(),
            Self::Key => format!(
                "expected 1 to {MAX_KEYS} keys: single characters or names such as KEY_UP, LF, SPACE"
            ),
        }
    }
}
