//! ANSI color resolution for configuration values.
//!
//! A configured color may be a name (`red`), a bare SGR code (`31`), a full
//! escape sequence (`\x1b[31m`, or `\033[31m` typed as text in a shell), or
//! `none`/`off`. Resolution never fails: unknown input is used verbatim.

use std::borrow::Cow;
use std::fmt;

pub const ESC: char = '\x1b';

/// Textual spellings of ESC that show up when a sequence is typed into an env var.
const ESC_PLACEHOLDERS: [&str; 4] = ["\\033", "\\x1b", "\\x1B", "\\e"];

/// A resolved terminal escape sequence. Empty means "no color".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorCode(Cow<'static, str>);

impl ColorCode {
    pub const NONE: ColorCode = ColorCode::from_static("");
    pub const RESET: ColorCode = ColorCode::from_static("\x1b[0m");
    pub const RED: ColorCode = ColorCode::from_static("\x1b[31m");
    pub const GREEN: ColorCode = ColorCode::from_static("\x1b[32m");
    pub const YELLOW: ColorCode = ColorCode::from_static("\x1b[33m");
    pub const BLUE: ColorCode = ColorCode::from_static("\x1b[34m");
    pub const MAGENTA: ColorCode = ColorCode::from_static("\x1b[35m");
    pub const CYAN: ColorCode = ColorCode::from_static("\x1b[36m");
    pub const WHITE: ColorCode = ColorCode::from_static("\x1b[37m");
    pub const DARK_GRAY: ColorCode = ColorCode::from_static("\x1b[90m");

    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a configuration value into an escape sequence.
pub fn resolve(input: &str) -> ColorCode {
    let input = input.trim();
    if input.is_empty() {
        return ColorCode::NONE;
    }
    if let Some(named) = named(input) {
        return named;
    }
    if input.contains(ESC) || ESC_PLACEHOLDERS.iter().any(|p| input.contains(p)) {
        let mut code = input.to_string();
        for placeholder in ESC_PLACEHOLDERS {
            code = code.replace(placeholder, "\x1b");
        }
        return ColorCode(Cow::Owned(code));
    }
    if input.parse::<i64>().is_ok() {
        return ColorCode(Cow::Owned(format!("{ESC}[{input}m")));
    }
    ColorCode(Cow::Owned(input.to_string()))
}

fn named(input: &str) -> Option<ColorCode> {
    let code = match input.to_ascii_lowercase().as_str() {
        "red" => ColorCode::RED,
        "green" => ColorCode::GREEN,
        "yellow" => ColorCode::YELLOW,
        "blue" => ColorCode::BLUE,
        "magenta" => ColorCode::MAGENTA,
        "cyan" => ColorCode::CYAN,
        "white" => ColorCode::WHITE,
        "gray" | "grey" => ColorCode::DARK_GRAY,
        "none" | "off" => ColorCode::NONE,
        _ => return None,
    };
    Some(code)
}

/// Wrap `text` in `color` followed by a reset, or return it unchanged when no color applies.
pub(crate) fn paint(text: &str, color: &ColorCode, enabled: bool) -> String {
    if !enabled || color.is_empty() {
        return text.to_string();
    }
    format!("{color}{text}{}", ColorCode::RESET)
}
