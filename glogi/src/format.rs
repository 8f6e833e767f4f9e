//! Line rendering.
//!
//! ```text
//! [2025/12/26 15:04:05] INFO  [main.rs:42          ] server started port=8080
//! ```
//!
//! The level token is always five characters and the call-site column is
//! always exactly `source_width` characters (truncated or space-padded).

use crate::color::paint;
use crate::config::Config;
use crate::record::{CallSite, Record};
use crate::value::Attr;

pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Width of the level token.
pub const LEVEL_WIDTH: usize = 5;

/// Render one newline-terminated line.
///
/// `bound` are handler-level attributes; they follow the record's own.
pub fn render(record: &Record, bound: &[Attr], config: &Config) -> String {
    let colors = config.colors_enabled();
    let level_color = config.palette.for_level(record.level);

    let time = record.time.format(TIME_FORMAT);
    let level = paint(
        &format!("{:<width$}", record.level, width = LEVEL_WIDTH),
        level_color,
        colors,
    );
    let source = record
        .call_site
        .as_ref()
        .map(|site| {
            let column = fit_column(site, config.source_width);
            paint(&format!("[{column}]"), &config.palette.source, colors)
        })
        .unwrap_or_default();

    let mut body = record.message.clone();
    for attr in record.attrs.iter().chain(bound) {
        body.push(' ');
        body.push_str(&attr.to_string());
    }
    let body = paint(&body, level_color, colors);

    format!("[{time}] {level} {source} {body}\n")
}

/// Truncate or right-pad `file:line` to exactly `width` characters.
fn fit_column(site: &CallSite, width: usize) -> String {
    let short = site.short();
    if short.chars().count() > width {
        short.chars().take(width).collect()
    } else {
        format!("{short:<width$}")
    }
}
