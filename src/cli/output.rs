//! Colored terminal diagnostics.
//!
//! Rendered variables go to stdout untouched; everything meant for the
//! human goes to stderr through these helpers.

use console::style;

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}
