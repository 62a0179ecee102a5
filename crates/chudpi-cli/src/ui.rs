//! UI helpers for CLI display.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Print a styled header.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

/// Print a labelled value, label dimmed.
pub fn print_field(label: &str, value: &str) {
    if is_color_disabled() {
        println!("{label:<14} {value}");
    } else {
        println!("{} {value}", style(format!("{label:<14}")).dim());
    }
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_functions_do_not_panic() {
        print_header("Chudnovsky");
        print_field("Terms:", "7");
        print_error("something went wrong");
    }

    #[test]
    fn print_functions_with_empty_text() {
        print_header("");
        print_field("", "");
        print_error("");
    }
}
