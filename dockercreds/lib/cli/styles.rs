use clap::builder::styling::{AnsiColor, Effects, Style, Styles};
use std::{
    fmt::Write,
    io::{self, IsTerminal},
    sync::LazyLock,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Whether stderr is an ANSI-capable interactive terminal
static IS_ANSI_TERMINAL: LazyLock<bool> = LazyLock::new(|| {
    io::stderr().is_terminal() && std::env::var("TERM").map_or(true, |term| term != "dumb")
});

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns a `Styles` object with the default styles for the CLI.
pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Green.on_default() | Effects::BOLD)
        .invalid(AnsiColor::Red.on_default() | Effects::BOLD)
}

fn apply_style(text: &str, style: &Style, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }

    let mut styled = String::with_capacity(text.len() + 20);
    let _ = write!(styled, "{}", style);
    styled.push_str(text);
    let _ = write!(styled, "{}", style.render_reset());
    styled
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// A trait for applying Styles defined in [`styles`] to text written to stderr.
pub trait AnsiStyles {
    /// Apply literal style to text
    fn literal(&self) -> String;

    /// Apply error style to text
    fn error(&self) -> String;
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl AnsiStyles for str {
    fn literal(&self) -> String {
        apply_style(self, styles().get_literal(), *IS_ANSI_TERMINAL)
    }

    fn error(&self) -> String {
        apply_style(self, styles().get_error(), *IS_ANSI_TERMINAL)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_style() {
        assert_eq!(apply_style("test", styles().get_error(), false), "test");

        let error = apply_style("test", styles().get_error(), true);
        assert!(error.contains("\x1b[1m"));
        assert!(error.contains("\x1b[31m"));
        assert!(error.contains("test"));
        assert!(error.ends_with("\x1b[0m"));

        let placeholder = apply_style("test", styles().get_placeholder(), true);
        assert!(placeholder.contains("\x1b[32m"));
        assert!(!placeholder.contains("\x1b[1m"));
    }
}
