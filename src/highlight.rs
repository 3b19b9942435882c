use inksac::prelude::*;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// For messages written to stderr: plain unless stderr is a terminal.
    pub fn for_stderr() -> Self {
        Self::for_terminal(std::io::stderr().is_terminal())
    }

    pub fn for_terminal(is_terminal: bool) -> Self {
        if is_terminal {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the command word (built-ins and programs differently) and a
    /// trailing `&`. Whitespace is left untouched so cursor positions hold.
    pub fn highlight_command(&self, input: &str, is_builtin: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let start = input.len() - input.trim_start().len();
        let rest = &input[start..];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if word_len == 0 {
            return input.to_string();
        }

        let word = &rest[..word_len];
        let word_style = if is_builtin(word) {
            Style::builder().foreground(Color::Green).bold().build()
        } else {
            Style::builder().foreground(Color::Cyan).bold().build()
        };

        let mut highlighted = String::with_capacity(input.len() + 32);
        highlighted.push_str(&input[..start]);
        highlighted.push_str(&word.style(word_style).to_string());

        let tail = &rest[word_len..];
        match detach_position(tail) {
            Some(amp) => {
                let detach_style = Style::builder().foreground(Color::Yellow).build();
                highlighted.push_str(&tail[..amp]);
                highlighted.push_str(&"&".style(detach_style).to_string());
                highlighted.push_str(&tail[amp + 1..]);
            }
            None => highlighted.push_str(tail),
        }

        highlighted
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }
}

/// Byte offset of a trailing standalone `&` within `tail`, if any.
fn detach_position(tail: &str) -> Option<usize> {
    let trimmed = tail.trim_end();
    let before = trimmed.strip_suffix('&')?;
    if before.ends_with(char::is_whitespace) {
        Some(before.len())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        let line = "  sleep\t5 &  ";
        assert_eq!(highlighter.highlight_command(line, |_| false), line);
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }

    #[test]
    fn test_no_colour_off_terminal() {
        let highlighter = SyntaxHighlighter::for_terminal(false);
        assert_eq!(highlighter.highlight_error("nook: cd: /x"), "nook: cd: /x");
        assert_eq!(highlighter.highlight_command("cd /tmp &", |_| true), "cd /tmp &");
    }

    #[test]
    fn test_detach_position() {
        assert_eq!(detach_position(" 5 &"), Some(3));
        assert_eq!(detach_position(" 5 &  "), Some(3));
        assert_eq!(detach_position(" 5&"), None);
        assert_eq!(detach_position(" 5"), None);
        assert_eq!(detach_position(""), None);
    }
}
