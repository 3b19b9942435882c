use log::warn;

/// Upper bound on the raw text of a single command line, in bytes.
pub const MAX_LINE_BYTES: usize = 25600;
/// Upper bound on the number of tokens kept from a single line.
pub const MAX_ARGS: usize = 256;

const DELIMITERS: [char; 4] = [' ', '\t', '\n', '\r'];
const DETACH_SWITCH: &str = "&";

/// One tokenized line of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<String>,
    detached: bool,
}

impl CommandLine {
    pub fn parse(line: &str) -> Self {
        Self::parse_with_limit(line, MAX_ARGS)
    }

    /// Splits `line` on whitespace, keeping at most `max_args` tokens. A trailing
    /// `&` token is removed and marks the line as detached.
    pub fn parse_with_limit(line: &str, max_args: usize) -> Self {
        let line = bounded(line);

        let mut tokens = line.split(DELIMITERS).filter(|token| !token.is_empty());
        let mut args: Vec<String> = tokens.by_ref().take(max_args).map(String::from).collect();
        let dropped = tokens.count();
        if dropped > 0 {
            warn!("too many arguments, ignoring the last {}", dropped);
        }

        let detached = args.last().is_some_and(|last| last == DETACH_SWITCH);
        if detached {
            args.pop();
        }

        CommandLine { args, detached }
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }
}

fn bounded(line: &str) -> &str {
    if line.len() <= MAX_LINE_BYTES {
        return line;
    }

    let mut end = MAX_LINE_BYTES;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    warn!("input longer than {} bytes, truncating", MAX_LINE_BYTES);
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_keep_order() {
        let line = CommandLine::parse("ls -la /tmp\n");
        assert_eq!(line.args(), ["ls", "-la", "/tmp"]);
        assert_eq!(line.program(), Some("ls"));
        assert!(!line.is_detached());
    }

    #[test]
    fn test_mixed_delimiters() {
        let line = CommandLine::parse("  echo\thello \r\n  world  ");
        assert_eq!(line.args(), ["echo", "hello", "world"]);
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_trailing_ampersand_detaches() {
        let line = CommandLine::parse("sleep 5 &\n");
        assert_eq!(line.args(), ["sleep", "5"]);
        assert!(line.is_detached());
    }

    #[test]
    fn test_ampersand_only_detaches_when_last() {
        let line = CommandLine::parse("echo & done");
        assert_eq!(line.args(), ["echo", "&", "done"]);
        assert!(!line.is_detached());

        let line = CommandLine::parse("sleep 5&");
        assert_eq!(line.args(), ["sleep", "5&"]);
        assert!(!line.is_detached());
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "\n", "\t\r\n"] {
            let line = CommandLine::parse(input);
            assert!(line.is_empty());
            assert_eq!(line.program(), None);
            assert!(!line.is_detached());
        }
    }

    #[test]
    fn test_lone_ampersand_is_empty() {
        let line = CommandLine::parse("&");
        assert!(line.is_empty());
        assert!(line.is_detached());
    }

    #[test]
    fn test_no_quoting() {
        let line = CommandLine::parse("echo \"a b\" c\\ d");
        assert_eq!(line.args(), ["echo", "\"a", "b\"", "c\\", "d"]);
    }

    #[test]
    fn test_argument_cap() {
        let line = CommandLine::parse_with_limit("a b c d e", 3);
        assert_eq!(line.args(), ["a", "b", "c"]);

        let input = vec!["x"; MAX_ARGS + 10].join(" ");
        assert_eq!(CommandLine::parse(&input).len(), MAX_ARGS);
    }

    #[test]
    fn test_line_is_bounded() {
        let input = format!("echo {}", "é".repeat(MAX_LINE_BYTES));
        let line = CommandLine::parse(&input);
        assert_eq!(line.len(), 2);
        assert!(line.args()[1].len() < MAX_LINE_BYTES);
    }
}
