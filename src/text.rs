#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Text(String),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::Text(s.to_string())
    }
}

impl From<String> for Indent {
    fn from(s: String) -> Self {
        Indent::Text(s)
    }
}

impl Indent {
    fn prefix(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(*n),
            Indent::Text(s) => s.clone(),
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits after each line terminator, keeping it. `\r\n` counts as one.
fn lines_with_endings(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some((_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        lines.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Prefixes every line of `text` with `indent`, keeping line terminators.
pub fn indent(text: &str, indent: impl Into<Indent>) -> String {
    let prefix = indent.into().prefix();
    lines_with_endings(text)
        .into_iter()
        .map(|line| format!("{prefix}{line}"))
        .collect()
}
