//! Keyed line patching for vendor config templates
//!
//! Templates are either flat Java properties (`key=value`) or indented block
//! files (`key: value`, nested by indentation). Only the value of a line whose
//! key matches an override is rewritten; indentation, spacing, comments and
//! every other line come through byte for byte.
//!
//! Nested keys are addressed by their dotted path, so `max-players` inside the
//! `bedrock:` block is `bedrock.max-players`. Flat files have no nesting, so
//! their keys are used as-is.

use std::collections::BTreeMap;


/// Replacement values keyed by flat key or dotted key path
pub type Overrides = BTreeMap<String, String>;

/// A template line split into its parts
#[derive(Debug, PartialEq, Eq)]
struct KeyedLine<'a> {
    indent: &'a str,
    key: &'a str,
    /// Separator plus any whitespace around it
    separator: &'a str,
    value: &'a str,
    /// Whitespace between the value and the comment
    trailing: &'a str,
    comment: &'a str,
}

impl KeyedLine<'_> {
    fn with_value(&self, value: &str) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.indent, self.key, self.separator, value, self.trailing, self.comment
        )
    }
}

/// Split `line` at the first `#` that is neither escaped nor inside quotes
///
/// A quote only opens at the start of a token, so apostrophes inside words
/// (`Geyser's`) do not hide a following comment.
fn split_comment(line: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = ' ';
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            prev = c;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            ('"' | '\'', Some(q)) if q == c => quote = None,
            ('"' | '\'', None) if prev.is_whitespace() || prev == ':' || prev == '=' => {
                quote = Some(c);
            }
            ('#', None) => return line.split_at(i),
            _ => {}
        }
        prev = c;
    }
    (line, "")
}

fn leading_whitespace(s: &str) -> &str {
    &s[..s.len() - s.trim_start().len()]
}

fn trailing_whitespace(s: &str) -> &str {
    &s[s.trim_end().len()..]
}

/// Parse one line. `None` means the line has no usable key.
fn parse_line(line: &str) -> Option<KeyedLine<'_>> {
    let (active, comment) = split_comment(line);
    let indent = leading_whitespace(active);
    let body = &active[indent.len()..];

    let sep = body.find([':', '='])?;
    let key = body[..sep].trim_end();
    if key.is_empty() {
        return None;
    }

    let rest = &body[sep + 1..];
    let after_sep = leading_whitespace(rest);
    let value_and_trailing = &rest[after_sep.len()..];
    let trailing = trailing_whitespace(value_and_trailing);
    let value = &value_and_trailing[..value_and_trailing.len() - trailing.len()];

    let separator_start = indent.len() + key.len();
    let separator_end = indent.len() + sep + 1 + after_sep.len();

    Some(KeyedLine {
        indent,
        key,
        separator: &active[separator_start..separator_end],
        value,
        trailing,
        comment,
    })
}

/// Ancestor keys of the line being read
#[derive(Debug, Default)]
struct KeyPath {
    /// (indent width, key) per open block, outermost first
    open: Vec<(usize, String)>,
}

impl KeyPath {
    /// Place `key` at indentation `depth` and return its dotted path
    ///
    /// Every open block indented at or beyond `depth` is closed first, so a
    /// dedent of several levels in one step lands on the right parent.
    fn place(&mut self, depth: usize, key: &str) -> String {
        while self.open.last().is_some_and(|(indent, _)| *indent >= depth) {
            self.open.pop();
        }
        let mut full_key = String::new();
        for (_, ancestor) in &self.open {
            full_key.push_str(ancestor);
            full_key.push('.');
        }
        full_key.push_str(key);
        self.open.push((depth, key.to_string()));
        full_key
    }
}

/// Whether `value` can replace a value without adding lines
pub fn is_single_line(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

/// Rewrite the values of matching keys in `lines`
///
/// The output always has exactly as many lines as the input, so values with
/// line breaks are never substituted. Lines without a
/// key, blank lines and comment-only lines never affect nesting.
pub fn patch<S: AsRef<str>>(lines: &[S], overrides: &Overrides) -> Vec<String> {
    let mut path = KeyPath::default();
    let mut applied = 0usize;

    let output = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.trim().is_empty() {
                return line.to_string();
            }
            let Some(parsed) = parse_line(line) else {
                return line.to_string();
            };

            let full_key = path.place(parsed.indent.len(), parsed.key);
            match overrides.get(&full_key).filter(|value| is_single_line(value)) {
                Some(value) => {
                    applied += 1;
                    tracing::debug!(key = %full_key, old = parsed.value, new = %value, "patched");
                    parsed.with_value(value)
                }
                None => line.to_string(),
            }
        })
        .collect();

    if applied < overrides.len() {
        tracing::debug!(
            applied,
            requested = overrides.len(),
            "some overrides matched no template key"
        );
    }
    output
}

/// Patch a whole template file, keeping its final newline (or lack of one)
pub fn patch_text(text: &str, overrides: &Overrides) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    patch(&lines, overrides).join("\n")
}

/// Keys of `overrides` that no line of `text` carries
pub fn unmatched_keys(text: &str, overrides: &Overrides) -> Vec<String> {
    let mut path = KeyPath::default();
    let present: Vec<String> = text
        .lines()
        .filter_map(parse_line)
        .map(|parsed| path.place(parsed.indent.len(), parsed.key))
        .collect();

    overrides
        .keys()
        .filter(|key| !present.contains(key))
        .cloned()
        .collect()
}
