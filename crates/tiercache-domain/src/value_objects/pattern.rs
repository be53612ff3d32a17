//! Glob key patterns
//!
//! Patterns follow Redis `MATCH`: `*` matches any run of characters, `?`
//! matches exactly one, `[abc]`, `[^abc]` and `[a-z]` match one character
//! from a class, and `\` escapes the next character. Unterminated or empty
//! classes are rejected, so a pattern never means one thing in memory and
//! another in Redis.

use crate::constants::CACHE_KEY_SEPARATOR;
use crate::error::{Error, Result};
use regex::Regex;

/// A compiled glob pattern over cache keys
#[derive(Debug, Clone)]
pub struct KeyPattern {
    glob: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile a glob into an anchored regex
    pub fn new(glob: &str) -> Result<Self> {
        let regex = Regex::new(&glob_to_regex(glob)?).map_err(|e| {
            Error::invalid_argument(format!("Invalid key pattern '{glob}': {e}"))
        })?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Whether a key matches the pattern
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The original glob
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Globs selecting the keys that embed `tag` as a whole segment
    ///
    /// This is the key convention the distributed tier uses to approximate tag
    /// invalidation: `tag:*`, `*:tag:*` and `*:tag`.
    pub fn tag_globs(tag: &str) -> [String; 3] {
        let tag = escape_glob(tag);
        let sep = CACHE_KEY_SEPARATOR;
        [
            format!("{tag}{sep}*"),
            format!("*{sep}{tag}{sep}*"),
            format!("*{sep}{tag}"),
        ]
    }
}

/// Escape glob metacharacters so `text` matches literally
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn glob_to_regex(glob: &str) -> Result<String> {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    let mut chars = glob.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => push_class(&mut out, &mut chars, glob)?,
            '\\' => push_literal(&mut out, chars.next().unwrap_or('\\')),
            other => push_literal(&mut out, other),
        }
    }
    out.push('$');
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Translate a class body up to its closing `]`
fn push_class(out: &mut String, chars: &mut std::str::Chars<'_>, glob: &str) -> Result<()> {
    let invalid = |what: &str| Error::invalid_argument(format!("{what} in key pattern '{glob}'"));

    // (char, escaped)
    let mut members: Vec<(char, bool)> = Vec::new();
    loop {
        match chars.next() {
            None => return Err(invalid("Unterminated character class")),
            Some(']') => break,
            Some('\\') => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| invalid("Unterminated character class"))?;
                members.push((escaped, true));
            }
            Some(c) => members.push((c, false)),
        }
    }

    let negated = members.first() == Some(&('^', false));
    let members = if negated { &members[1..] } else { &members[..] };
    if members.is_empty() {
        return Err(invalid("Empty character class"));
    }

    out.push('[');
    if negated {
        out.push('^');
    }
    let mut i = 0;
    while i < members.len() {
        let (start, _) = members[i];
        if i + 2 < members.len() && members[i + 1] == ('-', false) {
            // Redis accepts reversed ranges
            let (end, _) = members[i + 2];
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            out.push_str(&format!("\\x{{{:X}}}-\\x{{{:X}}}", u32::from(lo), u32::from(hi)));
            i += 3;
        } else {
            out.push_str(&format!("\\x{{{:X}}}", u32::from(start)));
            i += 1;
        }
    }
    out.push(']');
    Ok(())
}
