//! Glob dialect used by restriction patterns.
//!
//! A pattern is translated into a single anchored regular expression and
//! matched against a `/`-separated path.
//!
//! | Syntax | Meaning |
//! |---|---|
//! | literal | matches itself exactly (case-sensitive) |
//! | `?` | exactly one character other than `/` |
//! | `*` | zero or more characters other than `/`, within a non-empty segment |
//! | `**` | as a whole segment: one or more segments when last, zero or more otherwise; elsewhere same as `*` |
//! | `[abc]` `[a-z]` `[!a]` `[^a]` | one character from (or not from) the class |
//! | `{a,b}` | brace alternation, expanded before translation |
//! | `@(a\|b)` | exactly one alternative |
//! | `?(a\|b)` | zero or one alternative |
//! | `*(a\|b)` | zero or more alternatives |
//! | `+(a\|b)` | one or more alternatives |
//! | `!(a\|b)` | anything, unless one alternative followed by the rest of the segment matches |
//! | leading `!` | inverts the whole glob; each further `!` toggles again |
//!
//! Wildcards match names starting with `.`. A segment that is not a plain
//! literal never matches an empty segment or the special segments `.` and
//! `..`. A `]` placed first in a class is literal. A brace set without a
//! top-level comma (`{a}`) is literal.
//!
//! There is no escape character. Callers normalize `\` to `/` before
//! compiling, so every backslash is a separator.
//!
//! Patterns without `!(` compile with [`regex`] and match in linear time.
//! Negation groups need a lookahead and compile with [`fancy_regex`], whose
//! backtracking is bounded; a match that exceeds the bound counts as no match.

use std::borrow::Cow;
use std::fmt::Write;

/// Errors from compiling a glob pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum GlobError {
    /// Pattern is empty.
    #[error("glob pattern must not be empty")]
    #[diagnostic(code(import_restrict::glob::empty))]
    Empty,

    /// A `[` without a closing `]`.
    #[error("unclosed character class")]
    #[diagnostic(code(import_restrict::glob::unclosed_class))]
    UnclosedClass,

    /// A class range whose start is after its end.
    #[error("invalid class range `{start}-{end}`")]
    #[diagnostic(code(import_restrict::glob::invalid_range))]
    InvalidRange {
        /// First character of the range.
        start: char,
        /// Last character of the range.
        end: char,
    },

    /// An extglob group without a closing `)`.
    #[error("unclosed extglob group")]
    #[diagnostic(code(import_restrict::glob::unclosed_group))]
    UnclosedGroup,

    /// A `{` without a closing `}`.
    #[error("unclosed brace expansion")]
    #[diagnostic(code(import_restrict::glob::unclosed_brace))]
    UnclosedBrace,

    /// A group delimiter outside of an extglob group.
    #[error("unexpected `{0}` outside of an extglob group")]
    #[diagnostic(
        code(import_restrict::glob::unexpected),
        help("extglob groups start with one of `@(`, `?(`, `*(`, `+(`, `!(`")
    )]
    Unexpected(char),

    /// A `/` inside a class or group.
    #[error("path separator is not allowed inside {within}")]
    #[diagnostic(code(import_restrict::glob::separator))]
    Separator {
        /// The construct that contained the separator.
        within: &'static str,
    },

    /// The translated expression was rejected by the regex engine.
    #[error("pattern does not compile: {0}")]
    #[diagnostic(code(import_restrict::glob::compile))]
    Compile(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    ExactlyOne,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
    Not,
}

impl GroupKind {
    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::ExactlyOne),
            '?' => Some(Self::ZeroOrOne),
            '*' => Some(Self::ZeroOrMore),
            '+' => Some(Self::OneOrMore),
            '!' => Some(Self::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CharClass {
    negated: bool,
    items: Vec<ClassItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    Star,
    Class(CharClass),
    Group(GroupKind, Vec<Vec<Token>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    GlobStar,
    Tokens(Vec<Token>),
}

#[derive(Debug, Clone)]
enum Engine {
    Linear(regex::Regex),
    Lookaround(fancy_regex::Regex),
}

/// A compiled glob pattern.
///
/// Compilation is pure: the same pattern text always yields an equal
/// matcher.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    source: String,
    inverted: bool,
    engine: Engine,
}

impl GlobMatcher {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or syntactically invalid.
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        let mut inverted = false;
        let mut body = pattern;
        while let Some(rest) = body.strip_prefix('!') {
            if rest.starts_with('(') {
                break;
            }
            inverted = !inverted;
            body = rest;
        }
        if body.is_empty() {
            return Err(GlobError::Empty);
        }

        let chars: Vec<char> = body.chars().collect();
        let mut lookaround = false;
        let mut alternatives = Vec::new();
        for alt in expand_braces(&chars)? {
            let segments = Parser {
                chars: &alt,
                pos: 0,
            }
            .segments()?;
            alternatives.push(translate(&segments, &mut lookaround));
        }
        let expr = format!("^(?:{})$", alternatives.join("|"));

        let engine = if lookaround {
            fancy_regex::Regex::new(&expr)
                .map(Engine::Lookaround)
                .map_err(|e| GlobError::Compile(e.to_string()))?
        } else {
            regex::Regex::new(&expr)
                .map(Engine::Linear)
                .map_err(|e| GlobError::Compile(e.to_string()))?
        };

        Ok(Self {
            source: pattern.to_string(),
            inverted,
            engine,
        })
    }

    /// Tests whether a `/`-separated path matches this pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        let path = encode_special_segments(path);
        let matched = match &self.engine {
            Engine::Linear(re) => re.is_match(&path),
            Engine::Lookaround(re) => re.is_match(&path).unwrap_or_else(|e| {
                tracing::warn!(pattern = %self.source, error = %e, "Glob match aborted");
                false
            }),
        };
        matched != self.inverted
    }

    /// Returns the pattern text this matcher was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for GlobMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobMatcher {}

impl std::fmt::Display for GlobMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

// ────────────────────────────────────────────
// Brace expansion
// ────────────────────────────────────────────

/// Returns the index of the `]` closing the class opened at `open`.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars
        .get(i..)?
        .iter()
        .position(|&c| c == ']')
        .map(|p| i + p)
}

/// Advances past a character class starting at `i`, or past one char.
fn skip(chars: &[char], i: usize) -> usize {
    if chars[i] == '[' {
        class_end(chars, i).map_or(i + 1, |end| end + 1)
    } else {
        i + 1
    }
}

fn find_brace_open(chars: &[char]) -> Option<usize> {
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' {
            return Some(i);
        }
        i = skip(chars, i);
    }
    None
}

fn matching_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i = skip(chars, i);
    }
    None
}

fn split_top_level_commas(body: &[char]) -> Vec<&[char]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i = skip(body, i);
    }
    parts.push(&body[start..]);
    parts
}

fn expand_braces(chars: &[char]) -> Result<Vec<Vec<char>>, GlobError> {
    let Some(open) = find_brace_open(chars) else {
        return Ok(vec![chars.to_vec()]);
    };
    let close = matching_brace(chars, open).ok_or(GlobError::UnclosedBrace)?;
    let prefix = &chars[..open];
    let body = &chars[open + 1..close];
    let suffixes = expand_braces(&chars[close + 1..])?;

    let parts = split_top_level_commas(body);
    let middles: Vec<Vec<char>> = if parts.len() < 2 {
        expand_braces(body)?
            .into_iter()
            .map(|inner| {
                let mut literal = Vec::with_capacity(inner.len() + 2);
                literal.push('{');
                literal.extend(inner);
                literal.push('}');
                literal
            })
            .collect()
    } else {
        let mut out = Vec::new();
        for part in parts {
            out.extend(expand_braces(part)?);
        }
        out
    };

    let mut expanded = Vec::with_capacity(middles.len() * suffixes.len());
    for middle in &middles {
        for suffix in &suffixes {
            let mut alt = prefix.to_vec();
            alt.extend_from_slice(middle);
            alt.extend_from_slice(suffix);
            expanded.push(alt);
        }
    }
    Ok(expanded)
}

// ────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn segments(mut self) -> Result<Vec<Segment>, GlobError> {
        let mut segments = Vec::new();
        loop {
            let start = self.pos;
            let tokens = self.sequence(false)?;
            if matches!(&self.chars[start..self.pos], ['*', '*']) {
                segments.push(Segment::GlobStar);
            } else {
                segments.push(Segment::Tokens(tokens));
            }
            if self.peek() == Some('/') {
                self.pos += 1;
            } else {
                return Ok(segments);
            }
        }
    }

    fn sequence(&mut self, in_group: bool) -> Result<Vec<Token>, GlobError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if self.peek_next() == Some('(') {
                if let Some(kind) = GroupKind::from_prefix(c) {
                    self.pos += 2;
                    let alternatives = self.group()?;
                    tokens.push(Token::Group(kind, alternatives));
                    continue;
                }
            }
            match c {
                '/' if in_group => {
                    return Err(GlobError::Separator {
                        within: "an extglob group",
                    })
                }
                '/' => return Ok(tokens),
                '|' | ')' if in_group => return Ok(tokens),
                '|' | ')' | '(' => return Err(GlobError::Unexpected(c)),
                '*' => {
                    self.pos += 1;
                    if !matches!(tokens.last(), Some(Token::Star)) {
                        tokens.push(Token::Star);
                    }
                }
                '?' => {
                    self.pos += 1;
                    tokens.push(Token::AnyChar);
                }
                '[' => {
                    let class = self.class()?;
                    tokens.push(Token::Class(class));
                }
                _ => {
                    self.pos += 1;
                    tokens.push(Token::Literal(c));
                }
            }
        }
        if in_group {
            Err(GlobError::UnclosedGroup)
        } else {
            Ok(tokens)
        }
    }

    fn group(&mut self) -> Result<Vec<Vec<Token>>, GlobError> {
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.sequence(true)?);
            match self.peek() {
                Some('|') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    return Ok(alternatives);
                }
                _ => return Err(GlobError::UnclosedGroup),
            }
        }
    }

    fn class(&mut self) -> Result<CharClass, GlobError> {
        let end = class_end(self.chars, self.pos).ok_or(GlobError::UnclosedClass)?;
        let mut start = self.pos + 1;
        let negated = matches!(self.chars.get(start), Some('!' | '^'));
        if negated {
            start += 1;
        }
        let body = &self.chars[start..end];
        if body.contains(&'/') {
            return Err(GlobError::Separator {
                within: "a character class",
            });
        }

        let mut items = Vec::new();
        let mut i = 0;
        while i < body.len() {
            if i + 2 < body.len() && body[i + 1] == '-' {
                let (start, end) = (body[i], body[i + 2]);
                if start > end {
                    return Err(GlobError::InvalidRange { start, end });
                }
                items.push(ClassItem::Range(start, end));
                i += 3;
            } else {
                items.push(ClassItem::Char(body[i]));
                i += 1;
            }
        }

        self.pos = end + 1;
        Ok(CharClass { negated, items })
    }
}

// ────────────────────────────────────────────
// Translation
// ────────────────────────────────────────────

/// Prefix marking empty, `.` and `..` path segments. Wildcards exclude it,
/// so only a literal pattern segment can match a marked one.
const MARK: char = '\0';

/// One character a wildcard may consume.
const WILD: &str = r"[^/\x00]";

/// One whole segment for `**`.
const ANY_SEGMENT: &str = r"[^/\x00][^/]*";

fn is_special_segment(segment: &str) -> bool {
    matches!(segment, "" | "." | "..")
}

fn encode_special_segments(path: &str) -> Cow<'_, str> {
    if !path.split('/').any(is_special_segment) {
        return Cow::Borrowed(path);
    }
    let encoded: Vec<Cow<'_, str>> = path
        .split('/')
        .map(|segment| {
            if is_special_segment(segment) {
                Cow::Owned(format!("{MARK}{segment}"))
            } else {
                Cow::Borrowed(segment)
            }
        })
        .collect();
    Cow::Owned(encoded.join("/"))
}

fn escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}

fn translate(segments: &[Segment], lookaround: &mut bool) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        match segment {
            Segment::GlobStar if last => {
                let _ = write!(out, "{ANY_SEGMENT}(?:/{ANY_SEGMENT})*");
            }
            Segment::GlobStar => {
                let _ = write!(out, "(?:{ANY_SEGMENT}/)*");
            }
            Segment::Tokens(tokens) => {
                out.push_str(&translate_segment(tokens, lookaround));
                if !last {
                    out.push('/');
                }
            }
        }
    }
    out
}

fn translate_segment(tokens: &[Token], lookaround: &mut bool) -> String {
    let literal: Option<String> = tokens
        .iter()
        .map(|token| match token {
            Token::Literal(c) => Some(*c),
            _ => None,
        })
        .collect();
    match literal {
        Some(text) if is_special_segment(&text) => {
            format!(r"\x00{}", regex::escape(&text))
        }
        _ => translate_tokens(tokens, "", lookaround),
    }
}

/// Translates right to left so each negation group sees what follows it.
fn translate_tokens(tokens: &[Token], rest: &str, lookaround: &mut bool) -> String {
    let mut acc = String::new();
    for token in tokens.iter().rev() {
        let piece = match token {
            Token::Literal(c) => escape_char(*c),
            Token::AnyChar => WILD.to_string(),
            Token::Star => format!("{WILD}*"),
            Token::Class(class) => translate_class(class),
            Token::Group(kind, alternatives) => {
                let following = format!("{acc}{rest}");
                let body = alternatives
                    .iter()
                    .map(|alt| translate_tokens(alt, &following, lookaround))
                    .collect::<Vec<_>>()
                    .join("|");
                match kind {
                    GroupKind::ExactlyOne => format!("(?:{body})"),
                    GroupKind::ZeroOrOne => format!("(?:{body})?"),
                    GroupKind::ZeroOrMore => format!("(?:{body})*"),
                    GroupKind::OneOrMore => format!("(?:{body})+"),
                    GroupKind::Not => {
                        *lookaround = true;
                        format!("(?:(?!(?:{body}){following}(?:/|$)){WILD}*?)")
                    }
                }
            }
        };
        acc.insert_str(0, &piece);
    }
    acc
}

fn translate_class(class: &CharClass) -> String {
    let mut out = String::from(if class.negated { r"[^/\x00" } else { "[" });
    for item in &class.items {
        match *item {
            ClassItem::Char(c) => out.push_str(&escape_char(c)),
            ClassItem::Range(start, end) => push_range(&mut out, start, end),
        }
    }
    out.push(']');
    out
}

/// Pushes `start-end`, leaving out `/` and the segment mark.
fn push_range(out: &mut String, start: char, end: char) {
    let start = if start == MARK { '\u{1}' } else { start };
    if start > end {
        return;
    }
    if start <= '/' && '/' <= end {
        if start < '/' {
            let _ = write!(out, "{}-{}", escape_char(start), escape_char('.'));
        }
        if '/' < end {
            let _ = write!(out, "{}-{}", escape_char('0'), escape_char(end));
        }
    } else {
        let _ = write!(out, "{}-{}", escape_char(start), escape_char(end));
    }
}
