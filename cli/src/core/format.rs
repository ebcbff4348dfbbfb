//! # vcprompt Format Interpolation
//!
//! File: cli/src/core/format.rs
//!
//! ## Overview
//!
//! This module substitutes the five recognised tokens of a prompt template
//! with resolved values. Literal text and unrecognised `%x` sequences pass
//! through untouched, and every occurrence of a token is replaced.
//!
//! ## Architecture
//!
//! - `Token`: the recognised placeholders (`%s`, `%b`, `%h`, `%r`, `%i`).
//! - `interpolate`: scans the template once, left to right, and asks a
//!   resolver closure for a token's value the first time that token occurs.
//!   Resolved values are copied into the output verbatim, so a branch named
//!   `fix-%s` stays `fix-%s`.
//!
//! Resolution is lazy on purpose: probes pass a closure that reads metadata
//! files or spawns VCS commands, so a template without `%i` never runs a
//! status command.
//!
//! ## Examples
//!
//! ```rust
//! let out = format::interpolate("%s:%b", |token| match token {
//!     Token::System => "git".to_string(),
//!     Token::Branch => "main".to_string(),
//!     _ => unknown.clone(),
//! });
//! assert_eq!(out, "git:main");
//! ```
//!

/// A placeholder recognised in a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `%s`: the VCS name.
    System,
    /// `%b`: the branch.
    Branch,
    /// `%h`: the short hash.
    Hash,
    /// `%r`: the revision.
    Revision,
    /// `%i`: the working-tree status summary.
    Status,
}

impl Token {
    pub fn placeholder(self) -> &'static str {
        match self {
            Token::System => "%s",
            Token::Branch => "%b",
            Token::Hash => "%h",
            Token::Revision => "%r",
            Token::Status => "%i",
        }
    }

    /// The token written as `%` followed by `c`, if any.
    pub fn from_char(c: char) -> Option<Token> {
        match c {
            's' => Some(Token::System),
            'b' => Some(Token::Branch),
            'h' => Some(Token::Hash),
            'r' => Some(Token::Revision),
            'i' => Some(Token::Status),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Replaces every recognised token in `template` with the value produced by
/// `resolve`. The resolver runs at most once per token and never for tokens
/// that are absent from the template.
pub fn interpolate<F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(Token) -> String,
{
    let mut resolved: [Option<String>; 5] = Default::default();
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            '%' => chars.peek().copied().and_then(Token::from_char),
            _ => None,
        };
        match token {
            Some(token) => {
                chars.next();
                let value = resolved[token.index()].get_or_insert_with(|| resolve(token));
                output.push_str(value);
            }
            None => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(token: Token) -> String {
        match token {
            Token::System => "git".into(),
            Token::Branch => "main".into(),
            Token::Hash => "abc1234".into(),
            Token::Revision => "42".into(),
            Token::Status => "MA".into(),
        }
    }

    #[test]
    fn test_replaces_all_tokens() {
        assert_eq!(interpolate("%s:%b@%h/%r [%i]", fixed), "git:main@abc1234/42 [MA]");
    }

    #[test]
    fn test_replaces_repeated_occurrences() {
        assert_eq!(interpolate("%b-%b-%s", fixed), "main-main-git");
    }

    #[test]
    fn test_literal_and_unknown_tokens_pass_through() {
        assert_eq!(interpolate("no tokens here", fixed), "no tokens here");
        assert_eq!(interpolate("%x %% %B %b", fixed), "%x %% %B main");
    }

    #[test]
    fn test_resolver_only_called_for_present_tokens() {
        let mut seen = Vec::new();
        let out = interpolate("(%b)", |token| {
            seen.push(token);
            fixed(token)
        });
        assert_eq!(out, "(main)");
        assert_eq!(seen, vec![Token::Branch]);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = interpolate("%s:%b", |token| match token {
            Token::Branch => "fix-%s".into(),
            other => fixed(other),
        });
        assert_eq!(out, "git:fix-%s");
    }

    #[test]
    fn test_percent_before_token() {
        assert_eq!(interpolate("%%b 100%", fixed), "%main 100%");
    }

    #[test]
    fn test_placeholders_round_trip() {
        let all = [
            Token::System,
            Token::Branch,
            Token::Hash,
            Token::Revision,
            Token::Status,
        ];
        for token in all {
            let c = token.placeholder().chars().nth(1).unwrap();
            assert_eq!(Token::from_char(c), Some(token));
        }
    }

    #[test]
    fn test_resolver_called_once_per_token() {
        let mut calls = 0;
        interpolate("%i %i %i", |_| {
            calls += 1;
            String::new()
        });
        assert_eq!(calls, 1);
    }
}
