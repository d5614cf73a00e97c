//! `{token}` to icon-marker substitution for free text.
//!
//! The output is meant to be inserted as trusted markup; surrounding text is
//! not escaped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A brace-delimited token. Non-greedy, so `{a} {b}` yields two tokens.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("token pattern is valid"));

/// Token to Material Symbols name.
pub const DEFAULT_TOKENS: [(&str, &str); 4] = [
    ("smile", "sentiment_satisfied"),
    ("heart", "favorite"),
    ("party", "celebration"),
    ("fire", "whatshot"),
];

/// Replaces mapped tokens with icon markers.
///
/// # Example
///
/// ```
/// use icon_decorator::TokenMapper;
///
/// let mapper = TokenMapper::new();
/// assert_eq!(
///     mapper.replace_tokens("hot {fire}"),
///     r#"hot <span class="material-symbols-outlined">whatshot</span>"#
/// );
/// assert_eq!(mapper.replace_tokens("{unknown}"), "{unknown}");
/// ```
#[derive(Debug, Clone)]
pub struct TokenMapper {
    icons: HashMap<String, String>,
}

impl Default for TokenMapper {
    fn default() -> Self {
        Self::with_entries(DEFAULT_TOKENS)
    }
}

impl TokenMapper {
    /// A mapper with the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper with a custom table.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            icons: entries
                .into_iter()
                .map(|(token, icon)| (token.into(), icon.into()))
                .collect(),
        }
    }

    /// The icon name for a token. Surrounding whitespace is ignored.
    pub fn icon_for(&self, token: &str) -> Option<&str> {
        self.icons.get(token.trim()).map(String::as_str)
    }

    /// Substitutes every mapped `{token}`; unmapped tokens are left verbatim.
    pub fn replace_tokens(&self, text: &str) -> String {
        TOKEN_RE
            .replace_all(text, |caps: &Captures<'_>| match self.icon_for(&caps[1]) {
                Some(icon) => icon_marker(icon),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// The markup rendered in place of a token.
pub fn icon_marker(icon: &str) -> String {
    format!(r#"<span class="material-symbols-outlined">{icon}</span>"#)
}

/// Substitutes tokens using the built-in table.
pub fn replace_tokens(text: &str) -> String {
    TokenMapper::new().replace_tokens(text)
}
