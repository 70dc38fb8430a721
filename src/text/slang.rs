//! Dictionary-based slang expansion over normalized text.

use regex::{Captures, Regex};
use std::collections::HashMap;

/// Slang token (lowercase) to canonical expansion
pub const SLANG: &[(&str, &str)] = &[
    ("u", "you"),
    ("r", "are"),
    ("ur", "your"),
    ("idk", "I don't know"),
    ("lol", "laughing out loud"),
    ("btw", "by the way"),
    ("omg", "oh my god"),
    ("ttyl", "talk to you later"),
    ("brb", "be right back"),
    ("smh", "shaking my head"),
    ("lmao", "laughing my ass off"),
    ("fyi", "for your information"),
    ("asap", "as soon as possible"),
    ("b2b", "business to business"),
    ("tbh", "to be honest"),
    ("imho", "in my humble opinion"),
    ("eta", "estimated time of arrival"),
    ("q1", "quarter one"),
    ("q2", "quarter two"),
    ("q3", "quarter three"),
    ("q4", "quarter four"),
];

/// Replaces whole-word slang tokens with their expansion.
///
/// Matching ignores case; the expansion is always inserted exactly as stored.
/// Tokens not in the dictionary keep their original spelling.
#[derive(Debug, Clone)]
pub struct SlangExpander {
    token: Regex,
    dictionary: HashMap<&'static str, &'static str>,
}

impl SlangExpander {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token: Regex::new(r"\w+")?,
            dictionary: SLANG.iter().copied().collect(),
        })
    }

    pub fn lookup(&self, token: &str) -> Option<&'static str> {
        self.dictionary.get(token.to_lowercase().as_str()).copied()
    }

    pub fn expand(&self, text: &str) -> String {
        self.token
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                self.lookup(token).unwrap_or(token).to_string()
            })
            .into_owned()
    }
}
