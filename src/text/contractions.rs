//! English contraction expansion.
//!
//! Apostrophes are stripped before this pass runs, so the dictionary is keyed
//! on the apostrophe-less spellings ("dont", "youre"). Forms that collide with
//! ordinary words ("its", "well", "were", "ill", "id", "lets", "hell") are
//! left out.

use regex::{Captures, Regex};
use std::collections::HashMap;

pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("aint", "are not"),
    ("arent", "are not"),
    ("cant", "cannot"),
    ("couldnt", "could not"),
    ("couldve", "could have"),
    ("didnt", "did not"),
    ("doesnt", "does not"),
    ("dont", "do not"),
    ("hadnt", "had not"),
    ("hasnt", "has not"),
    ("havent", "have not"),
    ("hes", "he is"),
    ("howd", "how did"),
    ("hows", "how is"),
    ("im", "I am"),
    ("isnt", "is not"),
    ("itll", "it will"),
    ("ive", "I have"),
    ("mightnt", "might not"),
    ("mightve", "might have"),
    ("mustnt", "must not"),
    ("mustve", "must have"),
    ("neednt", "need not"),
    ("shant", "shall not"),
    ("shes", "she is"),
    ("shouldnt", "should not"),
    ("shouldve", "should have"),
    ("thats", "that is"),
    ("theres", "there is"),
    ("theyd", "they would"),
    ("theyll", "they will"),
    ("theyre", "they are"),
    ("theyve", "they have"),
    ("wasnt", "was not"),
    ("weve", "we have"),
    ("werent", "were not"),
    ("whats", "what is"),
    ("whered", "where did"),
    ("wheres", "where is"),
    ("whos", "who is"),
    ("wont", "will not"),
    ("wouldnt", "would not"),
    ("wouldve", "would have"),
    ("yall", "you all"),
    ("youd", "you would"),
    ("youll", "you will"),
    ("youre", "you are"),
    ("youve", "you have"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("wanna", "want to"),
    ("gimme", "give me"),
    ("lemme", "let me"),
    ("kinda", "kind of"),
    ("sorta", "sort of"),
];

/// Whole-word, case-insensitive contraction replacer
#[derive(Debug, Clone)]
pub struct ContractionExpander {
    pattern: Regex,
    expansions: HashMap<&'static str, &'static str>,
}

impl ContractionExpander {
    pub fn new() -> Result<Self, regex::Error> {
        let alternation = CONTRACTIONS
            .iter()
            .map(|(word, _)| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?;

        Ok(Self {
            pattern,
            expansions: CONTRACTIONS.iter().copied().collect(),
        })
    }

    pub fn expand(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                self.expansions
                    .get(word.to_lowercase().as_str())
                    .copied()
                    .unwrap_or(word)
                    .to_string()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic() {
        let expander = ContractionExpander::new().unwrap();
        assert_eq!(expander.expand("i dont know"), "i do not know");
        assert_eq!(expander.expand("Youre late"), "you are late");
    }

    #[test]
    fn test_whole_words_only() {
        let expander = ContractionExpander::new().unwrap();
        assert_eq!(expander.expand("dontcha imagine"), "dontcha imagine");
        assert_eq!(expander.expand("time"), "time");
    }

    #[test]
    fn test_ambiguous_words_untouched() {
        let expander = ContractionExpander::new().unwrap();
        assert_eq!(expander.expand("its well were lets"), "its well were lets");
    }

    #[test]
    fn test_table_keys_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for (word, _) in CONTRACTIONS {
            assert_eq!(*word, word.to_lowercase());
            assert!(seen.insert(*word), "duplicate key {}", word);
        }
    }
}
