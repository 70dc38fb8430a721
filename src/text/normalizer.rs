//! Raw text cleaning.
//!
//! `TextNormalizer::normalize` applies ten passes in a fixed order; each
//! pass sees the output of the previous one:
//!
//! 1. collapse whitespace and trim
//! 2. URLs -> `<URL>`
//! 3. email addresses -> `<USEREMAIL>`
//! 4. `@mentions` -> `<USERNAME>`
//! 5. runs of 5+ digits -> `<NUMBER>`
//! 6. `#hashtag` -> `hashtag`
//! 7. emoji -> `:emoji_name:`
//! 8. drop everything but letters, digits, `_`, whitespace and `!?,.`
//! 9. expand contractions
//! 10. lowercase
//!
//! The placeholder tokens are kept verbatim by passes 8 and 10.

use regex::Regex;

use super::contractions::ContractionExpander;
use super::emoji::demojize;

pub const URL_TOKEN: &str = "<URL>";
pub const EMAIL_TOKEN: &str = "<USEREMAIL>";
pub const USERNAME_TOKEN: &str = "<USERNAME>";
pub const NUMBER_TOKEN: &str = "<NUMBER>";

/// Precompiled cleaning passes. Build once and share.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    whitespace: Regex,
    url: Regex,
    email: Regex,
    mention: Regex,
    long_number: Regex,
    hashtag: Regex,
    disallowed: Regex,
    placeholder: Regex,
    contractions: ContractionExpander,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
            url: Regex::new(r"https?://\S+|www\.\S+")?,
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z0-9]{2,}")?,
            mention: Regex::new(r"@\w+")?,
            long_number: Regex::new(r"\d{5,}")?,
            hashtag: Regex::new(r"#(\w+)")?,
            disallowed: Regex::new(r"[^\p{L}\p{N}_\s!?,.]")?,
            placeholder: Regex::new(r"<(?:URL|USEREMAIL|USERNAME|NUMBER)>")?,
            contractions: ContractionExpander::new()?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let text = self.whitespace.replace_all(text, " ");
        let text = text.trim();
        let text = self.url.replace_all(text, URL_TOKEN);
        let text = self.email.replace_all(&text, EMAIL_TOKEN);
        let text = self.mention.replace_all(&text, USERNAME_TOKEN);
        let text = self.long_number.replace_all(&text, NUMBER_TOKEN);
        let text = self.hashtag.replace_all(&text, "$1");
        let text = demojize(&text);
        self.finish(&text)
    }

    /// Passes 8 to 10. Applying them twice gives the same result as once.
    pub fn finish(&self, text: &str) -> String {
        let text = self.strip_disallowed(text);
        let text = self.contractions.expand(&text);
        self.lowercase(&text)
    }

    fn strip_disallowed(&self, text: &str) -> String {
        self.map_outside_placeholders(text, |segment| {
            self.disallowed.replace_all(segment, "").into_owned()
        })
    }

    fn lowercase(&self, text: &str) -> String {
        self.map_outside_placeholders(text, |segment| segment.to_lowercase())
    }

    /// Apply `f` to the text between placeholder tokens, copying the tokens unchanged
    fn map_outside_placeholders<F>(&self, text: &str, f: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.placeholder.find_iter(text) {
            out.push_str(&f(&text[last..m.start()]));
            out.push_str(m.as_str());
            last = m.end();
        }
        out.push_str(&f(&text[last..]));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("   \n\t "), "");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalizer().normalize("  hello \n\n  world\t"), "hello world");
    }

    #[test]
    fn test_url_replaced() {
        let out = normalizer().normalize("Check http://x.com NOW");
        assert!(out.contains("<URL>"));
        assert!(!out.contains("http"));
        assert_eq!(out, "check <URL> now");

        let out = normalizer().normalize("see www.example.org/page?q=1 and https://a.b/c");
        assert_eq!(out, "see <URL> and <URL>");
    }

    #[test]
    fn test_email_replaced() {
        let out = normalizer().normalize("Contact me@x.com");
        assert!(out.contains("<USEREMAIL>"));
        assert!(!out.contains('@'));
    }

    #[test]
    fn test_mention_replaced() {
        assert_eq!(normalizer().normalize("hey @john_doe!"), "hey <USERNAME>!");
    }

    #[test]
    fn test_long_numbers_only() {
        assert_eq!(normalizer().normalize("call 5551234 at 9"), "call <NUMBER> at 9");
        assert_eq!(normalizer().normalize("1234 is short"), "1234 is short");
    }

    #[test]
    fn test_hashtag_mark_stripped() {
        assert_eq!(normalizer().normalize("#Blessed day #2024"), "blessed day 2024");
    }

    #[test]
    fn test_emoji_converted_to_words() {
        let out = normalizer().normalize("so funny 😂");
        assert_eq!(out, "so funny face_with_tears_of_joy");
    }

    #[test]
    fn test_disallowed_characters_removed() {
        assert_eq!(normalizer().normalize("wow!!! (really?) $100; ok..."), "wow!!! really? 100 ok...");
    }

    #[test]
    fn test_contractions_expanded_after_apostrophes_removed() {
        assert_eq!(normalizer().normalize("I don't know, you're right"), "i do not know, you are right");
    }

    #[test]
    fn test_lowercase_keeps_placeholders() {
        let out = normalizer().normalize("HELLO @Someone AT https://X.COM");
        assert_eq!(out, "hello <USERNAME> at <URL>");
    }

    #[test]
    fn test_non_ascii_letters_survive() {
        assert_eq!(normalizer().normalize("Café ÜBER straße"), "café über straße");
    }

    #[test]
    fn test_step_order_email_before_mention() {
        // The email pass runs first, so the address is not split into a mention
        let out = normalizer().normalize("mail jane.doe@mail.example.com today");
        assert_eq!(out, "mail <USEREMAIL> today");
    }

    #[test]
    fn test_finish_idempotent() {
        let n = normalizer();
        let once = n.finish("Don't STOP <URL> believin' 😂!!");
        assert_eq!(n.finish(&once), once);
    }

    const MESSY_TEXT: &str = "[a-zA-Z0-9 @#'!?,.:;/<>$%&()éüß😂🍕\\-]{0,64}";

    proptest! {
        #[test]
        fn prop_output_character_set(s in MESSY_TEXT) {
            let n = normalizer();
            let out = n.normalize(&s);
            let stripped = n.placeholder.replace_all(&out, "");
            for c in stripped.chars() {
                prop_assert!(
                    c.is_alphanumeric() || c == '_' || c.is_whitespace() || "!?,.".contains(c),
                    "unexpected char {:?} in {:?}", c, out
                );
            }
        }

        #[test]
        fn prop_finish_idempotent(s in MESSY_TEXT) {
            let n = normalizer();
            let once = n.finish(&s);
            prop_assert_eq!(n.finish(&once), once);
        }
    }
}
