//! Emoji to text conversion.
//!
//! Every emoji sequence is replaced by its CLDR name wrapped in colons, with
//! spaces turned into underscores: "😂" becomes ":face_with_tears_of_joy:".

/// Longest emoji sequence we try to match, in chars (family/flag ZWJ sequences)
const MAX_SEQUENCE_CHARS: usize = 10;

/// Replace every emoji in `text` with its `:snake_case_name:` form
pub fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        // ASCII never starts an emoji we want to rewrite ("#", "*" and digits
        // only become emoji with a keycap suffix, handled below)
        if c.is_ascii() && !starts_keycap(rest) {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        match longest_emoji_prefix(rest) {
            Some((emoji, len)) => {
                out.push(':');
                out.push_str(&shortcode_name(emoji.name()));
                out.push(':');
                rest = &rest[len..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

fn starts_keycap(s: &str) -> bool {
    let mut chars = s.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();
    matches!(first, Some('#' | '*' | '0'..='9'))
        && (second == Some('\u{20E3}')
            || (second == Some('\u{FE0F}') && third == Some('\u{20E3}')))
}

/// Find the longest prefix of `s` that is a known emoji; returns it with its byte length
fn longest_emoji_prefix(s: &str) -> Option<(&'static emojis::Emoji, usize)> {
    let boundaries: Vec<usize> = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take(MAX_SEQUENCE_CHARS)
        .collect();

    boundaries
        .iter()
        .rev()
        .find_map(|&end| emojis::get(&s[..end]).map(|emoji| (emoji, end)))
}

fn shortcode_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ':' && *c != ',')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
