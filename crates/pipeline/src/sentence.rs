//! Sentence splitting for per-sentence predictor calls
//!
//! Stands in for the external tokenizer. A sentence ends at `.`, `!` or
//! `?` followed by whitespace or end of input, which keeps decimals,
//! dotted IPs and domain names intact.

/// Split a note into sentences, trimmed, empty sentences dropped
pub fn split(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if at_boundary {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let sentences = split("John left. Mary stayed home! Did she?");
        assert_eq!(
            sentences,
            vec!["John left.", "Mary stayed home!", "Did she?"]
        );
    }

    #[test]
    fn test_split_keeps_dotted_tokens_together() {
        let sentences = split("server 192.168.1.10 is down. visit b.com now");
        assert_eq!(
            sentences,
            vec!["server 192.168.1.10 is down.", "visit b.com now"]
        );
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_split_without_terminator() {
        assert_eq!(split("no punctuation here"), vec!["no punctuation here"]);
    }
}
