//! Outgoing chunker: splits a long reply into lines that fit the protocol's per-line limit.
//!
//! Lines are split on line terminators first. A line longer than the limit is packed word by word
//! (words separated by single spaces); each closed chunk keeps its trailing separator. A single
//! word longer than the limit is emitted whole, never split.

/// Default per-chunk limit, in characters.
pub const DEFAULT_CHUNK_LIMIT: usize = 400;

/// Splits `text` into ordered chunks of at most `limit` characters (see module docs for the
/// single-long-word exception). Empty and whitespace-only chunks are dropped.
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();

    for line in text.lines() {
        if line.chars().count() <= limit {
            chunks.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;
        for word in line.split(' ') {
            let word_len = word.chars().count();
            if current_len + word_len + 1 > limit && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(word);
            current.push(' ');
            current_len += word_len + 1;
        }
        chunks.push(current);
    }

    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_pass_through() {
        assert_eq!(chunk("hello\nworld", 400), vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_lines_are_dropped() {
        assert_eq!(chunk("a\n\n\nb\n", 400), vec!["a", "b"]);
        assert!(chunk("", 400).is_empty());
        assert!(chunk("   \n\t", 400).is_empty());
    }

    #[test]
    fn test_crlf_is_a_line_boundary() {
        assert_eq!(chunk("one\r\ntwo", 400), vec!["one", "two"]);
    }

    #[test]
    fn test_line_at_limit_is_not_split() {
        let line = "x".repeat(10);
        assert_eq!(chunk(&line, 10), vec![line]);
    }

    #[test]
    fn test_long_line_is_packed_greedily() {
        let chunks = chunk("aaa bbb ccc ddd", 8);
        assert_eq!(chunks, vec!["aaa bbb ", "ccc ddd "]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 8));
    }

    #[test]
    fn test_single_long_word_is_emitted_whole() {
        let word = "a".repeat(410);
        let chunks = chunk(&word, 400);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].trim_end(), word);
    }

    #[test]
    fn test_long_word_between_short_words() {
        let long = "z".repeat(12);
        let text = format!("ab {} cd", long);
        let chunks = chunk(&text, 10);
        assert_eq!(chunks, vec!["ab ".to_string(), format!("{} ", long), "cd ".to_string()]);
    }

    #[test]
    fn test_chunks_respect_limit_and_reconstruct_text() {
        let words: Vec<String> = (0..200).map(|i| format!("word{}", i)).collect();
        let line = words.join(" ");
        let text = format!("{}\nshort line\n{}", line, line);
        let chunks = chunk(&text, 50);

        for c in &chunks {
            assert!(c.chars().count() <= 50, "chunk too long: {:?}", c);
            assert!(!c.is_empty());
        }

        let rebuilt: String = chunks.concat();
        let expected = format!("{} short line{} ", line, line);
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(chunk(&text, 5), vec![text.clone()]);
    }
}
