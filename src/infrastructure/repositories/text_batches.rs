use regex::Regex;
use std::sync::OnceLock;

fn sentence_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[.!?]+\s+").ok())
        .as_ref()
}

/// Split text into batches of at most `max_chars` characters, preferring
/// sentence boundaries. Text without a usable boundary is cut by characters.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut sentences: Vec<&str> = Vec::new();
    let mut last_end = 0;
    if let Some(pattern) = sentence_pattern() {
        for mat in pattern.find_iter(text) {
            sentences.push(&text[last_end..mat.end()]);
            last_end = mat.end();
        }
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        let sentence_len = sentence.chars().count();
        if !current.is_empty() && current.chars().count() + sentence_len > max_chars {
            batches.push(current.trim().to_string());
            current.clear();
        }

        if sentence_len > max_chars {
            let chars: Vec<char> = sentence.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let piece: String = chunk.iter().collect();
                if !piece.trim().is_empty() {
                    batches.push(piece.trim().to_string());
                }
            }
        } else {
            current.push_str(sentence);
        }
    }

    if !current.trim().is_empty() {
        batches.push(current.trim().to_string());
    }

    batches
}
