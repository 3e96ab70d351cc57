//! Sentence-aware chunking of long query text.

use regex::Regex;

/// Default maximum chunk size in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// Split `text` into chunks of at most `max_chunk_size` characters, breaking
/// on sentence boundaries so each chunk keeps local context.
///
/// A single sentence longer than the limit becomes its own oversized chunk
/// rather than being cut mid-sentence.
pub fn split_into_chunks(text: &str, max_chunk_size: usize) -> Vec<String> {
    if text.len() <= max_chunk_size {
        return vec![text.to_string()];
    }

    let Ok(sentence) = Regex::new(r"[^.!?]*[.!?]+|[^.!?]+$") else {
        return vec![text.to_string()];
    };
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut current_size = 0usize;

    for found in sentence.find_iter(text) {
        let piece = found.as_str().trim();
        if piece.is_empty() {
            continue;
        }
        if current_size + piece.len() > max_chunk_size && !current.is_empty() {
            chunks.push(current.join(" "));
            current = vec![piece];
            current_size = piece.len();
        } else {
            current_size += piece.len();
            current.push(piece);
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::split_into_chunks;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_into_chunks("persistent dry cough", 1000);
        assert_eq!(chunks, vec!["persistent dry cough".to_string()]);
    }

    #[test]
    fn long_text_splits_on_sentence_boundaries() {
        let text = "First sentence about fever. Second sentence about cough! Third sentence about fatigue?";
        let chunks = split_into_chunks(text, 40);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "First sentence about fever.");
        assert_eq!(chunks[1], "Second sentence about cough!");
        assert_eq!(chunks[2], "Third sentence about fatigue?");
    }

    #[test]
    fn sentences_pack_into_chunks_up_to_the_limit() {
        let text = "One. Two. Three. Four.";
        let chunks = split_into_chunks(text, 11);
        assert_eq!(chunks, vec!["One. Two.".to_string(), "Three. Four.".to_string()]);
    }

    #[test]
    fn oversized_sentence_stays_whole() {
        let text = "A very long unbroken description of symptoms without punctuation continuing on. Short.";
        let chunks = split_into_chunks(text, 20);
        assert_eq!(chunks[0], "A very long unbroken description of symptoms without punctuation continuing on.");
        assert_eq!(chunks[1], "Short.");
    }
}
