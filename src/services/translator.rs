use std::sync::Arc;

use crate::config::constants::{TRANSLATION_CHUNK_OVERLAP, TRANSLATION_CHUNK_SIZE};
use crate::enums::report_language::ReportLanguage;
use crate::enums::report_segment::ReportSegment;
use crate::prompts::translation_prompt::translation_prompt;
use crate::services::transcript_logger::TranscriptLogger;
use crate::traits::llm_judge::LlmJudge;

/// Preferred split points, tried in order. Falling through to a hard
/// character cut only happens when a chunk has no break at all.
const NATURAL_BREAKS: [&str; 7] = ["\n\n", "\n", ". ", "! ", "? ", "。", "！"];

/// Translates the assembled report into the requested language. Never
/// fails: a chunk whose translation errors out stays in English, headings
/// and code blocks are never sent to the provider at all.
pub struct Translator {
    judge: Arc<dyn LlmJudge>,
    transcript: Option<TranscriptLogger>,
    chunk_size: usize,
    overlap: usize,
}

impl Translator {
    pub fn new(judge: Arc<dyn LlmJudge>, transcript: Option<TranscriptLogger>) -> Self {
        Self {
            judge,
            transcript,
            chunk_size: TRANSLATION_CHUNK_SIZE,
            overlap: TRANSLATION_CHUNK_OVERLAP,
        }
    }

    pub async fn translate(&self, document: &str, target: ReportLanguage) -> String {
        if target == ReportLanguage::English {
            return document.to_string();
        }

        log::info!("Translating report to {}", target.name());

        let mut output = String::with_capacity(document.len());
        for segment in segment_document(document) {
            match segment {
                ReportSegment::Protected(text) => output.push_str(&text),
                ReportSegment::Translatable(text) => {
                    output.push_str(&self.translate_text(&text, target).await);
                }
            }
        }
        output
    }

    async fn translate_text(&self, text: &str, target: ReportLanguage) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        if text.chars().count() <= self.chunk_size {
            return self.translate_chunk(text, target).await;
        }

        let chunks = split_chunks(text, self.chunk_size, self.overlap);
        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            translated.push(self.translate_chunk(chunk, target).await);
        }
        combine_chunks(&chunks, &translated, self.overlap)
    }

    /// One provider round trip. On any error the English chunk is kept,
    /// so a partially translated report is still a complete report.
    async fn translate_chunk(&self, chunk: &str, target: ReportLanguage) -> String {
        let prompt = translation_prompt(chunk, target.name());

        match self.judge.analyze(&prompt).await {
            Ok(response) => {
                if let Some(transcript) = &self.transcript {
                    transcript.record(self.judge.provider_name(), "translation", &prompt, &response);
                }
                response
            }
            Err(e) => {
                log::warn!("Translation chunk failed, keeping English text: {}", e);
                chunk.to_string()
            }
        }
    }
}

/// Splits a report into protected and translatable segments, line by
/// line. Concatenating the segment texts reproduces the input exactly.
pub fn segment_document(document: &str) -> Vec<ReportSegment> {
    let mut segments: Vec<ReportSegment> = Vec::new();
    let mut in_code_block = false;

    for line in document.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_fence = trimmed.starts_with("```");
        let protected = if is_fence {
            in_code_block = !in_code_block;
            true
        } else {
            in_code_block || trimmed.starts_with('#')
        };

        match (protected, segments.last_mut()) {
            (true, Some(ReportSegment::Protected(text))) => text.push_str(line),
            (false, Some(ReportSegment::Translatable(text))) => text.push_str(line),
            (true, _) => segments.push(ReportSegment::Protected(line.to_string())),
            (false, _) => segments.push(ReportSegment::Translatable(line.to_string())),
        }
    }

    segments
}

/// Cuts `text` into overlapping chunks of at most `chunk_size` characters,
/// preferring natural break points near the end of each window.
pub fn split_chunks(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let hard_end = (start + chunk_size).min(chars.len());
        let end = if hard_end == chars.len() {
            hard_end
        } else {
            natural_break(&chars, start, hard_end).unwrap_or(hard_end)
        };

        chunks.push(chars[start..end].iter().collect());

        if end == chars.len() {
            break;
        }
        let mut next_start = end.saturating_sub(overlap);
        if next_start <= start {
            next_start = end;
        }
        start = next_start;
    }

    chunks
}

/// Looks backwards from `hard_end` for the best break point in the second
/// half of the window. Returns the index just past the break.
fn natural_break(chars: &[char], start: usize, hard_end: usize) -> Option<usize> {
    let window: String = chars[start..hard_end].iter().collect();
    let floor = (hard_end - start) / 2;

    for breaker in NATURAL_BREAKS {
        if let Some(pos) = window.rfind(breaker) {
            let char_pos = window[..pos].chars().count() + breaker.chars().count();
            if char_pos > floor {
                return Some(start + char_pos);
            }
        }
    }
    None
}

/// Rejoins translated chunks, dropping duplicated overlap text between
/// consecutive chunks when the translation preserved it. `originals` and
/// `translated` line up one-to-one; when overlap matching fails the chunks
/// are concatenated as-is.
pub fn combine_chunks(originals: &[String], translated: &[String], overlap: usize) -> String {
    let mut combined = String::new();

    for (index, chunk) in translated.iter().enumerate() {
        if index == 0 {
            combined.push_str(chunk);
            continue;
        }

        let original_prev: Vec<char> = originals[index - 1].chars().collect();
        let original_this: Vec<char> = originals[index].chars().collect();
        let shared = shared_overlap(&original_prev, &original_this, overlap);

        if shared > 0 {
            // The chunks were built from overlapping source text. If the
            // translation kept the overlap verbatim, strip it; otherwise
            // accept a little duplication rather than dropping content.
            let overlap_text: String = original_this[..shared].iter().collect();
            if let Some(stripped) = chunk.strip_prefix(&overlap_text) {
                combined.push_str(stripped);
                continue;
            }
        }

        combined.push_str(chunk);
    }

    combined
}

/// Longest suffix of `prev` (up to `max`) that is also a prefix of `this`.
fn shared_overlap(prev: &[char], this: &[char], max: usize) -> usize {
    let limit = max.min(prev.len()).min(this.len());

    for size in (1..=limit).rev() {
        if prev[prev.len() - size..] == this[..size] {
            return size;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segmentation_is_lossless() {
        let document = "# Title\n\nSome prose here.\n\n```php\nmysql_query($sql);\n```\n\nMore prose.\n";
        let segments = segment_document(document);

        let rebuilt: String = segments.iter().map(|s| s.text()).collect();
        assert_eq!(rebuilt, document);
    }

    #[test]
    fn code_blocks_and_headings_are_protected() {
        let document = "# Title\nprose\n```php\ncode line\n```\nafter\n";
        let segments = segment_document(document);

        for segment in &segments {
            match segment {
                ReportSegment::Protected(text) => {
                    assert!(
                        text.contains('#') || text.contains("```") || text.contains("code line")
                    );
                }
                ReportSegment::Translatable(text) => {
                    assert!(!text.contains("code line"));
                    assert!(!text.starts_with('#'));
                }
            }
        }
    }

    #[test]
    fn chunks_cover_everything_and_respect_size() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(100);
        let chunks = split_chunks(&text, 200, 40);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 200);
        }
        assert!(chunks[0].starts_with("The quick"));
        assert!(chunks.last().is_some_and(|c| text.ends_with(c.as_str())));
    }

    #[test]
    fn identity_reassembly_without_translation() {
        let text = "Sentence one is here. Sentence two follows it. ".repeat(80);
        let chunks = split_chunks(&text, 300, 60);
        let rebuilt = combine_chunks(&chunks, &chunks, 60);

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn splitter_terminates_on_breakless_text() {
        let text = "a".repeat(5000);
        let chunks = split_chunks(&text, 400, 100);

        assert!(chunks.len() >= 12);
        let rebuilt = combine_chunks(&chunks, &chunks, 100);
        assert_eq!(rebuilt, text);
    }
}
