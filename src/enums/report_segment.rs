/// One region of the canonical report document. Protected regions (fenced
/// code blocks, heading lines) pass through translation untouched;
/// translatable prose is chunked and sent to the provider.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ReportSegment {
    Protected(String),
    Translatable(String),
}

impl ReportSegment {
    pub fn text(&self) -> &str {
        match self {
            ReportSegment::Protected(text) => text,
            ReportSegment::Translatable(text) => text,
        }
    }
}
