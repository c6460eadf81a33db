/// Source window around one finding, clamped to file bounds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CodeContext {
    pub start_line: usize,
    pub end_line: usize,
    pub code: String,
}
