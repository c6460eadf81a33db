pub mod analysis_prompt;
pub mod translation_prompt;
