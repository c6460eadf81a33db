pub mod llm_judge;
