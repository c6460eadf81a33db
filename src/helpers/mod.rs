pub mod prompt_generator;
