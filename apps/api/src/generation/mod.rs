// Prompt generation: message assembly, completion post-processing, export.
// All API calls go through llm_client; nothing here talks HTTP to the model.

pub mod builder;
pub mod formatter;
pub mod generator;
pub mod handlers;
pub mod prompts;
