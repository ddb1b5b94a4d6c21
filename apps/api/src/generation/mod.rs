// Post generation: prompt building, the LLM call, and splitting the output.
// All LLM calls go through llm_client.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod splitter;
