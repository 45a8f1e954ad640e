// Résumé tailoring pipeline and its HTTP handlers.
// All LLM calls go through llm_client's CompletionProvider.

pub mod generator;
pub mod handlers;
pub mod prompts;
