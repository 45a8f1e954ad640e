// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON fields.";

/// Common instruction appended to all rewriting prompts.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    CRITICAL: Never invent employers, job titles that were not held, degrees, \
    certifications, or dates. You may rephrase, reorder, and emphasize, and you may \
    quantify achievements only where the original text supports an estimate.";
