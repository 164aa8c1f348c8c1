// Shared prompt fragments.
// The negotiation module builds its own prompts in negotiation/prompts.rs;
// this file holds the output-format instructions every prompt ends with.

/// Closing instruction for prompts that expect a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "ONLY return the JSON object, nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Closing instruction for prompts that expect prose only.
pub const PLAIN_TEXT_ONLY_INSTRUCTION: &str = "ONLY return the improved text, \
    with no additional commentary or explanations. \
    Do NOT return JSON. Do NOT wrap the text in quotes or code fences.";
