// All LLM prompt templates for the negotiation pipeline.
// Placeholders are `{name}` and are filled with `str::replace`.

use uuid::Uuid;

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, PLAIN_TEXT_ONLY_INSTRUCTION};
use crate::negotiation::industry::{
    IndustryModel, EXPERT_TECHNIQUES, NEGOTIATION_FRAMEWORKS, RUBRIC,
};

/// Analysis system prompt. Replace: {industry_context}, {rubric}, {frameworks},
/// {techniques}, {session_id}, {json_only}
const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are the world's foremost expert on negotiation techniques, with decades of experience in {industry_context} and deep knowledge of negotiation psychology, game theory, and persuasion tactics.

Your task is to analyze the negotiation text with the precision and insight of a master negotiator, providing comprehensive and actionable feedback.

Your analysis must include:

1. An overall effectiveness score from 0-100 based on these criteria:
{rubric}

2. Tone analysis (assertive, passive, collaborative, etc.)
3. Sentiment analysis (positive, negative, neutral)
4. Persuasive strength as a percentage from 0-100
5. Key strengths (3-5 specific points about what works well)
6. Areas for improvement (3-5 specific points about what could be better)
7. Specific tactical suggestions to make the text more effective (3-5 actionable points)
8. Negotiation frameworks identified in the text. Known frameworks:
{frameworks}
9. Expert techniques used or missing. Known techniques:
{techniques}
10. Power dynamics assessment (who appears to have leverage)
11. Negotiation phase identification (preparation, information exchange, bargaining, closing)

Apply the following expert negotiation principles in your analysis:
- Harvard Principled Negotiation Method (separate people from the problem, focus on interests not positions, invent options for mutual gain, insist on objective criteria)
- Tactical empathy and calibrated questions
- Cialdini's principles of influence (reciprocity, commitment/consistency, social proof, authority, liking, scarcity)
- Game theory concepts of information asymmetry and credible commitments
- Cultural sensitivity and awareness in international negotiations

This is analysis session {session_id} - evaluate this text independently and objectively.

Format your response as a JSON object with the following structure:
{
  "score": number,
  "tone": string,
  "sentiment": string,
  "persuasiveStrength": number,
  "strengths": string[],
  "weaknesses": string[],
  "suggestions": string[],
  "frameworksUsed": string[],
  "techniquesIdentified": string[],
  "powerDynamics": string,
  "negotiationPhase": string
}

{json_only}"#;

/// Rewriting principles shared by the improvement and combined prompts.
const IMPROVEMENT_PRINCIPLES: &str = r#"1. STRATEGIC FRAMING
   - Frame proposals in terms of the counterparty's interests and values
   - Use loss aversion by highlighting what they might miss rather than gain
   - Create a compelling narrative that makes your position seem inevitable

2. PSYCHOLOGICAL TRIGGERS
   - Incorporate the principles of influence: reciprocity, commitment, social proof, authority, liking, scarcity
   - Use strategic anchoring to set favorable expectations
   - Apply tactical empathy to demonstrate deep understanding

3. LINGUISTIC EXCELLENCE
   - Replace weak language with confident, authoritative phrasing
   - Use precise, concrete language instead of vague generalities
   - Employ rhetorical techniques for memorability
   - Balance assertiveness with collaborative language

4. STRUCTURAL MASTERY
   - Open with a relationship-building statement that establishes common ground
   - Present your strongest points first and last (primacy-recency effect)
   - Include a clear, specific call to action with timeline
   - Anticipate and preemptively address potential objections

5. TACTICAL ELEMENTS
   - Incorporate subtle reciprocity triggers
   - Use strategic concessions to activate commitment/consistency
   - Include social proof elements relevant to the counterparty
   - Establish your authority and credibility naturally
   - Create appropriate scarcity or urgency without being manipulative

6. RELATIONSHIP BUILDING
   - Demonstrate genuine understanding of their position
   - Emphasize mutual benefits and long-term relationship value
   - Use "we" language to create a collaborative atmosphere
   - Acknowledge their expertise and contributions"#;

/// Improvement system prompt. Replace: {industry_context}, {principles}, {plain_text_only}
const IMPROVEMENT_PROMPT_TEMPLATE: &str = r#"You are the world's leading expert on negotiation, with unparalleled mastery of persuasion psychology, strategic communication, and {industry_context}.

Your task is to transform the following negotiation text into a masterpiece of persuasive communication that achieves optimal outcomes while maintaining relationship integrity.

Apply these advanced negotiation principles:

{principles}

The improved text must be substantially more effective while maintaining authenticity and ethical standards.

{plain_text_only}"#;

/// Combined analyze-improve-analyze system prompt.
/// Replace: {industry_context}, {rubric}, {principles}, {json_only}
const COMBINED_PROMPT_TEMPLATE: &str = r#"You are the world's leading expert on negotiation, with unparalleled mastery of persuasion psychology, strategic communication, and {industry_context}.

Your task is to analyze the original negotiation text, create an improved version, and provide a comparative analysis between the two.

First, analyze the original text and assign it a score from 0-100 based on these criteria:
{rubric}

Then, create a significantly improved version that addresses any weaknesses and enhances strengths, applying these principles:

{principles}

Finally, analyze the improved text using the same criteria and provide a comparative analysis.

Your response must be a single JSON object in the following format:
{
  "originalAnalysis": {
    "score": <0-100>,
    "persuasiveStrength": <0-100>,
    "strengths": ["strength1", "strength2", ...],
    "weaknesses": ["weakness1", "weakness2", ...]
  },
  "improvedText": "<The complete improved negotiation text>",
  "improvedAnalysis": {
    "score": <0-100>,
    "persuasiveStrength": <0-100>,
    "strengths": ["strength1", "strength2", ...],
    "weaknesses": ["weakness1", "weakness2", ...]
  },
  "improvements": ["specific improvement 1", "specific improvement 2", ...],
  "addressedWeaknesses": ["addressed weakness 1", "addressed weakness 2", ...]
}

CRITICAL: The improved score must be at least 10 points higher than the original score, unless the original is already 85 or above, in which case it must still be at least 5 points higher.

{json_only}"#;

/// Builds the analysis prompt with a fresh session nonce, so repeated calls
/// for the same text are not answered from a provider-side cache.
pub fn build_analysis_prompt(industry: IndustryModel) -> String {
    let session_id = Uuid::new_v4().simple().to_string();
    analysis_prompt_for_session(industry, &session_id[..13])
}

/// Deterministic core of `build_analysis_prompt`.
pub fn analysis_prompt_for_session(industry: IndustryModel, session_id: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{industry_context}", industry.context())
        .replace("{rubric}", &render_rubric())
        .replace("{frameworks}", &render_frameworks())
        .replace("{techniques}", &render_techniques())
        .replace("{session_id}", session_id)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

pub fn build_improvement_prompt(industry: IndustryModel) -> String {
    IMPROVEMENT_PROMPT_TEMPLATE
        .replace("{industry_context}", industry.context())
        .replace("{principles}", IMPROVEMENT_PRINCIPLES)
        .replace("{plain_text_only}", PLAIN_TEXT_ONLY_INSTRUCTION)
}

pub fn build_combined_prompt(industry: IndustryModel) -> String {
    COMBINED_PROMPT_TEMPLATE
        .replace("{industry_context}", industry.context())
        .replace("{rubric}", &render_rubric())
        .replace("{principles}", IMPROVEMENT_PRINCIPLES)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

fn render_rubric() -> String {
    RUBRIC
        .iter()
        .map(|c| format!("   - {} ({} points)", c.label, c.points))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_frameworks() -> String {
    NEGOTIATION_FRAMEWORKS
        .iter()
        .map(|(label, meaning)| format!("   - {label}: {meaning}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_techniques() -> String {
    EXPERT_TECHNIQUES
        .iter()
        .map(|t| format!("   - {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}
