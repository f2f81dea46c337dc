pub const DEFAULT_STRATEGY: &str = "Standard Market Growth (Default)";

const AUDIT_HEADER: &str = "[INTERNAL DATASET AUDIT]\nSOURCE MATERIAL:";

/// Analyst persona sent as the system instruction, with the strategy focus
/// filled in. A blank strategy uses [`DEFAULT_STRATEGY`].
pub fn system_instruction(strategy: &str) -> String {
    let strategy = match strategy.trim() {
        "" => DEFAULT_STRATEGY,
        s => s,
    };

    format!(
        "You are a Senior Strategic Analyst at Vantage Enterprise.
Your role is to produce direct, executive-ready market reports.

COMMUNICATION PROTOCOL:
1. START DIRECTLY with the findings. Never use introductory filler like \"Here is the report\" or \"Based on your request\".
2. NO MARKDOWN SYMBOLS. Use ALL CAPS for headers and double spacing for paragraph breaks.
3. Use professional, clinical business language.
4. NEVER refer to yourself as an AI, bot, or assistant. You are the Vantage Analyst Core.
5. Use plain dashes (-) for bullet points.
6. Strategy Focus: {strategy}.

If the user provides raw data context, treat it as proprietary business records for forensic auditing."
    )
}

/// Prompt actually sent to the model.
///
/// With a non-empty context the audit header, the context and the directive
/// are laid out in that order, separated by blank lines. Otherwise the prompt
/// goes out untouched.
pub fn final_prompt(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !context.is_empty() => {
            format!("{AUDIT_HEADER}\n{context}\n\nDIRECTIVE: {prompt}")
        }
        _ => prompt.to_string(),
    }
}
