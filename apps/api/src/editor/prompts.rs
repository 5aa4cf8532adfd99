// Prompt overrides sent with enhancement requests.
// The remote service uses the override as the whole prompt, so each one embeds the text.
// Experience descriptions send no override and get the service's bullet-point prompt.

/// Summary rewrite. Replace `{text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Rewrite the following professional summary for a resume. \
    Keep it to three or four sentences, lead with the candidate's strongest qualification, \
    and use confident, concrete language. Return only the rewritten summary.\n\n\
    Summary: \"{text}\"";

/// Project description rewrite. Replace `{text}` before sending.
pub const PROJECT_PROMPT_TEMPLATE: &str = "Rewrite the following project description for a resume. \
    Describe what was built, the technologies used, and the outcome, one point per line. \
    Return only the rewritten description.\n\n\
    Project description: \"{text}\"";

pub fn summary_prompt(text: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{text}", text)
}

pub fn project_prompt(text: &str) -> String {
    PROJECT_PROMPT_TEMPLATE.replace("{text}", text)
}
