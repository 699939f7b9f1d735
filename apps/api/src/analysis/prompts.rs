// All LLM prompt constants for the Analysis Pipeline.
// Cross-cutting system prompts live in llm_client::prompts.

/// Résumé summary prompt. Replace `{resume_text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Summarize this résumé, highlighting the \
    candidate's skills, education, and experience. Be concise and factual.\n\n\
    RESUME:\n{resume_text}";

/// Skill-gap prompt. Replace `{resume_text}` before sending.
pub const SKILL_GAPS_PROMPT_TEMPLATE: &str = "Analyze this résumé and highlight the \
    missing skills, certifications, and experiences the candidate would need for \
    better job opportunities in the roles the résumé implies.\n\n\
    RESUME:\n{resume_text}";

/// Career roadmap prompt. Replace `{resume_text}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = "Based on this résumé, suggest a future \
    roadmap to improve this person's career prospects: skills to learn, \
    certifications to obtain, and industry exposure to seek.\n\n\
    RESUME:\n{resume_text}";

/// Job-search keyword extraction prompt. Replace `{resume_text}` before sending.
/// Paired with `LIST_ONLY_SYSTEM` so the completion is a bare comma-separated list.
pub const KEYWORDS_PROMPT_TEMPLATE: &str = "Based on this résumé, suggest the best \
    job titles and keywords for searching jobs. Give a comma-separated list only, \
    no explanation.\n\n\
    RESUME:\n{resume_text}";
