//! Analysis Pipeline — four independent LLM calls over one immutable résumé text.
//!
//! The contract is "each of the four outputs is either present or explicitly
//! marked failed": one failing call degrades only its own section, never the
//! whole report.

pub mod ats;
pub mod prompts;
pub mod skills;

use serde::Serialize;
use tracing::warn;

use crate::llm_client::prompts::{CAREER_ADVISOR_SYSTEM, LIST_ONLY_SYSTEM};
use crate::llm_client::{CompletionClient, LlmError};
use self::prompts::{
    KEYWORDS_PROMPT_TEMPLATE, ROADMAP_PROMPT_TEMPLATE, SKILL_GAPS_PROMPT_TEMPLATE,
    SUMMARY_PROMPT_TEMPLATE,
};

// Per-call token budgets.
const SUMMARY_MAX_TOKENS: u32 = 500;
const SKILL_GAPS_MAX_TOKENS: u32 = 400;
const ROADMAP_MAX_TOKENS: u32 = 400;
const KEYWORDS_MAX_TOKENS: u32 = 100;

/// Why a section failed, without the raw provider error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    RateLimited,
    Transient,
    Provider,
    Empty,
}

impl From<&LlmError> for FailureKind {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::Auth { .. } => FailureKind::Auth,
            LlmError::RateLimited => FailureKind::RateLimited,
            LlmError::Transient(_) => FailureKind::Transient,
            LlmError::Api { .. } => FailureKind::Provider,
            LlmError::EmptyContent => FailureKind::Empty,
        }
    }
}

/// One free-text section of the report: present, or explicitly marked failed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Ready { text: String },
    Unavailable { kind: FailureKind, message: String },
}

impl SectionOutcome {
    fn from_result(stage: &str, result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => SectionOutcome::Ready { text },
            Err(err) => {
                warn!("{stage} degraded: {err}");
                SectionOutcome::Unavailable {
                    kind: FailureKind::from(&err),
                    message: format!("{stage} unavailable: {err}"),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SectionOutcome::Ready { .. })
    }
}

/// Search keywords extracted from the résumé, or an explicit failure marker.
/// An empty keyword list is a valid outcome, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeywordOutcome {
    Ready { keywords: Vec<String> },
    Unavailable { kind: FailureKind, message: String },
}

/// Full output of the pipeline: three free-text sections plus search keywords.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: SectionOutcome,
    pub skill_gaps: SectionOutcome,
    pub roadmap: SectionOutcome,
    pub keywords: KeywordOutcome,
}

/// Runs all four LLM calls concurrently over the same résumé text.
/// Always yields exactly four outcomes; never aborts on a single failure.
pub async fn run_analysis(resume_text: &str, llm: &dyn CompletionClient) -> AnalysisReport {
    let summary_prompt = SUMMARY_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let gaps_prompt = SKILL_GAPS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let roadmap_prompt = ROADMAP_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let keywords_prompt = KEYWORDS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);

    let (summary, gaps, roadmap, keywords) = tokio::join!(
        llm.complete(&summary_prompt, CAREER_ADVISOR_SYSTEM, SUMMARY_MAX_TOKENS),
        llm.complete(&gaps_prompt, CAREER_ADVISOR_SYSTEM, SKILL_GAPS_MAX_TOKENS),
        llm.complete(&roadmap_prompt, CAREER_ADVISOR_SYSTEM, ROADMAP_MAX_TOKENS),
        llm.complete(&keywords_prompt, LIST_ONLY_SYSTEM, KEYWORDS_MAX_TOKENS),
    );

    AnalysisReport {
        summary: SectionOutcome::from_result("summary", summary),
        skill_gaps: SectionOutcome::from_result("skill-gap analysis", gaps),
        roadmap: SectionOutcome::from_result("career roadmap", roadmap),
        keywords: match keywords {
            Ok(raw) => KeywordOutcome::Ready {
                keywords: parse_keyword_list(&raw),
            },
            Err(err) => {
                warn!("keyword extraction degraded: {err}");
                KeywordOutcome::Unavailable {
                    kind: FailureKind::from(&err),
                    message: format!("keyword extraction unavailable: {err}"),
                }
            }
        },
    }
}

/// Parses a comma-separated completion into an ordered keyword list.
/// Tolerates stray newlines and quoting; drops empty entries.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.replace('\n', " ")
        .split(',')
        .map(|kw| kw.trim().trim_matches(|c| c == '"' || c == '\'' || c == '.').trim())
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Stub completion client: answers from a fixed table keyed by a prompt
    /// substring, fails every stage whose key is absent.
    struct StubLlm {
        answers: Vec<(&'static str, Result<String, ()>)>,
    }

    impl StubLlm {
        fn succeeding_all() -> Self {
            Self {
                answers: vec![
                    ("Summarize", Ok("5 years Python and AWS experience.".into())),
                    (
                        "missing skills",
                        Ok("Missing: Kubernetes experience, CKA certification.".into()),
                    ),
                    ("future roadmap", Ok("Learn Kubernetes, pursue CKA.".into())),
                    ("comma-separated list", Ok("python developer, cloud engineer".into())),
                ],
            }
        }

        fn failing(keys: &[&'static str]) -> Self {
            let mut stub = Self::succeeding_all();
            for (key, answer) in &mut stub.answers {
                if keys.contains(key) {
                    *answer = Err(());
                }
            }
            stub
        }
    }

    #[async_trait]
    impl CompletionClient for StubLlm {
        async fn complete(
            &self,
            prompt: &str,
            _system: &str,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            for (key, answer) in &self.answers {
                if prompt.contains(key) {
                    return answer.clone().map_err(|_| LlmError::RateLimited);
                }
            }
            Err(LlmError::EmptyContent)
        }
    }

    const RESUME: &str = "Jane Doe. 5 years Python, AWS. No Kubernetes experience.";

    #[tokio::test]
    async fn test_all_sections_ready_on_success() {
        let report = run_analysis(RESUME, &StubLlm::succeeding_all()).await;
        assert!(report.summary.is_ready());
        assert!(report.skill_gaps.is_ready());
        assert!(report.roadmap.is_ready());
        match report.keywords {
            KeywordOutcome::Ready { keywords } => {
                assert_eq!(keywords, vec!["python developer", "cloud engineer"]);
            }
            other => panic!("expected keywords, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_one_failure_degrades_only_that_section() {
        let report = run_analysis(RESUME, &StubLlm::failing(&["missing skills"])).await;
        assert!(report.summary.is_ready());
        assert!(report.roadmap.is_ready());
        match &report.skill_gaps {
            SectionOutcome::Unavailable { kind, message } => {
                assert_eq!(*kind, FailureKind::RateLimited);
                assert!(message.starts_with("skill-gap analysis unavailable"));
            }
            other => panic!("expected degraded skill gaps, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_total_failure_still_yields_four_outcomes() {
        let stub = StubLlm::failing(&[
            "Summarize",
            "missing skills",
            "future roadmap",
            "comma-separated list",
        ]);
        let report = run_analysis(RESUME, &stub).await;
        assert!(!report.summary.is_ready());
        assert!(!report.skill_gaps.is_ready());
        assert!(!report.roadmap.is_ready());
        assert!(matches!(report.keywords, KeywordOutcome::Unavailable { .. }));
    }

    /// The gap section may reference terms absent from the résumé text itself.
    #[tokio::test]
    async fn test_skill_gaps_mention_missing_terms() {
        let resume = "5 years Python, AWS, no Kubernetes experience";
        let report = run_analysis(resume, &StubLlm::succeeding_all()).await;
        match report.skill_gaps {
            SectionOutcome::Ready { text } => assert!(text.contains("Kubernetes")),
            other => panic!("expected ready gaps, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_keyword_list_trims_and_drops_empties() {
        let parsed = parse_keyword_list("backend engineer, , \"data scientist\",\n devops ");
        assert_eq!(parsed, vec!["backend engineer", "data scientist", "devops"]);
    }

    #[test]
    fn test_parse_keyword_list_empty_input() {
        assert!(parse_keyword_list("  \n ").is_empty());
    }
}
