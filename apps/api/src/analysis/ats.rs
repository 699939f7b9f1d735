//! ATS compatibility scoring — deterministic, local, no LLM involved.
//!
//! Scores a résumé out of 100 across six categories an applicant-tracking
//! system typically screens for, and maps the total to a letter grade.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const MAX_SCORE: u32 = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex")
});

static SECTION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)experience|work history",
        r"(?i)education|qualification",
        r"(?i)skills|technical skills",
        r"(?i)projects|portfolio",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static DATE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(19|20)\d{2}\b",
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+(19|20)\d{2}\b",
        r"\b\d{1,2}/\d{1,2}/(19|20)\d{2}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static ACHIEVEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+%|\d+\+|[$€£]\d+|\d+[kK]\+?").expect("valid regex"));

const ACTION_VERBS: &[&str] = &[
    "developed",
    "created",
    "managed",
    "led",
    "designed",
    "implemented",
    "built",
    "achieved",
    "improved",
    "increased",
    "reduced",
    "optimized",
    "coordinated",
    "analyzed",
    "established",
    "maintained",
];

/// Per-category points. Category maxima: 20/20/15/20/15/10.
#[derive(Debug, Clone, Serialize)]
pub struct AtsBreakdown {
    pub contact_info: u32,
    pub section_headers: u32,
    pub dates: u32,
    pub action_verbs: u32,
    pub quantifiable_achievements: u32,
    pub optimal_length: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtsScore {
    pub total: u32,
    pub max: u32,
    pub grade: &'static str,
    pub breakdown: AtsBreakdown,
}

pub fn calculate_ats_score(resume_text: &str) -> AtsScore {
    let text_lower = resume_text.to_lowercase();

    let mut contact_info = 0;
    if EMAIL_RE.is_match(resume_text) {
        contact_info += 10;
    }
    if PHONE_RE.is_match(resume_text) {
        contact_info += 10;
    }

    let section_headers = SECTION_RES
        .iter()
        .filter(|re| re.is_match(resume_text))
        .count() as u32
        * 5;

    let date_count: usize = DATE_RES.iter().map(|re| re.find_iter(resume_text).count()).sum();
    let dates = (date_count as u32 * 3).min(15);

    let verb_count = ACTION_VERBS.iter().filter(|v| text_lower.contains(*v)).count() as u32;
    let action_verbs = (verb_count * 2).min(20);

    let achievement_count = ACHIEVEMENT_RE.find_iter(resume_text).count() as u32;
    let quantifiable_achievements = (achievement_count * 3).min(15);

    let word_count = resume_text.split_whitespace().count();
    let optimal_length = match word_count {
        300..=1500 => 10,
        200..=299 | 1501..=2000 => 5,
        _ => 2,
    };

    let breakdown = AtsBreakdown {
        contact_info,
        section_headers,
        dates,
        action_verbs,
        quantifiable_achievements,
        optimal_length,
    };
    let total = (contact_info
        + section_headers
        + dates
        + action_verbs
        + quantifiable_achievements
        + optimal_length)
        .min(MAX_SCORE);

    AtsScore {
        total,
        max: MAX_SCORE,
        grade: grade_for(total),
        breakdown,
    }
}

/// Letter grade at 90/80/70/60/50 cut points.
pub fn grade_for(score: u32) -> &'static str {
    match score {
        90.. => "A+",
        80..=89 => "A",
        70..=79 => "B+",
        60..=69 => "B",
        50..=59 => "C",
        _ => "D",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = "\
        Jane Doe — jane.doe@example.com — +1 555-123-4567\n\
        EXPERIENCE\n\
        Senior Engineer, Acme (Jan 2019 - Dec 2023): led a platform team, \
        designed and implemented services, improved latency 40%, reduced \
        costs by $200k, managed 5+ engineers.\n\
        EDUCATION\n\
        B.Sc. Computer Science, 2015.\n\
        SKILLS\n\
        Python, AWS, Kubernetes.\n\
        PROJECTS\n\
        Built and optimized an open-source scheduler, achieved 10k+ stars.";

    #[test]
    fn test_contact_info_both_present() {
        let score = calculate_ats_score(STRONG_RESUME);
        assert_eq!(score.breakdown.contact_info, 20);
    }

    #[test]
    fn test_all_section_headers_found() {
        let score = calculate_ats_score(STRONG_RESUME);
        assert_eq!(score.breakdown.section_headers, 20);
    }

    #[test]
    fn test_dates_capped_at_fifteen() {
        let score = calculate_ats_score(STRONG_RESUME);
        assert_eq!(score.breakdown.dates, 15);
    }

    #[test]
    fn test_action_verbs_counted_once_each() {
        // "led led led" is still one distinct verb.
        let score = calculate_ats_score("led led led the team");
        assert_eq!(score.breakdown.action_verbs, 2);
    }

    #[test]
    fn test_achievements_detected() {
        let score = calculate_ats_score("improved throughput 40% and saved $120");
        assert_eq!(score.breakdown.quantifiable_achievements, 6);
    }

    #[test]
    fn test_empty_resume_scores_length_floor_only() {
        let score = calculate_ats_score("");
        assert_eq!(score.breakdown.optimal_length, 2);
        assert_eq!(score.total, 2);
        assert_eq!(score.grade, "D");
    }

    #[test]
    fn test_total_never_exceeds_max() {
        let score = calculate_ats_score(STRONG_RESUME);
        assert!(score.total <= MAX_SCORE);
    }

    #[test]
    fn test_grade_cut_points() {
        assert_eq!(grade_for(95), "A+");
        assert_eq!(grade_for(90), "A+");
        assert_eq!(grade_for(89), "A");
        assert_eq!(grade_for(70), "B+");
        assert_eq!(grade_for(60), "B");
        assert_eq!(grade_for(50), "C");
        assert_eq!(grade_for(49), "D");
    }
}
