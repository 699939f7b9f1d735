//! Skill extraction and job-match scoring over raw résumé text.
//!
//! Curated keyword lists, matched case-insensitively. The LLM keyword call is
//! free-form; this module is the deterministic complement used for scoring.

use serde::Serialize;

const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "sql",
    "nosql",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "html",
    "css",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "rest api",
    "graphql",
    "microservices",
    "agile",
    "scrum",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical",
    "creative",
    "adaptable",
    "time management",
    "collaboration",
    "critical thinking",
    "decision making",
];

#[derive(Debug, Clone, Serialize)]
pub struct SkillProfile {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub total_count: usize,
}

/// Scans the résumé text for known skills. Each skill appears at most once,
/// in curated-list order.
pub fn extract_skills(resume_text: &str) -> SkillProfile {
    let text_lower = resume_text.to_lowercase();
    let technical: Vec<String> = TECHNICAL_SKILLS
        .iter()
        .filter(|s| text_lower.contains(*s))
        .map(|s| s.to_string())
        .collect();
    let soft: Vec<String> = SOFT_SKILLS
        .iter()
        .filter(|s| text_lower.contains(*s))
        .map(|s| s.to_string())
        .collect();
    let total_count = technical.len() + soft.len();
    SkillProfile {
        technical,
        soft,
        total_count,
    }
}

/// Scores how well résumé skills match a posting, 0–100: the fraction of
/// skills found in the job text, plus +5 per job-title word that appears in
/// the skill set, clamped at 100. No skills → 0.
pub fn job_match_score(skills: &[String], job_title: &str, job_description: &str) -> u32 {
    if skills.is_empty() {
        return 0;
    }
    let job_text = format!("{} {}", job_title, job_description).to_lowercase();
    let skill_list: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();

    let matches = skill_list.iter().filter(|s| job_text.contains(s.as_str())).count();
    let mut score = ((matches as f64 / skill_list.len() as f64) * 100.0) as u32;

    let joined_skills = skill_list.join(" ");
    let title_matches = job_title
        .to_lowercase()
        .split_whitespace()
        .filter(|w| joined_skills.contains(*w))
        .count() as u32;
    score = (score + title_matches * 5).min(100);
    score
}
