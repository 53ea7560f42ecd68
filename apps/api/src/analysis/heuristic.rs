//! Offline résumé analysis used when no reasoning-service credential is set.
//!
//! Only the email address and the technical skills come from the document;
//! every other field is a fixed placeholder. The `(Mock)` marker in the name
//! lets callers tell that no real analysis happened.

use crate::models::profile::{
    Analysis, Education, LanguageSkill, PersonalInfo, Project, Skills, StructuredProfile,
    WorkExperience,
};

pub const MOCK_MARKER: &str = "(Mock)";
pub const PLACEHOLDER_EMAIL: &str = "sample@email.com";
pub const HEURISTIC_RATING: f64 = 7.5;

/// Checked in this order; output keeps this order.
const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "react",
    "node",
    "sql",
    "git",
    "aws",
    "docker",
    "kubernetes",
];
const DEFAULT_SKILLS: &[&str] = &["Python", "JavaScript", "SQL"];
const EMAIL_TRIM: &[char] = &['.', ',', '(', ')', '[', ']'];

pub fn heuristic_profile(resume_text: &str) -> StructuredProfile {
    let lowered = resume_text.to_lowercase();
    let detected = detect_skills(&lowered);

    let core_skills = non_empty_or(&detected, DEFAULT_SKILLS);
    let work_technologies = non_empty_or(&detected[..detected.len().min(3)], &["Python", "React"]);
    let project_technologies = non_empty_or(&detected[..detected.len().min(2)], &["Python"]);

    StructuredProfile {
        personal: PersonalInfo {
            name: Some(format!("Sample Name {MOCK_MARKER}")),
            email: Some(find_email(&lowered).unwrap_or_else(|| PLACEHOLDER_EMAIL.to_string())),
            phone: Some("+1-234-567-8900".to_string()),
            address: Some("Sample Address".to_string()),
            linkedin: None,
            github: None,
            website: None,
        },
        skills: Skills {
            core_skills,
            soft_skills: strings(&["Communication", "Problem Solving", "Team Work"]),
            certifications: Vec::new(),
            languages: vec![LanguageSkill {
                language: "English".to_string(),
                proficiency: "Native".to_string(),
            }],
        },
        work_experience: vec![WorkExperience {
            company: "Sample Company".to_string(),
            position: "Software Developer".to_string(),
            duration: "2022 - Present".to_string(),
            location: Some("Remote".to_string()),
            description: strings(&["Developed applications", "Collaborated with team"]),
            technologies: work_technologies,
        }],
        education: vec![Education {
            institution: "Sample University".to_string(),
            degree: "Bachelor of Science".to_string(),
            field_of_study: "Computer Science".to_string(),
            graduation_date: Some("2022".to_string()),
            gpa: None,
            location: Some("Sample City".to_string()),
        }],
        projects: vec![Project {
            name: "Sample Project".to_string(),
            description: "A sample project for demonstration".to_string(),
            technologies: project_technologies,
            duration: Some("3 months".to_string()),
            url: None,
        }],
        achievements: strings(&["Mock Achievement 1", "Mock Achievement 2"]),
        analysis: Analysis {
            rating: HEURISTIC_RATING,
            strengths: "This is a mock analysis. The resume shows technical skills and experience."
                .to_string(),
            improvement_areas: "Mock suggestion: Add more quantifiable achievements and specific project outcomes."
                .to_string(),
            upskill_suggestions: "Mock suggestion: Consider learning cloud technologies like AWS or Azure."
                .to_string(),
            missing_sections: strings(&["Professional Summary", "Certifications"]),
        },
        raw_text: resume_text.to_string(),
    }
}

/// First whitespace-delimited token containing both `@` and `.`, with
/// surrounding punctuation and brackets removed.
fn find_email(lowered: &str) -> Option<String> {
    lowered
        .split_whitespace()
        .find(|word| word.contains('@') && word.contains('.'))
        .map(|word| word.trim_matches(EMAIL_TRIM).to_string())
}

/// Substring match against the whole text, so "java" also fires on "javascript".
fn detect_skills(lowered: &str) -> Vec<String> {
    SKILL_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .map(|kw| capitalize(kw))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty_or(found: &[String], fallback: &[&str]) -> Vec<String> {
    if found.is_empty() {
        strings(fallback)
    } else {
        found.to_vec()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
