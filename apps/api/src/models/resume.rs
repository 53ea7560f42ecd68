use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::profile::{
    Analysis, Education, LanguageSkill, PersonalInfo, Project, Skills, StructuredProfile,
    WorkExperience,
};

/// Flat persistence shape of one analyzed résumé: one column per profile leaf,
/// the upload filename, and the whole profile archived in `structured_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeRecord {
    pub filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub core_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<LanguageSkill>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub achievements: Vec<String>,
    pub resume_rating: f64,
    pub improvement_areas: String,
    pub upskill_suggestions: String,
    pub strengths: String,
    pub missing_sections: Vec<String>,
    pub raw_text: String,
    pub structured_data: Value,
}

impl ResumeRecord {
    /// Maps a finished profile onto the storage schema. Total: every profile
    /// field already carries a default.
    pub fn from_profile(profile: &StructuredProfile, filename: &str) -> Self {
        let StructuredProfile {
            personal,
            skills,
            work_experience,
            education,
            projects,
            achievements,
            analysis,
            raw_text,
        } = profile.clone();

        Self {
            filename: filename.to_string(),
            name: personal.name,
            email: personal.email,
            phone: personal.phone,
            address: personal.address,
            linkedin: personal.linkedin,
            github: personal.github,
            website: personal.website,
            core_skills: skills.core_skills,
            soft_skills: skills.soft_skills,
            certifications: skills.certifications,
            languages: skills.languages,
            work_experience,
            education,
            projects,
            achievements,
            resume_rating: analysis.rating,
            improvement_areas: analysis.improvement_areas,
            upskill_suggestions: analysis.upskill_suggestions,
            strengths: analysis.strengths,
            missing_sections: analysis.missing_sections,
            raw_text,
            // Serializing plain data structs cannot fail.
            structured_data: serde_json::to_value(profile).unwrap_or(Value::Null),
        }
    }
}

/// A persisted résumé as read back from the `resumes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub core_skills: Json<Vec<String>>,
    pub soft_skills: Json<Vec<String>>,
    pub certifications: Json<Vec<String>>,
    pub languages: Json<Vec<LanguageSkill>>,
    pub work_experience: Json<Vec<WorkExperience>>,
    pub education: Json<Vec<Education>>,
    pub projects: Json<Vec<Project>>,
    pub achievements: Json<Vec<String>>,
    pub resume_rating: f64,
    pub improvement_areas: String,
    pub upskill_suggestions: String,
    pub strengths: String,
    pub missing_sections: Json<Vec<String>>,
    pub raw_text: String,
    pub structured_data: Value,
}

impl ResumeRow {
    /// Rebuilds the structured profile from the flat columns.
    pub fn into_profile(self) -> StructuredProfile {
        StructuredProfile {
            personal: PersonalInfo {
                name: self.name,
                email: self.email,
                phone: self.phone,
                address: self.address,
                linkedin: self.linkedin,
                github: self.github,
                website: self.website,
            },
            skills: Skills {
                core_skills: self.core_skills.0,
                soft_skills: self.soft_skills.0,
                certifications: self.certifications.0,
                languages: self.languages.0,
            },
            work_experience: self.work_experience.0,
            education: self.education.0,
            projects: self.projects.0,
            achievements: self.achievements.0,
            analysis: Analysis {
                rating: self.resume_rating,
                strengths: self.strengths,
                improvement_areas: self.improvement_areas,
                upskill_suggestions: self.upskill_suggestions,
                missing_sections: self.missing_sections.0,
            },
            raw_text: self.raw_text,
        }
    }
}

/// Summary line for the résumé table view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeListItem {
    pub id: i64,
    pub filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub resume_rating: Option<f64>,
}

#[cfg(test)]
pub(crate) fn row_from_record(id: i64, upload_date: DateTime<Utc>, record: ResumeRecord) -> ResumeRow {
    ResumeRow {
        id,
        filename: record.filename,
        upload_date,
        name: record.name,
        email: record.email,
        phone: record.phone,
        address: record.address,
        linkedin: record.linkedin,
        github: record.github,
        website: record.website,
        core_skills: Json(record.core_skills),
        soft_skills: Json(record.soft_skills),
        certifications: Json(record.certifications),
        languages: Json(record.languages),
        work_experience: Json(record.work_experience),
        education: Json(record.education),
        projects: Json(record.projects),
        achievements: Json(record.achievements),
        resume_rating: record.resume_rating,
        improvement_areas: record.improvement_areas,
        upskill_suggestions: record.upskill_suggestions,
        strengths: record.strengths,
        missing_sections: Json(record.missing_sections),
        raw_text: record.raw_text,
        structured_data: record.structured_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::heuristic::heuristic_profile;

    fn sample_profile() -> StructuredProfile {
        let mut profile = heuristic_profile("Jane Doe\njane@example.com\nRust, Docker, SQL");
        profile.personal.linkedin = Some("https://linkedin.com/in/jane".to_string());
        profile.education[0].gpa = Some("3.9".to_string());
        profile
    }

    #[test]
    fn test_record_flattens_every_leaf() {
        let profile = sample_profile();
        let record = ResumeRecord::from_profile(&profile, "jane.pdf");

        assert_eq!(record.filename, "jane.pdf");
        assert_eq!(record.email.as_deref(), Some("jane@example.com"));
        assert_eq!(record.linkedin, profile.personal.linkedin);
        assert_eq!(record.core_skills, profile.skills.core_skills);
        assert_eq!(record.languages, profile.skills.languages);
        assert_eq!(record.work_experience, profile.work_experience);
        assert_eq!(record.resume_rating, profile.analysis.rating);
        assert_eq!(record.missing_sections, profile.analysis.missing_sections);
        assert_eq!(record.raw_text, profile.raw_text);
    }

    #[test]
    fn test_structured_data_archives_whole_profile() {
        let profile = sample_profile();
        let record = ResumeRecord::from_profile(&profile, "jane.pdf");
        let archived: StructuredProfile =
            serde_json::from_value(record.structured_data.clone()).unwrap();
        assert_eq!(archived, profile);
    }

    #[test]
    fn test_round_trip_through_row_reconstructs_profile() {
        let profile = sample_profile();
        let record = ResumeRecord::from_profile(&profile, "jane.pdf");
        let row = row_from_record(7, Utc::now(), record);
        assert_eq!(row.into_profile(), profile);
    }

    #[test]
    fn test_default_profile_formats_without_gaps() {
        let record = ResumeRecord::from_profile(&StructuredProfile::default(), "empty.pdf");
        assert_eq!(record.name, None);
        assert!(record.core_skills.is_empty());
        assert_eq!(record.resume_rating, 0.0);
        assert_eq!(record.improvement_areas, "");
    }
}
