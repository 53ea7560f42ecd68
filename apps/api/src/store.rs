//! Résumé persistence behind a small create/read/delete trait.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; production uses `PgResumeStore`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::models::resume::{ResumeListItem, ResumeRecord, ResumeRow};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Writes one new record and returns its assigned id.
    async fn insert(&self, record: &ResumeRecord) -> Result<i64>;

    /// All résumés, newest upload first.
    async fn list(&self) -> Result<Vec<ResumeListItem>>;

    async fn get(&self, id: i64) -> Result<Option<ResumeRow>>;

    /// Returns `false` when no record had that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, record: &ResumeRecord) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO resumes
                (filename, name, email, phone, address, linkedin, github, website,
                 core_skills, soft_skills, certifications, languages,
                 work_experience, education, projects, achievements,
                 resume_rating, improvement_areas, upskill_suggestions, strengths,
                 missing_sections, raw_text, structured_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
            RETURNING id
            "#,
        )
        .bind(&record.filename)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(&record.linkedin)
        .bind(&record.github)
        .bind(&record.website)
        .bind(Json(&record.core_skills))
        .bind(Json(&record.soft_skills))
        .bind(Json(&record.certifications))
        .bind(Json(&record.languages))
        .bind(Json(&record.work_experience))
        .bind(Json(&record.education))
        .bind(Json(&record.projects))
        .bind(Json(&record.achievements))
        .bind(record.resume_rating)
        .bind(&record.improvement_areas)
        .bind(&record.upskill_suggestions)
        .bind(&record.strengths)
        .bind(Json(&record.missing_sections))
        .bind(&record.raw_text)
        .bind(&record.structured_data)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored resume {id} ({})", record.filename);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<ResumeListItem>> {
        let items = sqlx::query_as::<_, ResumeListItem>(
            r#"
            SELECT id, filename, name, email, phone, upload_date, resume_rating
            FROM resumes
            ORDER BY upload_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn get(&self, id: i64) -> Result<Option<ResumeRow>> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
