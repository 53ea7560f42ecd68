// Résumé analysis prompt template.
// The JSON shape below mirrors `StructuredProfile` field for field.

pub const RESUME_ANALYSIS_PROMPT: &str = r#"Analyze the following resume and extract comprehensive information as a JSON object. Be thorough and accurate.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "personal_info": {
    "name": "string" | null,
    "email": "string" | null,
    "phone": "string" | null,
    "address": "string" | null,
    "linkedin": "LinkedIn profile URL" | null,
    "github": "GitHub profile URL" | null,
    "website": "personal website URL" | null
  },
  "skills": {
    "core_skills": ["technical skill"],
    "soft_skills": ["soft skill"],
    "certifications": ["certification"],
    "languages": [{"language": "string", "proficiency": "string"}]
  },
  "work_experience": [
    {
      "company": "string",
      "position": "job title",
      "duration": "employment duration",
      "location": "string" | null,
      "description": ["responsibility or accomplishment"],
      "technologies": ["technology used"]
    }
  ],
  "education": [
    {
      "institution": "string",
      "degree": "string",
      "field_of_study": "string",
      "graduation_date": "string" | null,
      "gpa": "string" | null,
      "location": "string" | null
    }
  ],
  "projects": [
    {
      "name": "string",
      "description": "string",
      "technologies": ["technology used"],
      "duration": "string" | null,
      "url": "string" | null
    }
  ],
  "achievements": ["achievement, award or publication"],
  "analysis": {
    "resume_rating": number,
    "strengths": "key strengths of this resume",
    "improvement_areas": "areas that need improvement, with specific suggestions",
    "upskill_suggestions": "skills to learn and directions for career growth",
    "missing_sections": ["commonly expected resume section that is missing"]
  }
}

RULES:
1. Extract all available information accurately. Do NOT invent details.
2. For missing information use null, or an empty array for list fields.
3. resume_rating is a number from 0 to 10 reflecting completeness, clarity and professional presentation.
4. improvement_areas must give specific, actionable suggestions.
5. upskill_suggestions must be relevant to the candidate's background.
6. missing_sections lists conventional resume sections that are absent (e.g. "Professional Summary", "Certifications").
7. Return ONLY the JSON object. No surrounding text, no markdown, no code fences."#;

/// Renders the analysis prompt for one résumé.
pub fn build_analysis_prompt(resume_text: &str) -> String {
    RESUME_ANALYSIS_PROMPT.replace("{resume_text}", resume_text)
}
