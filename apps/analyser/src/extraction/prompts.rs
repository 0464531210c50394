// LLM prompt templates for structured extraction.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Résumé extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT: &str = r#"You are an expert resume parser. Extract the following information from the resume text below.

Return a JSON object with this EXACT schema:
{
  "personal_info": {"name": "...", "email": "...", "links": ["..."]},
  "skills": ["...", "..."],
  "experience": [{"company": "...", "role": "...", "duration": "...", "description": "..."}],
  "education": [{"institution": "...", "degree": "...", "date": "..."}],
  "projects": [{"name": "...", "tools_used": ["..."], "date": "...", "summary": "..."}],
  "career_gaps": [{"period": "...", "reason_speculated": "..."}],
  "summary": "..."
}

Rules:
- "skills" lists technical and soft skills exactly as named in the resume.
- "tools_used" names tools and technologies such as Python or Excel.
- "career_gaps" lists periods without employment, with a reason speculated from surrounding context.
- Use an empty string or empty list when a field is not present. Never invent details.

RESUME TEXT:
{resume_text}"#;

/// Job description extraction prompt. Replace `{jd_text}` before sending.
pub const JD_EXTRACT_PROMPT: &str = r#"You are an expert HR specialist. Extract the following information from the job description below.

Return a JSON object with this EXACT schema:
{
  "role_title": "...",
  "required_skills": ["..."],
  "nice_to_have_skills": ["..."],
  "experience_level": "...",
  "key_responsibilities": ["..."]
}

Rules:
- "required_skills" are mandatory: phrases like "required", "must have", minimum years.
- "nice_to_have_skills" are optional: phrases like "preferred", "bonus", "a plus".
- "experience_level" is short, e.g. "Senior" or "3+ years".
- Use an empty string or empty list when a field is not present.

JOB DESCRIPTION TEXT:
{jd_text}"#;
