// Prompt templates for structured profile extraction.
// `{cv_text}` / `{job_text}` are substituted verbatim with the extracted document text.

pub const CANDIDATE_PROMPT_TEMPLATE: &str = r#"Analyze the following CV and extract information in JSON format.

CV TEXT:
{cv_text}

Return ONLY a valid JSON object with exactly these fields:
{
  "name": "candidate's full name",
  "skills": ["skill1", "skill2", "skill3"],
  "education": ["degree and institution", "degree and institution"],
  "experience": ["job title, employer and duration", "job title, employer and duration"]
}

Rules:
- Return ONLY the JSON object, no additional text.
- If information is not found, use an empty string or an empty array.
- Skills should include technical skills, soft skills, tools, and technologies.
- List each position as its own experience entry."#;

pub const JOB_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract information in JSON format.

JOB DESCRIPTION:
{job_text}

Return ONLY a valid JSON object with exactly these fields:
{
  "requiredSkills": ["skill1", "skill2", "skill3"],
  "qualifications": ["qualification1", "qualification2"],
  "experienceNeeded": "X years of experience or a short description"
}

Rules:
- Return ONLY the JSON object, no additional text.
- If information is not found, use an empty string or an empty array.
- Include both technical and soft skills in requiredSkills."#;
