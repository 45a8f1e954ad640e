// Prompt constants for résumé tailoring.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System instruction for the tailoring call.
pub const TAILOR_SYSTEM: &str = "You are a world-class career coach and expert resume writer \
    with a deep understanding of HR, recruitment practices and applicant tracking systems. \
    You rewrite resumes so they are the strongest truthful application for a specific job.";

/// Tailoring prompt. Replace `{job_description}` and `{resume_text}` before sending.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below so it is the best possible application for the job description.

KEY INSTRUCTIONS:
1. Mirror the job description: identify its key skills, technologies and qualifications, and surface the matching experience using the same language where it is accurate.
2. Tailor the content: reorder and rephrase roles, summaries and skill lists so the most relevant experience comes first.
3. Quantify achievements: rephrase responsibilities as measurable outcomes wherever the original supports it.
4. Optimise for ATS screening: include the job's keywords naturally throughout.
5. Preserve the structure: keep the original's sections (for example Summary, Experience, Education, Skills) and the candidate's name and contact details at the top.
6. Drop experience or skills that are irrelevant to the target role.

{truthfulness}

OUTPUT FORMAT:
Return a single JSON object with exactly two string fields:
{
  "explanation": "Markdown. Start with a short summary of your strategy, then list the key changes and why each one helps for this job.",
  "resume": "The full rewritten resume as plain text. One item per line. Section titles on their own line. Bullets start with '• '. Job lines read 'Title | Company | Dates'."
}

JOB DESCRIPTION:
---
{job_description}
---

ORIGINAL RESUME TEXT:
---
{resume_text}
---"#;
