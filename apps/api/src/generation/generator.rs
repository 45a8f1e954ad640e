//! Résumé tailoring: validate inputs → build prompt → LLM → parse reply →
//! format the tailored résumé as HTML.

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::formatter::reader::looks_like_html;
use crate::formatter::{parse_resume_text, read_html, render_html};
use crate::generation::prompts::{TAILOR_PROMPT_TEMPLATE, TAILOR_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, TRUTHFULNESS_INSTRUCTION};
use crate::llm_client::{parse_json_reply, strip_json_fences, CompletionProvider, LlmError};
use crate::models::resume::TailoredResume;

/// Each prompt input is cut to this many characters.
pub const MAX_PROMPT_INPUT_CHARS: usize = 20_000;

/// Used when the model's reply is not the requested JSON object.
pub const DEFAULT_EXPLANATION: &str =
    "Enhanced your resume to match the job posting requirements with professional formatting.";

/// Minimum trimmed lengths, in characters, of the two generation inputs.
#[derive(Debug, Clone, Copy)]
pub struct InputMinimums {
    pub job_description: usize,
    pub resume_text: usize,
}

/// Uploaded file plus job URL or pasted posting.
pub const FILE_FLOW_MINIMUMS: InputMinimums = InputMinimums {
    job_description: 50,
    resume_text: 100,
};

/// Pasted job description plus pasted résumé text.
pub const TEXT_FLOW_MINIMUMS: InputMinimums = InputMinimums {
    job_description: 20,
    resume_text: 50,
};

#[derive(Debug, Clone)]
pub struct TailoredOutput {
    pub html: String,
    pub explanation: String,
}

pub fn validate_inputs(
    job_description: &str,
    resume_text: &str,
    minimums: InputMinimums,
) -> Result<(), AppError> {
    let jd_len = job_description.trim().chars().count();
    if jd_len < minimums.job_description {
        return Err(AppError::Validation(format!(
            "Job description too short ({jd_len} characters, minimum {}). \
            Paste the full job description or check the job URL.",
            minimums.job_description
        )));
    }

    let resume_len = resume_text.trim().chars().count();
    if resume_len < minimums.resume_text {
        return Err(AppError::Validation(format!(
            "Resume text too short ({resume_len} characters, minimum {}). \
            Ensure the file contains selectable text.",
            minimums.resume_text
        )));
    }

    Ok(())
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn build_tailor_prompt(job_description: &str, resume_text: &str) -> String {
    TAILOR_PROMPT_TEMPLATE
        .replace("{truthfulness}", TRUTHFULNESS_INSTRUCTION)
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

/// Model output to a styled HTML page. HTML replies are read back into
/// blocks and re-rendered, so every résumé carries the same stylesheet.
pub fn render_resume_output(resume: &str) -> String {
    let doc = if looks_like_html(resume) {
        read_html(resume)
    } else {
        parse_resume_text(resume)
    };
    debug!(
        "Tailored resume: {} blocks, sections: {:?}",
        doc.blocks.len(),
        doc.sections().collect::<Vec<_>>()
    );
    render_html(&doc)
}

/// Runs one tailoring call. Inputs must already be validated.
pub async fn tailor_resume(
    llm: &dyn CompletionProvider,
    job_description: &str,
    resume_text: &str,
) -> Result<TailoredOutput, AppError> {
    let jd = truncate_chars(job_description.trim(), MAX_PROMPT_INPUT_CHARS);
    let resume = truncate_chars(resume_text.trim(), MAX_PROMPT_INPUT_CHARS);
    if jd.len() < job_description.trim().len() || resume.len() < resume_text.trim().len() {
        warn!(
            "Prompt inputs truncated to {} chars (jd={}, resume={})",
            MAX_PROMPT_INPUT_CHARS,
            job_description.len(),
            resume_text.len()
        );
    }

    let prompt = build_tailor_prompt(jd, resume);
    let system = format!("{TAILOR_SYSTEM} {JSON_ONLY_SYSTEM}");

    info!("Calling LLM for tailoring, prompt length: {}", prompt.len());
    let raw = llm
        .complete(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Tailoring LLM call failed: {e}")))?;
    info!("LLM response received, length: {}", raw.len());

    let (explanation, tailored) = match parse_json_reply::<TailoredResume>(&raw) {
        Ok(parsed) => {
            if parsed.explanation.trim().is_empty() || parsed.resume.trim().is_empty() {
                return Err(AppError::Llm(
                    "AI response incomplete: missing explanation or resume".to_string(),
                ));
            }
            (parsed.explanation, parsed.resume)
        }
        Err(LlmError::Parse(e)) => {
            warn!("LLM reply was not JSON ({e}), using raw text as the resume");
            (DEFAULT_EXPLANATION.to_string(), strip_json_fences(&raw).to_string())
        }
        Err(e) => return Err(e.into()),
    };

    if tailored.trim().is_empty() {
        return Err(AppError::Llm("AI returned an empty resume".to_string()));
    }

    Ok(TailoredOutput {
        html: render_resume_output(&tailored),
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubProvider;

    const JD: &str = "Senior Rust Engineer. Build low-latency payment services with Tokio and Postgres.";
    const RESUME: &str = "Jane Doe\njane@example.com\nEXPERIENCE\nEngineer | Acme | 2019 - Present\n• Built a ledger service handling 2M transactions per day";

    #[test]
    fn test_validate_inputs_minimums() {
        assert!(validate_inputs(JD, RESUME, TEXT_FLOW_MINIMUMS).is_ok());
        let err = validate_inputs("too short", RESUME, TEXT_FLOW_MINIMUMS).unwrap_err();
        assert!(err.to_string().contains("Job description too short"));
        let err = validate_inputs(JD, "Jane Doe", FILE_FLOW_MINIMUMS).unwrap_err();
        assert!(err.to_string().contains("Resume text too short"));
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        let jd = "é".repeat(20);
        assert!(validate_inputs(&jd, &"x".repeat(50), TEXT_FLOW_MINIMUMS).is_ok());
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_build_tailor_prompt_fills_slots() {
        let prompt = build_tailor_prompt("JD-TEXT", "RESUME-TEXT");
        assert!(prompt.contains("JD-TEXT"));
        assert!(prompt.contains("RESUME-TEXT"));
        assert!(prompt.contains("Never invent employers"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{truthfulness}"));
    }

    #[tokio::test]
    async fn test_tailor_resume_parses_json_reply() {
        let reply = serde_json::json!({
            "explanation": "## Strategy\nLed with payments work.",
            "resume": RESUME,
        })
        .to_string();
        let llm = StubProvider::replying(format!("```json\n{reply}\n```"));

        let out = tailor_resume(&llm, JD, RESUME).await.unwrap();
        assert_eq!(out.explanation, "## Strategy\nLed with payments work.");
        assert!(out.html.starts_with("<!DOCTYPE html>"));
        assert!(out.html.contains("<h1 class=\"name\">Jane Doe</h1>"));

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("low-latency payment services"));
    }

    #[tokio::test]
    async fn test_tailor_resume_rerenders_html_reply() {
        let reply = serde_json::json!({
            "explanation": "Reworked.",
            "resume": "<div><h1>Jane Doe</h1><h2>Skills</h2><ul><li>Rust</li></ul></div>",
        })
        .to_string();
        let llm = StubProvider::replying(reply);

        let out = tailor_resume(&llm, JD, RESUME).await.unwrap();
        assert!(out.html.contains("<ul class=\"bullet-list\">\n<li>Rust</li>"));
        assert!(out.html.contains("<style>"));
    }

    #[tokio::test]
    async fn test_tailor_resume_falls_back_on_non_json() {
        let llm = StubProvider::replying(RESUME);
        let out = tailor_resume(&llm, JD, RESUME).await.unwrap();
        assert_eq!(out.explanation, DEFAULT_EXPLANATION);
        assert!(out.html.contains("<h2>EXPERIENCE</h2>"));
    }

    #[tokio::test]
    async fn test_tailor_resume_rejects_incomplete_json() {
        let llm = StubProvider::replying(r#"{"explanation": "", "resume": "x"}"#);
        let err = tailor_resume(&llm, JD, RESUME).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(msg) if msg.contains("incomplete")));
    }

    #[tokio::test]
    async fn test_tailor_resume_propagates_provider_failure() {
        let llm = StubProvider::failing();
        let err = tailor_resume(&llm, JD, RESUME).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_tailor_resume_truncates_long_inputs() {
        let llm = StubProvider::replying(r#"{"explanation": "ok", "resume": "Jane Doe"}"#);
        let long_jd = "x".repeat(MAX_PROMPT_INPUT_CHARS + 500);
        tailor_resume(&llm, &long_jd, RESUME).await.unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(!prompt.contains(&"x".repeat(MAX_PROMPT_INPUT_CHARS + 1)));
        assert!(prompt.contains(&"x".repeat(MAX_PROMPT_INPUT_CHARS)));
    }
}
