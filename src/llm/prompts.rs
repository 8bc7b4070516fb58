//! Fixed prompt for the narrative fit assessment

use serde::{Deserialize, Serialize};

/// Texts embedded verbatim into the prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub job_content: String,
    pub resume_content: String,
}

/// Render the assessment prompt.
///
/// Both texts are inserted in a single pass, so placeholder-looking text
/// inside a resume is never substituted a second time.
pub fn render_assessment_prompt(params: &PromptParams) -> String {
    format!(
        r#"You are an experienced recruiter. Analyse how well the candidate matches the requirements of the job posting.
Provide:
1. How well the candidate fits the role;
2. The candidate's strengths and weaknesses;
3. An estimated match percentage;

Answer in the language of the job posting.

Job posting:
{job}

Resume:
{resume}
"#,
        job = params.job_content,
        resume = params.resume_content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts() {
        let params = PromptParams {
            job_content: "Senior Software Engineer role requiring React and Python.".to_string(),
            resume_content: "Software Engineer with Python experience at Tech Corp.".to_string(),
        };

        let prompt = render_assessment_prompt(&params);

        assert!(prompt.contains("Senior Software Engineer role requiring React and Python."));
        assert!(prompt.contains("Software Engineer with Python experience at Tech Corp."));
        assert!(prompt.contains("strengths and weaknesses"));
        assert!(prompt.contains("match percentage"));
        assert!(prompt.find("Job posting:").unwrap() < prompt.find("Resume:").unwrap());
    }

    #[test]
    fn test_texts_are_verbatim() {
        let params = PromptParams {
            job_content: "  Требуется {resume}\n\nс опытом  ".to_string(),
            resume_content: "{job} literal braces".to_string(),
        };

        let prompt = render_assessment_prompt(&params);

        assert!(prompt.contains("  Требуется {resume}\n\nс опытом  "));
        assert!(prompt.contains("{job} literal braces"));
    }
}
