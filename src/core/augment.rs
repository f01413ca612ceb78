// src/core/augment.rs
//! Content augmentation - prompt construction, reply parsing and the single generation call

use serde_json::Value;
use std::sync::Arc;

use crate::app_log;
use crate::types::ResumeData;

/// Number of skills requested from the model.
pub const SKILL_COUNT: usize = 8;

/// Message shown to the user for every augmentation failure.
pub const FAILURE_MESSAGE: &str =
    "Failed to generate AI content. Please check your API key and try again.";

/// Generated content, before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    pub summary: String,
    pub skills: Vec<String>,
}

/// Detailed failure, logged but never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply JSON has the wrong shape: {0}")]
    InvalidShape(&'static str),
}

/// The one failure callers of the augmentation see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse AI response. Please try again.")]
pub struct AugmentationFailed;

/// Outbound text-generation transport.
#[rocket::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Clone)]
pub struct AugmentationClient {
    generator: Arc<dyn TextGenerator>,
}

impl AugmentationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask the model for a summary and skills tailored to the record's target
    /// title. One request, no retry; every failure collapses to `AugmentationFailed`.
    pub async fn generate_summary_and_skills(
        &self,
        record: &ResumeData,
    ) -> Result<Augmentation, AugmentationFailed> {
        let prompt = build_prompt(record);
        app_log!(
            debug,
            "Requesting summary and skills for title '{}' ({} prompt chars)",
            record.personal.title,
            prompt.len()
        );

        let outcome = self
            .generator
            .generate_text(&prompt)
            .await
            .and_then(|text| parse_reply(&text));

        match outcome {
            Ok(augmentation) => {
                app_log!(
                    info,
                    "Generated summary ({} chars) and {} skills",
                    augmentation.summary.len(),
                    augmentation.skills.len()
                );
                Ok(augmentation)
            }
            Err(e) => {
                app_log!(error, "Error generating content: {}", e);
                Err(AugmentationFailed)
            }
        }
    }
}

pub fn build_prompt(record: &ResumeData) -> String {
    let title = &record.personal.title;

    let experience_text = record
        .experience
        .iter()
        .map(|exp| {
            format!(
                "Job Title: {} at {} ({} - {})\nDescription: {}",
                exp.title, exp.company, exp.start_date, exp.end_date, exp.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let education_text = record
        .education
        .iter()
        .map(|edu| {
            format!(
                "{} from {} (Graduated {})",
                edu.degree, edu.institution, edu.grad_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let achievements_text = record
        .achievements
        .iter()
        .map(|ach| ach.description.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Based on the following resume information for a person applying for a \"{title}\" position, \
generate a professional summary and a list of {count} key skills.

Resume Information:
- Name: {name}
- Previous Job Experiences:
{experience_text}
- Education:
{education_text}
- Achievements: {achievements_text}

Instructions:
1. Professional Summary: Write a concise and compelling professional summary (3-4 sentences) that \
highlights the candidate's key qualifications, experience, and strengths, tailored for the \"{title}\" role.
2. Key Skills: Provide a list of exactly {count} relevant technical and soft skills that are crucial for a \"{title}\".

Return the response as a JSON object with two keys: \"summary\" (a string) and \"skills\" (an array of {count} strings).
Do not include any markdown formatting like ```json.
",
        count = SKILL_COUNT,
        name = record.personal.name,
    )
}

/// Parse the model's reply into an `Augmentation`.
///
/// Code fences and surrounding whitespace are removed first. `summary` must
/// be a string and `skills` an array; non-string skills are dropped.
pub fn parse_reply(raw: &str) -> Result<Augmentation, GenerationError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;

    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .ok_or(GenerationError::InvalidShape("summary is not a string"))?;

    let skills = value
        .get("skills")
        .and_then(Value::as_array)
        .ok_or(GenerationError::InvalidShape("skills is not an array"))?;

    Ok(Augmentation {
        summary: summary.to_string(),
        skills: skills
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` fences and surrounding whitespace.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = match text.strip_prefix("```json") {
        Some(rest) => rest,
        None => match text.strip_prefix("```") {
            Some(rest) => rest,
            None => return text,
        },
    };

    let inner = inner.trim();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CannedGenerator {
        reply: Result<String, &'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused"),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[rocket::async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(GenerationError::Api {
                    status: 503,
                    message: message.to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "  ```\n{\"key\": \"value\"}\n```  \n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_plain() {
        assert_eq!(strip_json_fences("\n {\"a\": 1} \n"), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_reply_filters_non_string_skills() {
        let raw = "```json\n{\"summary\": \"Builds things.\", \"skills\": [\"Rust\", 3, null, \"Go\", {\"x\": 1}]}\n```";
        let parsed = parse_reply(raw).unwrap();
        assert_eq!(parsed.summary, "Builds things.");
        assert_eq!(parsed.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_parse_reply_rejects_bad_shapes() {
        assert!(matches!(
            parse_reply("not json"),
            Err(GenerationError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_reply("{\"summary\": 1, \"skills\": []}"),
            Err(GenerationError::InvalidShape(_))
        ));
        assert!(matches!(
            parse_reply("{\"summary\": \"s\", \"skills\": \"Rust\"}"),
            Err(GenerationError::InvalidShape(_))
        ));
        assert!(matches!(
            parse_reply("[1, 2]"),
            Err(GenerationError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_prompt_embeds_record() {
        let record = ResumeData::demo();
        let prompt = build_prompt(&record);

        assert!(prompt.contains("\"Senior Frontend Developer\" position"));
        assert!(prompt.contains("- Name: Jane Doe"));
        assert!(prompt.contains(
            "Job Title: Frontend Developer at Web Innovators (Jun 2015 - Dec 2018)"
        ));
        assert!(prompt.contains(
            "B.S. in Computer Science from University of California, Berkeley (Graduated May 2015)"
        ));
        assert!(prompt.contains(
            "Speaker at React Conference 2022 on \"State Management at Scale\"., Open Source Contributor"
        ));
        assert!(prompt.contains("exactly 8"));
    }

    #[tokio::test]
    async fn test_client_returns_parsed_reply() {
        let generator =
            CannedGenerator::replying("{\"summary\": \"S\", \"skills\": [\"a\", \"b\"]}");
        let client = AugmentationClient::new(generator.clone());

        let result = client
            .generate_summary_and_skills(&ResumeData::demo())
            .await
            .unwrap();

        assert_eq!(result.summary, "S");
        assert_eq!(result.skills, vec!["a", "b"]);
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_client_collapses_failures() {
        let malformed = AugmentationClient::new(CannedGenerator::replying("not json"));
        assert_eq!(
            malformed
                .generate_summary_and_skills(&ResumeData::demo())
                .await,
            Err(AugmentationFailed)
        );

        let generator = CannedGenerator::failing();
        let transport = AugmentationClient::new(generator.clone());
        assert_eq!(
            transport
                .generate_summary_and_skills(&ResumeData::demo())
                .await,
            Err(AugmentationFailed)
        );
        assert_eq!(generator.prompts.lock().unwrap().len(), 1, "no retry");
    }
}
