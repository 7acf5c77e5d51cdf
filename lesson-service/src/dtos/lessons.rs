use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// Raw body of `POST /generate_and_add_lesson`.
///
/// Every field is required; they are optional here so validation can report
/// all missing parameters at once instead of failing on the first.
#[derive(Debug, Deserialize)]
pub struct GenerateLessonRequest {
    pub course_id: Option<String>,
    pub lesson_topic: Option<String>,
    pub ai_prompt_details: Option<String>,
    pub target_directory: Option<String>,
    pub gemini_api_key: Option<String>,
}

/// A fully validated lesson request.
#[derive(Debug)]
pub struct LessonRequest {
    pub course_id: String,
    pub lesson_topic: String,
    pub ai_prompt_details: String,
    pub target_directory: String,
    pub gemini_api_key: String,
}

impl GenerateLessonRequest {
    pub fn validated(self) -> Result<LessonRequest, AppError> {
        fn is_missing(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, str::is_empty)
        }

        let mut missing = Vec::new();
        for (value, name) in [
            (&self.course_id, "course_id"),
            (&self.lesson_topic, "lesson_topic"),
            (&self.ai_prompt_details, "ai_prompt_details"),
            (&self.target_directory, "target_directory"),
            (&self.gemini_api_key, "gemini_api_key"),
        ] {
            if is_missing(value) {
                missing.push(name);
            }
        }

        if !missing.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Missing required parameters: {}",
                missing.join(", ")
            )));
        }

        Ok(LessonRequest {
            course_id: self.course_id.unwrap_or_default(),
            lesson_topic: self.lesson_topic.unwrap_or_default(),
            ai_prompt_details: self.ai_prompt_details.unwrap_or_default(),
            target_directory: self.target_directory.unwrap_or_default(),
            gemini_api_key: self.gemini_api_key.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CourseContentsResponse {
    pub course_id: String,
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LessonCreatedResponse {
    pub message: String,
    pub filename: String,
    pub github_url: Option<String>,
    pub commit_url: Option<String>,
}
