use crate::dtos::{CourseContentsResponse, GenerateLessonRequest, LessonCreatedResponse};
use crate::services::lessons;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// List the HTML lesson files in a course's contents folder.
pub async fn list_course_contents(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let directory = format!("courses/{}/contents", course_id);

    let entries = state.github.list_directory(&directory).await?;
    let files = lessons::html_file_names(&entries);

    Ok(Json(CourseContentsResponse { course_id, files }))
}

/// Generate a lesson page with the AI provider and commit it to GitHub.
///
/// The steps run in sequence: list the target directory to number the new
/// lesson, generate the fragment, wrap it into the page shell, commit. A
/// failed commit discards the generated content; the caller resubmits.
pub async fn generate_and_add_lesson(
    State(state): State<AppState>,
    Json(request): Json<GenerateLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = request.validated()?;

    let entries = state
        .github
        .list_directory(&lesson.target_directory)
        .await?;
    let existing = lessons::html_file_names(&entries);

    let index = lessons::next_lesson_index(&existing);
    let filename = lessons::lesson_filename(index, &lesson.lesson_topic);
    let file_path = format!("{}/{}", lesson.target_directory, filename);

    tracing::info!(
        course_id = %lesson.course_id,
        filename = %filename,
        existing = existing.len(),
        "Generating lesson content"
    );

    let prompt = lessons::build_prompt(&lesson.lesson_topic, &lesson.ai_prompt_details);
    let fragment = state
        .text_provider
        .generate(&prompt, &lesson.gemini_api_key)
        .await?;

    // Path the front-end navigation script uses to resolve neighboring
    // lessons through the GitHub API.
    let github_api_path = format!(
        "{}/{}/contents/{}?ref={}",
        state.config.github.owner,
        state.config.github.repo,
        lesson.target_directory,
        state.config.github.branch
    );

    let page = lessons::wrap_lesson_page(
        &fragment,
        &lesson.lesson_topic,
        &lesson.course_id,
        &filename,
        &github_api_path,
    );

    let commit_message = format!("Add new lesson: {} (Generated by AI)", filename);
    let committed = state
        .github
        .upsert_file(&file_path, &page, &commit_message)
        .await?;

    tracing::info!(
        course_id = %lesson.course_id,
        filename = %filename,
        "Lesson generated and committed"
    );

    Ok(Json(LessonCreatedResponse {
        message: "Lesson generated and added to GitHub successfully!".to_string(),
        filename,
        github_url: committed.content.and_then(|c| c.html_url),
        commit_url: committed.commit.and_then(|c| c.html_url),
    }))
}
