pub mod lessons;

pub use lessons::{
    CourseContentsResponse, GenerateLessonRequest, LessonCreatedResponse, LessonRequest,
};
