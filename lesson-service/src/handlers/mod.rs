pub mod health;
pub mod lessons;

pub use health::{health_check, index};
pub use lessons::{generate_and_add_lesson, list_course_contents};
