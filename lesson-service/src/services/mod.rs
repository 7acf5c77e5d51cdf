pub mod github;
pub mod lessons;
pub mod providers;

pub use github::GithubClient;
