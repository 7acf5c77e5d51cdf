//! Lesson assembly: filename numbering, slug formatting, prompt building,
//! and wrapping generated fragments into a full page.

use crate::services::github::RepoEntry;

/// Extract the `.html` filenames from a directory listing, sorted
/// alphabetically.
pub fn html_file_names(entries: &[RepoEntry]) -> Vec<String> {
    let mut files: Vec<String> = entries
        .iter()
        .filter(|e| e.entry_type == "file" && e.name.ends_with(".html"))
        .map(|e| e.name.clone())
        .collect();
    files.sort();
    files
}

/// Compute the next lesson index from an alphabetically sorted listing.
///
/// Takes the last filename and parses its leading digit run; when nothing
/// parses, falls back to file count + 1. Alphabetical order is not numeric
/// order for mixed-width prefixes ("10" sorts before "2"), so the result
/// tracks whichever file sorts last.
pub fn next_lesson_index(sorted_html_files: &[String]) -> u32 {
    let Some(last) = sorted_html_files.last() else {
        return 1;
    };

    let digits: String = last.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(prefix) => prefix + 1,
        Err(_) => sorted_html_files.len() as u32 + 1,
    }
}

/// Make a topic safe for use in a filename.
pub fn slugify_topic(topic: &str) -> String {
    topic.replace(' ', "-").replace('/', "-").replace('\\', "-")
}

/// Compose the lesson filename from its index and topic.
pub fn lesson_filename(index: u32, topic: &str) -> String {
    format!("{:02} - {}.html", index, slugify_topic(topic))
}

/// Build the generation prompt for a lesson fragment.
///
/// The model is asked for the inner content of the page only; the
/// surrounding boilerplate comes from [`wrap_lesson_page`].
pub fn build_prompt(lesson_topic: &str, details: &str) -> String {
    format!(
        r#"Generate the main content for an HTML lesson page on the topic: "{lesson_topic}".
The content should be well-structured with appropriate HTML tags (h1, h2, h3, p, ul, ol, pre, code, strong, table, thead, tbody, tr, th, td).
Include relevant code examples and expected output blocks.
The overall tone should be educational and engaging for a beginner to intermediate audience.
Focus on explaining concepts clearly and concisely.
Do NOT include the full HTML boilerplate (head, body, html tags, doctype, script, link, meta, title, header, footer, main, navigation buttons).
Only provide the content that would go inside the `<main class="lesson-content-container">` tag, starting with an `<h1>` for the lesson title.
For code examples, use `<pre><code class="language-python">...</code></pre>`.
For expected output, use `<div class="output-block"><strong>Expected Output:</strong><pre><code>...</code></pre></div>`.
Here are some additional details for the content: {details}
"#
    )
}

/// Wrap a generated fragment into the full lesson page.
///
/// The navigation script is parameterized with the course id, the new
/// filename, and the GitHub API path the front-end uses to resolve
/// neighboring lessons.
pub fn wrap_lesson_page(
    lesson_content_html: &str,
    lesson_title: &str,
    course_id: &str,
    lesson_filename: &str,
    github_api_path: &str,
) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{lesson_title}</title>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700;800&display=swap" rel="stylesheet">
    <link rel="stylesheet" href="../../../styles/landingpage/base.css">
    <link rel="stylesheet" href="../../../styles/landingpage/header.css">
    <link rel="stylesheet" href="../../../styles/landingpage/footer.css">
    <link rel="stylesheet" href="../../../styles/course-page.css">
    <link rel="stylesheet" href="../../../styles/lesson/lesson-content.css">
    <link rel="stylesheet" href="../../../styles/lesson/code.css">
    <link rel="stylesheet" href="../../../styles/lesson/output.css">
</head>
<body>
    <header>
        <nav>
            <ul>
                <li><a href="../../../index.html">Courses</a></li>
                <li><a href="../../about.html">About Us</a></li>
                <li><a href="../../contact.html">Contact</a></li>
            </ul>
        </nav>
    </header>

    <main class="lesson-content-container">
        <a href="../index.html" class="btn-secondary back-to-course-btn">&#8592; Back to Course Content</a>

        {lesson_content_html}

        <div class="navigation-buttons">
            <a id="prev-lesson-button" href="#" class="btn-secondary" style="display:none;">&#8592; Previous Lesson</a>
            <a id="next-lesson-button" href="#" class="btn-secondary" style="display:none;">Next Lesson &#8594;</a>
        </div>
    </main>

    <footer>
        <p>&copy; 2025 All rights reserved.</p>
    </footer>

    <script src="../../../scripts/course-listing.js"></script>
    <script>
        document.addEventListener('DOMContentLoaded', () => {{
            setupLessonNavigation(
                '{course_id}',
                '{lesson_filename}',
                'prev-lesson-button',
                'next-lesson-button',
                '{github_api_path}'
            );
        }});
    </script>
</body>
</html>
"##
    )
}
