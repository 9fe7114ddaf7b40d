// src/utils/html.rs

/// Strips markup that must never reach the quiz-taking view.
///
/// Whitelist-based: formatting tags such as <b> or <p> survive, <script> and
/// event-handler attributes are removed. Applied to every free-text field an
/// admin submits.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
