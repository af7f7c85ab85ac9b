// src/utils/html.rs

/// Strips dangerous markup from author-supplied quiz text.
///
/// Whitelist based: harmless formatting tags survive, `<script>` and
/// event-handler attributes do not. Quiz titles, subjects, descriptions,
/// question prompts and options are rendered by clients, so they go through
/// this before storage.
/// Correct answers are not cleaned since they are compared, never rendered.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

pub fn clean_optional(input: Option<&str>) -> Option<String> {
    input.map(clean_html)
}
