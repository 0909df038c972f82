use ammonia;

/// Clean user-submitted question text using the ammonia library.
///
/// Submitted question text and option labels are rendered back to other
/// sessions, so this is the fail-safe against stored XSS: a whitelist
/// sanitizer that keeps harmless tags while stripping <script>,
/// <iframe>, event-handler attributes and the like. A submission that
/// is nothing but markup sanitizes down to an empty string and fails
/// the non-empty check in the submit handler.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
