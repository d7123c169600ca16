/// Wrap a bare image URL for use as `background-image`.
///
/// Values that already use a CSS function (`url(...)`, gradients) are kept
/// verbatim. Double quotes inside the URL are percent-encoded.
pub fn background_image_value(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() || raw.contains('(') || raw == "none" {
        return raw.to_string();
    }

    format!("url(\"{}\")", raw.replace('"', "%22"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_is_wrapped() {
        assert_eq!(
            background_image_value("https://cdn.example.com/bg.png"),
            "url(\"https://cdn.example.com/bg.png\")"
        );
    }

    #[test]
    fn test_css_functions_are_kept() {
        assert_eq!(background_image_value("url(a.png)"), "url(a.png)");
        assert_eq!(
            background_image_value("linear-gradient(red, blue)"),
            "linear-gradient(red, blue)"
        );
        assert_eq!(background_image_value("none"), "none");
    }

    #[test]
    fn test_quotes_are_encoded() {
        assert_eq!(background_image_value("a\"b.png"), "url(\"a%22b.png\")");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(background_image_value("  "), "");
    }
}
