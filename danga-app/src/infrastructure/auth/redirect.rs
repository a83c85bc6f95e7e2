//! Post-sign-in redirect handling.

const FALLBACK_PATH: &str = "/";

/// Accepts only same-origin absolute paths. Anything else, including
/// protocol-relative `//host` and `/\host`, falls back to `/`.
pub fn safe_next_path(candidate: Option<&str>) -> String {
    match candidate {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") => {
            path.to_string()
        }
        _ => FALLBACK_PATH.to_string(),
    }
}

/// Appends `authMessage=<message>` to `next`, keeping any existing query
/// and fragment.
pub fn with_auth_message(next: &str, message: &str) -> String {
    let (path, fragment) = match next.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (next, None),
    };
    let separator = if path.contains('?') { '&' } else { '?' };

    let mut url = format!(
        "{}{}authMessage={}",
        path,
        separator,
        urlencoding::encode(message)
    );
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// True when the callback echoed the state stored at login.
pub fn state_matches(expected: Option<&str>, received: Option<&str>) -> bool {
    matches!((expected, received), (Some(expected), Some(received)) if !expected.is_empty() && expected == received)
}
