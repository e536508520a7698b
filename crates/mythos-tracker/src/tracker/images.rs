use regex::Regex;
use std::sync::OnceLock;

/// Fallback badge shown when an image URL cannot be made embeddable.
pub const BADGE_PLACEHOLDER: &str = "https://placehold.co/150x150?text=Badge";

/// Default asset used in notifications when no tier badge survives
/// validation.
pub const POINTS_PLACEHOLDER: &str = "https://placehold.co/100x100?text=Points";

fn file_path_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("valid pattern"))
}

fn query_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid pattern"))
}

fn legacy_path_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("valid pattern"))
}

fn drive_file_id(url: &str) -> Option<&str> {
    if url.contains("/file/d/") {
        return file_path_id()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
    }
    if url.contains("?id=") || url.contains("&id=") {
        return query_id()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
    }
    // Legacy share formats still carry a /d/<id> path segment.
    if url.contains("drive.google.com") {
        return legacy_path_id()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
    }
    None
}

fn has_image_extension(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".gif", ".webp"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Rewrites Drive-style share links to the direct-view form. Direct image
/// URLs and already-converted links pass through unchanged; anything
/// unrecognizable degrades to [`BADGE_PLACEHOLDER`]. Never fails.
pub fn normalize_image_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return BADGE_PLACEHOLDER.to_string();
    }

    if let Some(file_id) = drive_file_id(url) {
        return format!("https://drive.google.com/uc?export=view&id={file_id}");
    }

    if url.contains("drive.google.com/uc") || has_image_extension(url) {
        return url.to_string();
    }

    BADGE_PLACEHOLDER.to_string()
}

/// Loose sanity check applied to normalized URLs before they are used in an
/// outgoing notification: http(s) scheme and either a recognized Drive form,
/// an image extension, or a known placeholder host.
pub fn validate_image_url(url: &str) -> bool {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return false;
    }

    if url.contains("drive.google.com") {
        return url.contains("uc?export=view&id=")
            || url.contains("/file/d/")
            || url.contains("/open?id=");
    }

    has_image_extension(url) || url.contains("placehold.co") || url.contains("placeholder")
}
