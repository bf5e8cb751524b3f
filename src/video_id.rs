use once_cell::sync::Lazy;
use regex::Regex;

/// Maps a raw filename, link, or id cell to the canonical video identifier.
///
/// An empty string means the input could not be resolved.
pub trait VideoIdResolver {
    fn resolve(&self, raw: &str) -> String;
}

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_.\-]+)/video/(\d+)").expect("valid link regex"));

static MEDIA_EXTENSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(mp4|mov|m4v|webm|mkv|avi|txt|json|csv|jpe?g|png)$")
        .expect("valid extension regex")
});

static USER_VIDEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)_video_(\d+)$").expect("valid user/video regex"));

/// Resolver for TikTok exports, keeping the `user_videoid` compound form.
///
/// * `https://www.tiktok.com/@alexkay/video/678?lang=en` -> `alexkay_678`
/// * `@alexkay_video_678.mp4` -> `alexkay_678`
/// * `username_videoid.txt` -> `username_videoid`
#[derive(Debug, Clone, Copy, Default)]
pub struct TikTokVideoIds;

impl TikTokVideoIds {
    pub fn new() -> Self {
        Self
    }
}

impl VideoIdResolver for TikTokVideoIds {
    fn resolve(&self, raw: &str) -> String {
        normalize_video_id(raw)
    }
}

impl<F> VideoIdResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Canonical identifier for a TikTok filename or link, or an empty string
pub fn normalize_video_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(caps) = LINK_RE.captures(raw) {
        return format!("{}_{}", &caps[1], &caps[2]);
    }

    // Query strings and fragments never carry the id
    let without_query = raw.split(['?', '#']).next().unwrap_or(raw);
    let segment = without_query
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(without_query);

    let stem = MEDIA_EXTENSION_RE.replace(segment, "");
    let stem = stem.trim().trim_start_matches('@');

    if let Some(caps) = USER_VIDEO_RE.captures(stem) {
        return format!("{}_{}", &caps[1], &caps[2]);
    }

    stem.to_string()
}
