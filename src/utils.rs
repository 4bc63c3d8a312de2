use std::time::Duration;
use tokio::time::sleep;

/// Desktop Chrome user agent the listing site is known to serve
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/86.0.4240.193 Safari/537.36";

/// Remove exactly one character from each end, e.g. `[1080p]` -> `1080p`.
///
/// Strings shorter than two characters collapse to an empty string.
pub fn strip_outer(value: &str) -> &str {
    let mut chars = value.char_indices();
    let start = match chars.nth(1) {
        Some((idx, _)) => idx,
        None => return "",
    };
    let end = match value.char_indices().next_back() {
        Some((idx, _)) => idx,
        None => return "",
    };

    if start > end {
        ""
    } else {
        &value[start..end]
    }
}

/// Build a detail page URL by plain concatenation of base and scraped href
pub fn detail_url(base: &str, href: &str) -> String {
    format!("{}{}", base, href)
}

/// Fixed pause that lets browser-rendered content settle after a click
#[derive(Debug, Clone, Copy)]
pub struct SettleDelay {
    delay: Duration,
}

impl SettleDelay {
    pub fn from_millis(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn duration(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

impl Default for SettleDelay {
    fn default() -> Self {
        Self::from_millis(1500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_outer_brackets() {
        assert_eq!(strip_outer("[1080p]"), "1080p");
        assert_eq!(strip_outer("(720p)"), "720p");
        assert_eq!(strip_outer("[[SD]]"), "[SD]");
    }

    #[test]
    fn test_strip_outer_short_values() {
        assert_eq!(strip_outer(""), "");
        assert_eq!(strip_outer("x"), "");
        assert_eq!(strip_outer("[]"), "");
    }

    #[test]
    fn test_strip_outer_multibyte() {
        assert_eq!(strip_outer("【1080p】"), "1080p");
    }

    #[test]
    fn test_detail_url_concatenates() {
        assert_eq!(
            detail_url("https://www.erai-raws.info/anime-list/", "?show=frieren"),
            "https://www.erai-raws.info/anime-list/?show=frieren"
        );
    }

    #[test]
    fn test_settle_delay_creation() {
        let delay = SettleDelay::from_millis(250);
        assert_eq!(delay.duration(), Duration::from_millis(250));

        let default_delay = SettleDelay::default();
        assert_eq!(default_delay.duration(), Duration::from_millis(1500));
    }
}
