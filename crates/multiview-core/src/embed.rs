//! Embed provider registry — site codes mapped to iframe builders.
//!
//! The registry is an immutable value built once at startup and injected into
//! whatever needs to format embeds.  It performs no network I/O; every
//! operation is string formatting against the providers' fixed embed URL
//! schemes, which are an external contract and reproduced literally.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("unsupported provider: {0}")]
    UnsupportedSite(String),
    #[error("invalid provider pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which embed URL scheme a provider uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Twitch,
    Ustream,
    Youtube,
    Hitbox,
    /// Dead or merged providers whose entries still resolve through the
    /// Twitch player.
    TwitchFallback,
}

/// One provider entry: recognition pattern plus embed builders.
#[derive(Debug)]
pub struct Provider {
    code: &'static str,
    name: &'static str,
    /// Strips scheme/`www.`/host prefixes off a public stream URL, leaving
    /// the channel identifier.
    pattern: Regex,
    /// Substrings that identify this provider's URLs.
    hosts: &'static [&'static str],
    /// Height in pixels of player chrome the provider adds at the bottom.
    chrome_bar_px: u16,
    scheme: Scheme,
}

impl Provider {
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn display_name(&self) -> &'static str {
        self.name
    }

    pub fn chrome_bar_px(&self) -> u16 {
        self.chrome_bar_px
    }

    /// True if `url` looks like one of this provider's public stream URLs.
    pub fn matches_url(&self, url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        self.hosts.iter().any(|h| lower.contains(h))
    }

    /// Strip the recognized prefix parts, leaving the channel identifier.
    pub fn channel_from_url(&self, url: &str) -> String {
        let stripped = self.pattern.replace_all(url, "");
        stripped
            .split(['/', '?', '#'])
            .next()
            .unwrap_or("")
            .to_string()
    }

    /// The provider's live-stream embed URL for `channel`.
    pub fn stream_url(&self, channel: &str) -> String {
        match self.scheme {
            Scheme::Twitch | Scheme::TwitchFallback => {
                format!("//player.twitch.tv/?channel={channel}")
            }
            Scheme::Ustream => {
                format!("//www.ustream.tv/embed/{channel}?html5ui&wmode=direct&autoplay=true")
            }
            Scheme::Youtube => format!(
                "//www.youtube.com/embed/{channel}?autoplay=1&hl=en_US&color=white&enablejsapi=1&showinfo=1&autohide=2&html5=1&start=0"
            ),
            Scheme::Hitbox => {
                format!("//www.hitbox.tv/embed/{channel}?popout=true&autoplay=true")
            }
        }
    }

    /// The provider's recorded-video embed URL for `video`.
    pub fn vod_url(&self, video: &str) -> String {
        match self.scheme {
            Scheme::Ustream => {
                format!("//www.ustream.tv/embed/recorded/{video}?v=3&autoplay=true")
            }
            _ => format!("//player.twitch.tv/?autoplay=true&video={video}"),
        }
    }

    /// Full iframe markup for a live stream.
    pub fn stream_html(&self, channel: &str) -> String {
        iframe(&self.stream_url(channel))
    }

    /// Full iframe markup for a recorded video.
    pub fn vod_html(&self, video: &str) -> String {
        iframe(&self.vod_url(video))
    }
}

fn iframe(url: &str) -> String {
    format!(
        "<iframe class='stream' src='{url}' frameborder=0 scrolling='no' allowfullscreen></iframe>"
    )
}

/// The provider table.  Built once, never mutated.
#[derive(Debug)]
pub struct EmbedRegistry {
    providers: Vec<Provider>,
}

impl EmbedRegistry {
    pub fn new() -> Result<Self, EmbedError> {
        let providers = vec![
            Provider {
                code: "ttv",
                name: "Twitch",
                pattern: Regex::new(r"(?i)(https?://)|(www\.)|(twitch\.tv/)")?,
                hosts: &["twitch.tv/"],
                chrome_bar_px: 0,
                scheme: Scheme::Twitch,
            },
            Provider {
                code: "ust",
                name: "Ustream",
                pattern: Regex::new(r"(?i)(https?://)|(www\.)|(ustream\.tv/(channel/)?)")?,
                hosts: &["ustream.tv/"],
                chrome_bar_px: 0,
                scheme: Scheme::Ustream,
            },
            Provider {
                code: "lst",
                name: "Livestream",
                pattern: Regex::new(r"(?i)(https?://)|(www\.)|(livestream\.com/)")?,
                hosts: &["livestream.com/"],
                chrome_bar_px: 29,
                scheme: Scheme::TwitchFallback,
            },
            Provider {
                code: "yut",
                name: "YouTube",
                pattern: Regex::new(
                    r"(?i)(https?://)|(www\.)|((gaming\.)?youtube\.com/(watch\?v=)?(v/)?)|(youtu\.be/)",
                )?,
                hosts: &["youtube.com/", "youtu.be/"],
                chrome_bar_px: 0,
                scheme: Scheme::Youtube,
            },
            Provider {
                code: "nnd",
                name: "NicoNico",
                pattern: Regex::new(r"(?i)(https?://)|(www\.)|((live\.)?nicovideo\.jp/watch/)")?,
                hosts: &["nicovideo.jp/watch/"],
                chrome_bar_px: 0,
                scheme: Scheme::TwitchFallback,
            },
            Provider {
                code: "htv",
                name: "Hitbox",
                pattern: Regex::new(r"(?i)(https?://)|(www\.)|(hitbox\.tv/)")?,
                hosts: &["hitbox.tv/"],
                chrome_bar_px: 0,
                scheme: Scheme::Hitbox,
            },
        ];
        Ok(Self { providers })
    }

    /// Look up a provider by site code.
    pub fn get(&self, code: &str) -> Result<&Provider, EmbedError> {
        self.providers
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| EmbedError::UnsupportedSite(code.to_string()))
    }

    /// Convenience: live-stream iframe markup for `code`/`channel`.
    pub fn stream_html(&self, code: &str, channel: &str) -> Result<String, EmbedError> {
        Ok(self.get(code)?.stream_html(channel))
    }

    /// Convenience: recorded-video iframe markup for `code`/`video`.
    pub fn vod_html(&self, code: &str, video: &str) -> Result<String, EmbedError> {
        Ok(self.get(code)?.vod_html(video))
    }

    /// Resolve a public stream URL to `(site code, channel)`.
    pub fn resolve_url(&self, url: &str) -> Option<(&'static str, String)> {
        let provider = self.providers.iter().find(|p| p.matches_url(url))?;
        let channel = provider.channel_from_url(url);
        if channel.is_empty() {
            return None;
        }
        Some((provider.code, channel))
    }

    /// All registered site codes, in table order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.code).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EmbedRegistry {
        EmbedRegistry::new().unwrap()
    }

    #[test]
    fn twitch_stream_markup_is_pinned() {
        let html = registry().stream_html("ttv", "foo").unwrap();
        assert!(html.starts_with("<iframe class='stream'"));
        assert!(html.contains("//player.twitch.tv/?channel=foo"));
        assert!(html.contains("allowfullscreen"));
    }

    #[test]
    fn provider_query_parameters_are_pinned() {
        let reg = registry();
        assert_eq!(
            reg.get("ust").unwrap().stream_url("nasahdtv"),
            "//www.ustream.tv/embed/nasahdtv?html5ui&wmode=direct&autoplay=true"
        );
        assert_eq!(
            reg.get("htv").unwrap().stream_url("ebichu"),
            "//www.hitbox.tv/embed/ebichu?popout=true&autoplay=true"
        );
        let yt = reg.get("yut").unwrap().stream_url("dQw4w9WgXcQ");
        assert!(yt.starts_with("//www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"));
        assert!(yt.ends_with("start=0"));
        // dead providers resolve through the twitch player
        assert_eq!(
            reg.get("lst").unwrap().stream_url("x"),
            "//player.twitch.tv/?channel=x"
        );
        assert_eq!(
            reg.get("nnd").unwrap().stream_url("x"),
            "//player.twitch.tv/?channel=x"
        );
    }

    #[test]
    fn vod_markup_is_pinned() {
        let reg = registry();
        assert!(reg
            .vod_html("ttv", "123")
            .unwrap()
            .contains("//player.twitch.tv/?autoplay=true&video=123"));
        assert!(reg
            .vod_html("ust", "456")
            .unwrap()
            .contains("//www.ustream.tv/embed/recorded/456?v=3&autoplay=true"));
    }

    #[test]
    fn unknown_site_code_is_an_error() {
        let err = registry().stream_html("mixer", "x").unwrap_err();
        assert!(matches!(err, EmbedError::UnsupportedSite(ref code) if code == "mixer"));
        assert_eq!(err.to_string(), "unsupported provider: mixer");
    }

    #[test]
    fn resolves_public_urls_to_site_and_channel() {
        let reg = registry();
        assert_eq!(
            reg.resolve_url("https://www.twitch.tv/foo"),
            Some(("ttv", "foo".to_string()))
        );
        assert_eq!(
            reg.resolve_url("http://youtu.be/dQw4w9WgXcQ"),
            Some(("yut", "dQw4w9WgXcQ".to_string()))
        );
        assert_eq!(
            reg.resolve_url("www.ustream.tv/channel/nasahdtv"),
            Some(("ust", "nasahdtv".to_string()))
        );
        assert_eq!(reg.resolve_url("https://example.com/whatever"), None);
    }

    #[test]
    fn all_site_codes_registered() {
        assert_eq!(registry().codes(), vec!["ttv", "ust", "lst", "yut", "nnd", "htv"]);
    }
}
