//! Inline resolver for the streamtape hosting backend
//!
//! Streamtape hides the media URL in an inline script that assigns an
//! escaped URL fragment to a placeholder element. Recovering it is an
//! obfuscation reversal, not decryption: strip the escapes, add the
//! scheme, and swap the download endpoint for the embed one.

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};

use super::{HostResolver, LinkSink, SubtitleSink};
use crate::client::AnimekaiClient;
use crate::error::{AnimekaiError, Result};
use crate::types::{Quality, VideoLink};
use crate::url::SITE_NAME;

const HOST_PATTERN: &str = "streamtape";
const SCRIPT_MARKER: &str = "document.getElementById('robotlink')";
const PAYLOAD_PREFIX: &str = "('robotlink').innerHTML = '";

/// Resolver recovering a direct embed URL from a streamtape player page
pub struct Streamtape {
    label: String,
}

impl Streamtape {
    /// Resolver labelling its links with the site provider name
    pub fn new() -> Self {
        Self::with_label(SITE_NAME)
    }

    /// Resolver with a custom display/origin label
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for Streamtape {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for Streamtape {
    fn name(&self) -> &str {
        HOST_PATTERN
    }

    fn suitable(&self, url: &str) -> bool {
        url.contains(HOST_PATTERN)
    }

    async fn resolve(
        &self,
        client: &AnimekaiClient,
        url: &str,
        referer: &str,
        _subtitles: &mut SubtitleSink<'_>,
        links: &mut LinkSink<'_>,
    ) -> Result<bool> {
        let html = client.fetch_url(url).await?;

        // Classification already confirmed the host, so a missing
        // marker means the page markup changed under us.
        let script = find_marker_script(&html).ok_or_else(|| {
            AnimekaiError::ElementNotFound(format!("{:?} script on {}", SCRIPT_MARKER, url))
        })?;
        let payload = extract_payload(&script).ok_or_else(|| {
            AnimekaiError::ElementNotFound(format!("robotlink payload on {}", url))
        })?;

        let video_url = embed_url(&unescape(payload));
        tracing::debug!(video_url, "streamtape link recovered");

        links(VideoLink {
            name: self.label.clone(),
            source: self.label.clone(),
            url: video_url,
            referer: referer.to_string(),
            quality: Quality::Unknown,
            is_embed: false,
        });

        Ok(true)
    }
}

/// Inner HTML of the first inline script containing the marker
fn find_marker_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let script_sel = Selector::parse("script").ok()?;

    document
        .select(&script_sel)
        .map(|el| el.inner_html())
        .find(|script| script.contains(SCRIPT_MARKER))
}

/// Quoted payload assigned to the placeholder element
fn extract_payload(script: &str) -> Option<&str> {
    let (_, rest) = script.split_once(PAYLOAD_PREFIX)?;
    rest.split('\'').next()
}

/// Undoes naive character escaping: `\X` collapses to `X` for any X
///
/// Intentionally character-blind — a backslash before a digit or a
/// letter is stripped the same as one before a slash.
fn unescape(payload: &str) -> String {
    let Ok(re) = Regex::new(r"\\(.)") else {
        return payload.to_string();
    };
    re.replace_all(payload, "$1").into_owned()
}

/// Turns the unescaped scheme-less fragment into a playable embed URL
///
/// The payload points at the host's download endpoint; rewriting
/// `/get_video` to `/e` yields the embed endpoint instead.
fn embed_url(decoded: &str) -> String {
    format!("https:{}", decoded).replace("/get_video", "/e")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::types::SubtitleTrack;
    use proptest::prelude::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_unescape_strips_backslash_pairs() {
        assert_eq!(unescape(r"\/\/host.com\/path"), "//host.com/path");
        // Character-blind: digits and letters after a backslash too
        assert_eq!(unescape(r"a\1b\2"), "a1b2");
        assert_eq!(unescape(r"\a\b\c"), "abc");
    }

    #[test]
    fn test_unescape_leaves_clean_input_alone() {
        assert_eq!(unescape("//host.com/get_video/abc"), "//host.com/get_video/abc");
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn test_embed_url_rewrites_download_endpoint() {
        assert_eq!(
            embed_url("//streamtape.com/get_video/abc"),
            "https://streamtape.com/e/abc"
        );
    }

    #[test]
    fn test_deobfuscation_round_trip() {
        // Full pipeline: obfuscated payload -> playable embed URL
        let payload = r"\/\/host.com\/get_video\/abc";
        assert_eq!(embed_url(&unescape(payload)), "https://host.com/e/abc");
    }

    #[test]
    fn test_extract_payload() {
        let script = "document.getElementById('robotlink').innerHTML = '\\/\\/streamtape.com\\/get_video\\/abc' + ('xyz');";
        assert_eq!(
            extract_payload(script),
            Some(r"\/\/streamtape.com\/get_video\/abc")
        );
    }

    #[test]
    fn test_extract_payload_missing_prefix() {
        assert_eq!(extract_payload("var x = 1;"), None);
    }

    #[test]
    fn test_find_marker_script_picks_matching_script() {
        let html = r#"
        <html><body>
        <script>var unrelated = true;</script>
        <script>document.getElementById('robotlink').innerHTML = 'payload';</script>
        </body></html>
        "#;

        let script = find_marker_script(html).unwrap();
        assert!(script.contains("robotlink"));
    }

    #[test]
    fn test_find_marker_script_none_without_marker() {
        let html = "<html><body><script>var x = 1;</script></body></html>";
        assert!(find_marker_script(html).is_none());
    }

    #[test]
    fn test_suitable_matches_host_substring() {
        let resolver = Streamtape::new();
        assert!(resolver.suitable("https://streamtape.com/e/abc"));
        assert!(!resolver.suitable("https://dokicloud.one/embed/abc"));
    }

    proptest! {
        #[test]
        fn prop_unescape_identity_without_backslashes(s in "[a-zA-Z0-9/:._-]{0,64}") {
            prop_assert_eq!(unescape(&s), s);
        }

        #[test]
        fn prop_unescape_recovers_fully_escaped_input(s in "[a-zA-Z0-9/:._-]{0,64}") {
            let escaped: String = s.chars().flat_map(|c| ['\\', c]).collect();
            prop_assert_eq!(unescape(&escaped), s);
        }
    }

    fn player_page(payload: &str) -> String {
        format!(
            r#"<html><body>
            <div id="robotlink"></div>
            <script>document.getElementById('robotlink').innerHTML = '{}' + ('token');</script>
            </body></html>"#,
            payload
        )
    }

    #[tokio::test]
    async fn test_resolve_emits_single_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/streamtape/e/abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(player_page(r"\/\/streamtape.com\/get_video\/abc")),
            )
            .mount(&server)
            .await;

        let client = AnimekaiClient::with_config(ClientConfig {
            base_url: server.uri(),
            requests_per_second: 1000.0,
            timeout_secs: 5,
            max_retries: 0,
        })
        .unwrap();

        let mut links: Vec<VideoLink> = Vec::new();
        let mut subs: Vec<SubtitleTrack> = Vec::new();
        let resolver = Streamtape::new();
        let ok = resolver
            .resolve(
                &client,
                &format!("{}/streamtape/e/abc", server.uri()),
                "https://animekai.com",
                &mut |s| subs.push(s),
                &mut |l| links.push(l),
            )
            .await
            .unwrap();

        assert!(ok);
        assert!(subs.is_empty());
        assert_eq!(links.len(), 1);

        let link = &links[0];
        assert_eq!(link.url, "https://streamtape.com/e/abc");
        assert_eq!(link.name, "Animekai");
        assert_eq!(link.source, "Animekai");
        assert_eq!(link.referer, "https://animekai.com");
        assert_eq!(link.quality, Quality::Unknown);
        assert!(!link.is_embed);
    }

    #[tokio::test]
    async fn test_resolve_fails_when_marker_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/streamtape/e/gone"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><script>var x = 1;</script></body></html>"),
            )
            .mount(&server)
            .await;

        let client = AnimekaiClient::with_config(ClientConfig {
            base_url: server.uri(),
            requests_per_second: 1000.0,
            timeout_secs: 5,
            max_retries: 0,
        })
        .unwrap();

        let mut links: Vec<VideoLink> = Vec::new();
        let resolver = Streamtape::new();
        let result = resolver
            .resolve(
                &client,
                &format!("{}/streamtape/e/gone", server.uri()),
                "https://animekai.com",
                &mut |_| {},
                &mut |l| links.push(l),
            )
            .await;

        assert!(matches!(result, Err(AnimekaiError::ElementNotFound(_))));
        assert!(links.is_empty());
    }
}
