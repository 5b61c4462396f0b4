use super::response::{LibGuidesDocument, LibGuidesResponse};
use super::ParamBag;
use crate::config::DEFAULT_LIBGUIDES_HOST;
use crate::utils::error::{CatalogError, Result};
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<li[^>]*>(.*?)</li>"#).expect("valid regex"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid regex")
});
static GUIDE_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="s-lg-guide-desc">(.*?)</div>"#).expect("valid regex")
});
static GTITLE_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="s-lg-gtitle-desc">(.*?)</div>"#).expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// HTTP access to the LibGuides search API.
pub struct Connector {
    iid: Option<u64>,
    client: Client,
    version: u8,
    host: String,
}

impl Connector {
    pub fn new(iid: Option<u64>, client: Client, version: u8) -> Self {
        Self {
            iid,
            client,
            version,
            host: DEFAULT_LIBGUIDES_HOST.to_string(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn iid(&self) -> Option<u64> {
        self.iid
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Run a search and return the `[offset, offset + limit)` window of guides.
    ///
    /// `record_count` is the number of guides LibGuides returned before slicing.
    pub async fn query(
        &self,
        args: &ParamBag,
        offset: usize,
        limit: usize,
    ) -> Result<LibGuidesResponse> {
        let mut params = ParamBag::new();
        if let Some(iid) = self.iid {
            params.set("iid", iid.to_string());
        }
        params.set("type", "guides");
        params.set("more", "false");
        params.set("sortby", "relevance");
        params.set("version", self.version.to_string());
        params.overlay(args);

        let body = self.call(&params).await?;
        let documents = self.process(&body);
        let record_count = documents.len();
        tracing::debug!(
            "LibGuides returned {} guides, keeping {} from offset {}",
            record_count,
            limit,
            offset
        );

        Ok(LibGuidesResponse {
            record_count,
            documents: documents.into_iter().skip(offset).take(limit).collect(),
        })
    }

    async fn call(&self, params: &ParamBag) -> Result<String> {
        tracing::debug!("📡 GET {} {:?}", self.host, params.get("search"));
        let response = self
            .client
            .get(&self.host)
            .query(&params.request_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("❌ LibGuides request failed: HTTP {}", status.as_u16());
            return Err(CatalogError::ApiStatusError {
                status: status.as_u16(),
                url: self.host.clone(),
                body,
            });
        }
        Ok(body)
    }

    /// 從 HTML 輸出擷取標題、網址與描述
    fn process(&self, body: &str) -> Vec<LibGuidesDocument> {
        let desc_re: &Regex = if self.version >= 2 {
            &GUIDE_DESC_RE
        } else {
            &GTITLE_DESC_RE
        };

        let mut documents = Vec::new();
        for item in ITEM_RE.captures_iter(body) {
            let content = &item[1];
            let Some(link) = LINK_RE.captures(content) else {
                continue;
            };
            let Some(link_match) = link.get(0) else {
                continue;
            };

            let description = match desc_re.captures(content) {
                Some(desc) => desc[1].to_string(),
                // v1 輸出有時只在連結後面放純文字描述
                None if self.version < 2 => content[link_match.end()..].to_string(),
                None => String::new(),
            };

            documents.push(LibGuidesDocument {
                id: html_escape::decode_html_entities(link[1].trim()).into_owned(),
                title: clean_text(&link[2]),
                description: clean_text(&description),
            });
        }

        documents
    }
}

fn clean_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    html_escape::decode_html_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
