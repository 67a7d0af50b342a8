//! SEO page title assessment tool.
//!
//! Fetches a page, pulls out the first `<title>` element and runs a few
//! length heuristics against it.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::core::config::ToolsConfig;
use crate::domains::tools::{
    ToolError, ToolHandler,
    schema::{ParamSpec, ToolDescriptor, ValidatedParams},
};

/// Title reported when the page has no `<title>` element.
pub const NO_TITLE: &str = "No title found";

/// Titles must be strictly longer than this many characters.
pub const MIN_TITLE_LENGTH: usize = 10;
/// Titles must be strictly shorter than this many characters.
pub const MAX_TITLE_LENGTH: usize = 60;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title>(.*?)</title>").expect("valid regex"));

// ============================================================================
// Structured Output
// ============================================================================

/// Outcome of a single heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub description: String,
    pub is_valid: bool,
}

/// All heuristics for a title, in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleAssessment {
    /// True only when every check passed.
    pub is_valid: bool,
    pub details: Vec<CheckResult>,
}

/// Result of the SEO title tool.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageTitleReport {
    pub url: String,
    pub title: String,
    pub overall_assessment: TitleAssessment,
}

/// Extract the first `<title>` element, or [`NO_TITLE`].
pub fn extract_title(html: &str) -> String {
    TITLE_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Run the title heuristics.
///
/// Lengths are counted in characters. The [`NO_TITLE`] fallback is
/// assessed like any other title.
pub fn assess_title(title: &str) -> TitleAssessment {
    let length = title.chars().count();

    let details = vec![
        CheckResult {
            description: "Title is not empty".to_string(),
            is_valid: !title.is_empty(),
        },
        CheckResult {
            description: format!("Title is longer than {} characters", MIN_TITLE_LENGTH),
            is_valid: length > MIN_TITLE_LENGTH,
        },
        CheckResult {
            description: format!("Title is shorter than {} characters", MAX_TITLE_LENGTH),
            is_valid: length < MAX_TITLE_LENGTH,
        },
    ];

    TitleAssessment {
        is_valid: details.iter().all(|c| c.is_valid),
        details,
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// SEO page title assessment tool.
pub struct PageTitleSeoTool {
    client: reqwest::Client,
}

impl PageTitleSeoTool {
    /// Tool name as registered.
    pub const NAME: &'static str = "assess-page-title-for-seo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch a web page and assess its <title> for SEO: the title must be non-empty, longer than 10 and shorter than 60 characters.";

    /// Create the tool with an HTTP client honoring the configured timeout.
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ToolError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION)
            .param(ParamSpec::string("url", "URL of the page to assess").required())
    }

    /// Fetch `url` and assess its title.
    #[instrument(skip(self))]
    pub async fn assess(&self, url: &str) -> Result<PageTitleReport, ToolError> {
        let body = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| error!("Fetch failed: {}", e))?
            .text()
            .await
            .inspect_err(|e| error!("Reading body failed: {}", e))?;

        let title = extract_title(&body);
        let overall_assessment = assess_title(&title);
        info!(
            "Assessed title {:?}: valid = {}",
            title, overall_assessment.is_valid
        );

        Ok(PageTitleReport {
            url: url.to_string(),
            title,
            overall_assessment,
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for PageTitleSeoTool {
    fn output_schema(&self) -> Option<Arc<JsonObject>> {
        Some(cached_schema_for_type::<PageTitleReport>())
    }

    async fn execute(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError> {
        let url = params.require_str("url")?;
        let report = self.assess(url).await?;
        serde_json::to_value(report).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool() -> PageTitleSeoTool {
        PageTitleSeoTool::new(&ToolsConfig {
            fetch_timeout_secs: 2,
            ..ToolsConfig::default()
        })
        .unwrap()
    }

    async fn serve_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_extract_first_title_case_insensitive() {
        let html = "<html><HEAD><TITLE>First</TITLE><title>Second</title></HEAD></html>";
        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("<html><body>No head</body></html>"), NO_TITLE);
    }

    #[test]
    fn test_assess_short_and_long_titles() {
        let short = assess_title("Home");
        assert!(!short.is_valid);
        assert!(short.details[0].is_valid);
        assert!(!short.details[1].is_valid);
        assert!(short.details[2].is_valid);

        let long = assess_title(&"x".repeat(60));
        assert!(!long.is_valid);
        assert!(!long.details[2].is_valid);

        let empty = assess_title("");
        assert!(!empty.details[0].is_valid);
        assert!(!empty.is_valid);
    }

    #[test]
    fn test_assess_counts_characters_not_bytes() {
        // 11 characters, 22 bytes
        let title = "ééééééééééé";
        assert!(assess_title(title).details[1].is_valid);
        assert!(!assess_title(&"é".repeat(10)).details[1].is_valid);
    }

    #[test]
    fn test_no_title_fallback_passes_length_checks() {
        // The fallback text is 14 characters, so it satisfies both bounds.
        let assessment = assess_title(NO_TITLE);
        assert!(assessment.is_valid);
        assert!(assessment.details.iter().all(|c| c.is_valid));
    }

    #[tokio::test]
    async fn test_assess_page_with_title() {
        let server = MockServer::start().await;
        serve_page(
            &server,
            "/good",
            "<html><head><title>Great Example Page</title></head><body></body></html>",
        )
        .await;

        let url = format!("{}/good", server.uri());
        let result = tool()
            .execute(PageTitleSeoTool::descriptor().validate(json!({ "url": url })).unwrap())
            .await
            .unwrap();

        assert_eq!(result["url"], json!(url));
        assert_eq!(result["title"], "Great Example Page");
        assert_eq!(result["overallAssessment"]["isValid"], true);
        let details = result["overallAssessment"]["details"].as_array().unwrap();
        assert_eq!(details.len(), 3);
        assert!(details.iter().all(|d| d["isValid"] == true));
        assert_eq!(details[0]["description"], "Title is not empty");
    }

    #[tokio::test]
    async fn test_assess_page_without_title() {
        let server = MockServer::start().await;
        serve_page(&server, "/bare", "<html><body>Nothing here</body></html>").await;

        let report = tool()
            .assess(&format!("{}/bare", server.uri()))
            .await
            .unwrap();

        assert_eq!(report.title, NO_TITLE);
        assert!(report.overall_assessment.is_valid);
    }

    #[tokio::test]
    async fn test_non_success_status_still_inspected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("<title>Page Not Found Here</title>"),
            )
            .mount(&server)
            .await;

        let report = tool().assess(&server.uri()).await.unwrap();
        assert_eq!(report.title, "Page Not Found Here");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_execution_error() {
        let err = tool().assess("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<title>Too slow to matter</title>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let tool = PageTitleSeoTool::new(&ToolsConfig {
            fetch_timeout_secs: 1,
            ..ToolsConfig::default()
        })
        .unwrap();
        let err = tool.assess(&server.uri()).await.unwrap_err();
        assert!(matches!(err, ToolError::Timeout));
    }
}
