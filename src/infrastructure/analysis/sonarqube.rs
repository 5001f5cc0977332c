//! SonarQube API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::AnalysisProvider;
use crate::domain::issue::{
    Condition, GateStatus, Issue, IssuePage, IssueType, QualityGate, TextRange,
};

const QUALITY_GATE_API: &str = "/api/qualitygates/project_status";
const ISSUE_SEARCH_API: &str = "/api/issues/search";

// encodeURIComponent가 그대로 두는 문자 집합.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub struct SonarQubeClient {
    client: Client,
    host: String,
    project_key: String,
    pull_number: u64,
    branch_plugin: bool,
    token: Option<String>,
    page_size: u64,
}

impl SonarQubeClient {
    /// SonarQube 대상 클라이언트를 생성한다.
    pub fn new(
        host: String,
        project_key: String,
        pull_number: u64,
        branch_plugin: bool,
        token: Option<String>,
        page_size: u64,
    ) -> Self {
        Self {
            client: Client::new(),
            host,
            project_key,
            pull_number,
            branch_plugin,
            token,
            page_size,
        }
    }

    fn endpoint(&self, api: &str, parameters: &[(&str, String)]) -> String {
        // SonarQube는 키 순서에 민감하지 않지만 조립 순서는 호출부 순서를 따른다.
        let query = parameters
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_ENCODE),
                    utf8_percent_encode(value, QUERY_ENCODE)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}{}", self.host, api)
        } else {
            format!("{}{}?{}", self.host, api, query)
        }
    }

    fn request(&self, url: String) -> RequestBuilder {
        let req = self
            .client
            .get(url)
            .header("Accept", "application/json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, what: &str) -> Result<T> {
        let resp = self
            .request(url)
            .send()
            .await
            .with_context(|| format!("sonar: failed to fetch {what}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("sonar: failed to read {what} body"))?;
        if !status.is_success() {
            anyhow::bail!("sonar: failed to fetch {what} ({status}): {body}");
        }

        serde_json::from_str(&body).with_context(|| format!("sonar: invalid {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct IssueSearchResponse {
    #[serde(default)]
    issues: Vec<WireIssue>,
    total: u64,
    p: u64,
    ps: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIssue {
    key: String,
    rule: String,
    project: String,
    component: String,
    message: String,
    severity: String,
    #[serde(rename = "type")]
    issue_type: String,
    line: Option<u32>,
    text_range: Option<WireTextRange>,
    #[serde(default)]
    tags: Vec<String>,
    assignee: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTextRange {
    start_line: u32,
    end_line: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QualityGateResponse {
    project_status: WireProjectStatus,
}

#[derive(Debug, Deserialize)]
struct WireProjectStatus {
    status: String,
    #[serde(default)]
    conditions: Vec<WireCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCondition {
    status: String,
    metric_key: String,
    #[serde(default)]
    actual_value: String,
}

fn into_issue(wire: WireIssue) -> Issue {
    Issue {
        issue_type: IssueType::classify(&wire.issue_type),
        key: wire.key,
        rule: wire.rule,
        project: wire.project,
        component: wire.component,
        message: wire.message,
        severity: wire.severity,
        line: wire.line,
        text_range: wire.text_range.map(|r| TextRange {
            start_line: r.start_line,
            end_line: r.end_line,
        }),
        tags: wire.tags,
        assignee: wire.assignee,
    }
}

#[async_trait]
impl AnalysisProvider for SonarQubeClient {
    async fn fetch_issue_page(&self, page: u64) -> Result<IssuePage> {
        let mut parameters = vec![
            ("componentKeys", self.project_key.clone()),
            ("p", page.to_string()),
            ("ps", self.page_size.to_string()),
            ("inNewCodePeriod", "true".to_string()),
            ("resolved", "false".to_string()),
        ];
        if self.branch_plugin {
            parameters.push(("pullRequest", self.pull_number.to_string()));
        }

        let response: IssueSearchResponse = self
            .get_json(self.endpoint(ISSUE_SEARCH_API, &parameters), "issue page")
            .await?;

        Ok(IssuePage {
            issues: response.issues.into_iter().map(into_issue).collect(),
            total: response.total,
            page: response.p,
            page_size: response.ps,
        })
    }

    async fn fetch_quality_gate(&self) -> Result<QualityGate> {
        let mut parameters = vec![("projectKey", self.project_key.clone())];
        if self.branch_plugin {
            parameters.push(("pullRequest", self.pull_number.to_string()));
        }

        let response: QualityGateResponse = self
            .get_json(
                self.endpoint(QUALITY_GATE_API, &parameters),
                "quality gate",
            )
            .await?;

        Ok(QualityGate {
            status: GateStatus::from_wire(&response.project_status.status),
            conditions: response
                .project_status
                .conditions
                .into_iter()
                .map(|c| Condition {
                    metric_key: c.metric_key,
                    actual_value: c.actual_value,
                    status: c.status,
                })
                .collect(),
        })
    }
}
