//! GitHub API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::ReviewProvider;
use crate::domain::review::{DesiredComment, ExistingComment, Review};

/// 목록 API 페이지 크기(GitHub 최대값).
const LIST_PAGE_SIZE: usize = 100;

fn paged_url(base: &str, page: u64) -> String {
    format!("{base}?per_page={LIST_PAGE_SIZE}&page={page}")
}

pub struct GitHubClient {
    client: Client,
    host: String,
    owner: String,
    repo: String,
    number: u64,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    /// GitHub 대상 클라이언트를 생성한다.
    pub fn new(
        host: String,
        owner: String,
        repo: String,
        number: u64,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            host,
            owner,
            repo,
            number,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }

    fn pulls_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base(),
            self.owner,
            self.repo,
            self.number
        )
    }

    fn reviews_endpoint(&self) -> String {
        format!("{}/reviews", self.pulls_endpoint())
    }

    fn review_endpoint(&self, review_id: &str) -> String {
        format!("{}/reviews/{}", self.pulls_endpoint(), review_id)
    }

    fn review_comments_endpoint(&self) -> String {
        format!("{}/comments", self.pulls_endpoint())
    }

    fn comment_endpoint(&self, comment_id: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/comments/{}",
            self.api_base(),
            self.owner,
            self.repo,
            comment_id
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "sonargate")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    async fn get_list_page<T: DeserializeOwned>(
        &self,
        base: &str,
        page: u64,
        what: &str,
    ) -> Result<Vec<T>> {
        let resp = self
            .request(Method::GET, paged_url(base, page))
            .send()
            .await
            .with_context(|| format!("github: failed to list {what}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("github: failed to read {what} body"))?;
        if !status.is_success() {
            anyhow::bail!("github: failed to list {what} ({status}): {body}");
        }

        serde_json::from_str(&body).with_context(|| format!("github: invalid {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    head: PullHead,
}

#[derive(Debug, Deserialize)]
struct PullHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ReviewResponse {
    id: u64,
    // 승인/요청 리뷰는 본문이 없을 수 있다.
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewCommentResponse {
    id: u64,
    body: String,
    path: String,
    // 파일 단위 코멘트나 diff 밖으로 밀려난 코멘트는 라인이 비어 있다.
    line: Option<u32>,
}

#[async_trait]
impl ReviewProvider for GitHubClient {
    async fn fetch_head_sha(&self) -> Result<String> {
        let resp = self
            .request(Method::GET, self.pulls_endpoint())
            .send()
            .await
            .context("github: failed to fetch PR")?;

        let status = resp.status();
        let body = resp.text().await.context("github: failed to read PR body")?;
        if !status.is_success() {
            anyhow::bail!("github: failed to fetch PR metadata ({status}): {body}");
        }

        let pr: PullResponse = serde_json::from_str(&body).context("github: invalid PR JSON")?;
        Ok(pr.head.sha)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>> {
        // 짧은 페이지가 나올 때까지 전 페이지를 순회한다.
        let endpoint = self.reviews_endpoint();
        let mut reviews = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<ReviewResponse> =
                self.get_list_page(&endpoint, page, "reviews").await?;
            let full_page = batch.len() >= LIST_PAGE_SIZE;
            reviews.extend(batch.into_iter().map(|r| Review {
                id: r.id.to_string(),
                body: r.body.unwrap_or_default(),
            }));
            if !full_page {
                break;
            }
            page += 1;
        }
        Ok(reviews)
    }

    async fn list_inline_comments(&self) -> Result<Vec<ExistingComment>> {
        let endpoint = self.review_comments_endpoint();
        let mut comments = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<ReviewCommentResponse> = self
                .get_list_page(&endpoint, page, "review comments")
                .await?;
            let full_page = batch.len() >= LIST_PAGE_SIZE;
            comments.extend(batch.into_iter().map(|c| ExistingComment {
                id: c.id.to_string(),
                body: c.body,
                path: c.path,
                line: c.line,
            }));
            if !full_page {
                break;
            }
            page += 1;
        }
        Ok(comments)
    }

    async fn create_review(
        &self,
        body: &str,
        comments: &[DesiredComment],
        commit_sha: &str,
    ) -> Result<Review> {
        let inline: Vec<_> = comments
            .iter()
            .map(|c| {
                json!({
                    "path": c.path,
                    "line": c.line,
                    "body": c.body,
                })
            })
            .collect();

        let resp = self
            .request(Method::POST, self.reviews_endpoint())
            .json(&json!({
                "body": body,
                "event": "COMMENT",
                "commit_id": commit_sha,
                "comments": inline,
            }))
            .send()
            .await
            .context("github: failed to create review")?;

        let status = resp.status();
        let response_body = resp
            .text()
            .await
            .context("github: failed to read create-review body")?;
        if !status.is_success() {
            anyhow::bail!("github: failed to create review ({status}): {response_body}");
        }

        let review: ReviewResponse =
            serde_json::from_str(&response_body).context("github: invalid create-review JSON")?;
        Ok(Review {
            id: review.id.to_string(),
            body: review.body.unwrap_or_default(),
        })
    }

    async fn update_review_summary(&self, review_id: &str, body: &str) -> Result<()> {
        let resp = self
            .request(Method::PUT, self.review_endpoint(review_id))
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to update review")?;

        let status = resp.status();
        if !status.is_success() {
            let response_body = resp
                .text()
                .await
                .context("github: failed to read update-review body")?;
            anyhow::bail!("github: failed to update review ({status}): {response_body}");
        }
        Ok(())
    }

    async fn update_comment(&self, comment_id: &str, body: &str) -> Result<()> {
        let resp = self
            .request(Method::PATCH, self.comment_endpoint(comment_id))
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to update review comment")?;

        let status = resp.status();
        if !status.is_success() {
            let response_body = resp
                .text()
                .await
                .context("github: failed to read update-comment body")?;
            anyhow::bail!("github: failed to update review comment ({status}): {response_body}");
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let resp = self
            .request(Method::DELETE, self.comment_endpoint(comment_id))
            .send()
            .await
            .context("github: failed to delete review comment")?;

        let status = resp.status();
        if !status.is_success() {
            let response_body = resp
                .text()
                .await
                .context("github: failed to read delete-comment body")?;
            anyhow::bail!("github: failed to delete review comment ({status}): {response_body}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_api_base_prefers_explicit_override() {
        let client = GitHubClient::new(
            "github.example.com".to_string(),
            "acme".to_string(),
            "widgets".to_string(),
            7,
            None,
            Some("https://github.example.com/api/v3/".to_string()),
        );
        assert_eq!(client.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    fn unit_api_base_defaults_per_host() {
        let public = GitHubClient::new(
            "github.com".to_string(),
            "acme".to_string(),
            "widgets".to_string(),
            7,
            None,
            None,
        );
        assert_eq!(public.api_base(), "https://api.github.com");

        let enterprise = GitHubClient::new(
            "github.example.com".to_string(),
            "acme".to_string(),
            "widgets".to_string(),
            7,
            None,
            None,
        );
        assert_eq!(enterprise.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    fn regression_list_urls_request_full_pages() {
        // 기본 30건 응답만 읽으면 31번째 이후 코멘트를 놓친다.
        assert_eq!(
            paged_url("https://api.github.com/repos/acme/widgets/pulls/7/comments", 1),
            "https://api.github.com/repos/acme/widgets/pulls/7/comments?per_page=100&page=1"
        );
        assert_eq!(
            paged_url("https://api.github.com/repos/acme/widgets/pulls/7/reviews", 3),
            "https://api.github.com/repos/acme/widgets/pulls/7/reviews?per_page=100&page=3"
        );
    }

    #[test]
    fn unit_endpoints_target_pull_request_scope() {
        let client = GitHubClient::new(
            "github.com".to_string(),
            "acme".to_string(),
            "widgets".to_string(),
            7,
            None,
            None,
        );
        assert_eq!(
            client.reviews_endpoint(),
            "https://api.github.com/repos/acme/widgets/pulls/7/reviews"
        );
        assert_eq!(
            client.review_comments_endpoint(),
            "https://api.github.com/repos/acme/widgets/pulls/7/comments"
        );
        assert_eq!(
            client.comment_endpoint("31"),
            "https://api.github.com/repos/acme/widgets/pulls/comments/31"
        );
    }
}
