//! VCS 추상화 계층.
//! 호스트별 리뷰 API 구현을 공통 인터페이스로 묶는다.

pub mod github;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::HostConfig;
use crate::domain::review::{DesiredComment, ExistingComment, Review};
use crate::domain::target::PullRequestTarget;

#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// PR의 현재 HEAD SHA 조회
    async fn fetch_head_sha(&self) -> Result<String>;
    /// PR의 리뷰 목록 조회
    async fn list_reviews(&self) -> Result<Vec<Review>>;
    /// PR의 인라인 리뷰 코멘트 목록 조회
    async fn list_inline_comments(&self) -> Result<Vec<ExistingComment>>;
    /// 요약 본문과 인라인 코멘트를 하나의 리뷰로 게시
    async fn create_review(
        &self,
        body: &str,
        comments: &[DesiredComment],
        commit_sha: &str,
    ) -> Result<Review>;
    /// 기존 리뷰의 요약 본문 수정
    async fn update_review_summary(&self, review_id: &str, body: &str) -> Result<()>;
    /// 인라인 코멘트 본문 수정
    async fn update_comment(&self, comment_id: &str, body: &str) -> Result<()>;
    /// 인라인 코멘트 삭제
    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}

pub fn build_review_client(
    target: &PullRequestTarget,
    host_cfg: Option<&HostConfig>,
    token: Option<String>,
) -> Box<dyn ReviewProvider> {
    let api_base = host_cfg.and_then(|h| h.api_base.clone());

    Box::new(github::GitHubClient::new(
        target.host.clone(),
        target.owner.clone(),
        target.repo.clone(),
        target.number,
        token,
        api_base,
    ))
}
