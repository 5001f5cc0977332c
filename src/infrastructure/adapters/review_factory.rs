//! 리뷰 게이트웨이 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::HostConfig;
use crate::application::ports::{ReviewFactory, ReviewGateway};
use crate::domain::review::{DesiredComment, ExistingComment, Review};
use crate::domain::target::PullRequestTarget;
use crate::infrastructure::vcs;

/// 리뷰 게이트웨이 팩토리 어댑터.
#[derive(Default)]
pub struct ReviewFactoryAdapter;

impl ReviewFactory for ReviewFactoryAdapter {
    fn build(
        &self,
        target: &PullRequestTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn ReviewGateway> {
        Box::new(ReviewGatewayAdapter {
            inner: vcs::build_review_client(target, host_cfg, token),
        })
    }
}

/// 인프라 리뷰 Provider를 애플리케이션 포트로 감싸는 래퍼.
struct ReviewGatewayAdapter {
    inner: Box<dyn vcs::ReviewProvider>,
}

#[async_trait]
impl ReviewGateway for ReviewGatewayAdapter {
    async fn fetch_head_sha(&self) -> Result<String> {
        self.inner.fetch_head_sha().await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>> {
        self.inner.list_reviews().await
    }

    async fn list_inline_comments(&self) -> Result<Vec<ExistingComment>> {
        self.inner.list_inline_comments().await
    }

    async fn create_review(
        &self,
        body: &str,
        comments: &[DesiredComment],
        commit_sha: &str,
    ) -> Result<Review> {
        self.inner.create_review(body, comments, commit_sha).await
    }

    async fn update_review_summary(&self, review_id: &str, body: &str) -> Result<()> {
        self.inner.update_review_summary(review_id, body).await
    }

    async fn update_comment(&self, comment_id: &str, body: &str) -> Result<()> {
        self.inner.update_comment(comment_id, body).await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.inner.delete_comment(comment_id).await
    }
}
