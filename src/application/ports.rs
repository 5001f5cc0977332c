//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{AnalysisConfig, Config, HostConfig};
use crate::domain::issue::{Issue, IssueCounts, IssuePage, QualityGate};
use crate::domain::review::{DesiredComment, ExistingComment, ReportContext, Review};
use crate::domain::target::PullRequestTarget;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// URL 입력값을 도메인 대상 식별자로 변환하는 포트.
pub trait TargetResolver: Send + Sync {
    fn parse(&self, input: &str) -> Result<PullRequestTarget>;
}

/// 토큰 해석 결과(값 + 출처 라벨).
#[derive(Debug, Clone, Default)]
pub struct TokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// 설정(token/env)에서 런타임 토큰을 해석하는 포트.
pub trait TokenResolver: Send + Sync {
    fn resolve_host_token(&self, host_cfg: Option<&HostConfig>) -> TokenResolution;
    fn resolve_analysis_token(&self, analysis: &AnalysisConfig) -> TokenResolution;
}

/// 분석 서버(이슈 검색/품질 게이트) 연동 포트.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// 이슈 검색 결과 한 페이지 조회(1부터 시작).
    async fn fetch_issue_page(&self, page: u64) -> Result<IssuePage>;
    /// 품질 게이트 상태 조회.
    async fn fetch_quality_gate(&self) -> Result<QualityGate>;
}

/// 실행 문맥에 맞는 분석 게이트웨이를 생성하는 팩토리 포트.
pub trait AnalysisFactory: Send + Sync {
    fn build(
        &self,
        ctx: &ReportContext,
        token: Option<String>,
        page_size: u64,
    ) -> Box<dyn AnalysisGateway>;
}

/// 코드 협업 플랫폼(PR 리뷰/코멘트 CRUD) 연동 포트.
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    async fn fetch_head_sha(&self) -> Result<String>;
    async fn list_reviews(&self) -> Result<Vec<Review>>;
    async fn list_inline_comments(&self) -> Result<Vec<ExistingComment>>;
    /// 요약 본문과 인라인 코멘트를 리뷰 1건으로 제출한다(플랫폼 차원 원자 연산).
    async fn create_review(
        &self,
        body: &str,
        comments: &[DesiredComment],
        commit_sha: &str,
    ) -> Result<Review>;
    async fn update_review_summary(&self, review_id: &str, body: &str) -> Result<()>;
    async fn update_comment(&self, comment_id: &str, body: &str) -> Result<()>;
    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}

/// 대상/호스트 설정에 맞는 리뷰 게이트웨이를 생성하는 팩토리 포트.
pub trait ReviewFactory: Send + Sync {
    fn build(
        &self,
        target: &PullRequestTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn ReviewGateway>;
}

/// 리포트 마크다운 렌더링 포트.
pub trait ReportRenderer: Send + Sync {
    fn render_issue_note(&self, ctx: &ReportContext, issue: &Issue) -> String;
    fn render_summary(
        &self,
        ctx: &ReportContext,
        gate: &QualityGate,
        counts: &IssueCounts,
    ) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
