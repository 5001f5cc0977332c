//! 분석 서버 추상화 계층.
//! SonarQube 계열 서버 구현을 공통 인터페이스로 묶는다.

pub mod sonarqube;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::issue::{IssuePage, QualityGate};
use crate::domain::review::ReportContext;

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// 미해결 이슈 페이지 조회 (1부터 시작)
    async fn fetch_issue_page(&self, page: u64) -> Result<IssuePage>;
    /// 품질 게이트 상태 조회
    async fn fetch_quality_gate(&self) -> Result<QualityGate>;
}

pub fn build_analysis_client(
    ctx: &ReportContext,
    token: Option<String>,
    page_size: u64,
) -> Box<dyn AnalysisProvider> {
    Box::new(sonarqube::SonarQubeClient::new(
        ctx.analysis_host.clone(),
        ctx.project_key.clone(),
        ctx.pull_number,
        ctx.branch_plugin,
        token,
        page_size,
    ))
}
