//! 분석 게이트웨이 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{AnalysisFactory, AnalysisGateway};
use crate::domain::issue::{IssuePage, QualityGate};
use crate::domain::review::ReportContext;
use crate::infrastructure::analysis;

/// SonarQube 분석 게이트웨이 팩토리 어댑터.
#[derive(Default)]
pub struct SonarAnalysisFactory;

impl AnalysisFactory for SonarAnalysisFactory {
    fn build(
        &self,
        ctx: &ReportContext,
        token: Option<String>,
        page_size: u64,
    ) -> Box<dyn AnalysisGateway> {
        Box::new(AnalysisGatewayAdapter {
            inner: analysis::build_analysis_client(ctx, token, page_size),
        })
    }
}

/// 인프라 분석 Provider를 애플리케이션 포트로 감싸는 래퍼.
struct AnalysisGatewayAdapter {
    inner: Box<dyn analysis::AnalysisProvider>,
}

#[async_trait]
impl AnalysisGateway for AnalysisGatewayAdapter {
    async fn fetch_issue_page(&self, page: u64) -> Result<IssuePage> {
        self.inner.fetch_issue_page(page).await
    }

    async fn fetch_quality_gate(&self) -> Result<QualityGate> {
        self.inner.fetch_quality_gate().await
    }
}
