//! 리포트 렌더링 포트 구현 어댑터.

use crate::application::ports::ReportRenderer;
use crate::domain::issue::{Issue, IssueCounts, QualityGate};
use crate::domain::review::ReportContext;
use crate::infrastructure::render;

/// 마크다운 리포트 렌더러 어댑터.
#[derive(Default)]
pub struct MarkdownReportRenderer;

impl ReportRenderer for MarkdownReportRenderer {
    fn render_issue_note(&self, ctx: &ReportContext, issue: &Issue) -> String {
        render::render_issue_note(ctx, issue)
    }

    fn render_summary(
        &self,
        ctx: &ReportContext,
        gate: &QualityGate,
        counts: &IssueCounts,
    ) -> String {
        render::render_summary(ctx, gate, counts)
    }
}
