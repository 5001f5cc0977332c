//! 분석 리포트와 PR 리뷰 코멘트를 일치시키는 전체 오케스트레이션 유스케이스.

mod aggregate;
mod apply;
mod context;

use anyhow::{Context, Result};

use crate::application::ports::{
    AnalysisFactory, ConfigRepository, ReportRenderer, Reporter, ReviewFactory, TargetResolver,
    TokenResolver,
};
use crate::domain::identity::find_managed_summary;
use crate::domain::reconcile::reconcile;
use crate::domain::review::{RunOptions, SummaryAction, SyncOutcome};

use aggregate::{build_desired_comments, fetch_all_issues};
use apply::{apply_plan, preview_report, publish_fresh_review};
use context::load_execution_context;

/// URL 입력부터 이슈 집계, 재조정, 코멘트 반영까지 전체 흐름을 조율한다.
pub struct SyncReportUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub target_resolver: &'a dyn TargetResolver,
    pub token_resolver: &'a dyn TokenResolver,
    pub analysis_factory: &'a dyn AnalysisFactory,
    pub review_factory: &'a dyn ReviewFactory,
    pub renderer: &'a dyn ReportRenderer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SyncReportUseCase<'a> {
    /// 리포트 생성 본 실행 진입점.
    /// 품질 게이트/이슈를 조회하고, PR의 코멘트 집합이 현재 이슈
    /// 집합과 정확히 일치하도록 생성/수정/삭제를 수행한다.
    pub async fn execute(&self, options: RunOptions) -> Result<SyncOutcome> {
        self.reporter.section("Session");
        self.reporter.kv("Target", &options.url);
        self.reporter
            .kv("Mode", if options.dry_run { "dry-run" } else { "sync" });

        let ctx = load_execution_context(self, &options).await?;

        self.reporter.section("Analysis Report");
        self.reporter.status("Analysis", "fetching quality gate");
        let gate = ctx
            .analysis
            .fetch_quality_gate()
            .await
            .context("failed to fetch quality gate status")?;
        let gate_passed = gate.status.is_passed();

        let issues = fetch_all_issues(self, ctx.analysis.as_ref()).await?;
        let (desired, counts) = build_desired_comments(self, &ctx.report, &issues);
        let summary = self.renderer.render_summary(&ctx.report, &gate, &counts);

        if options.dry_run {
            preview_report(self, &summary, &desired);
            return Ok(SyncOutcome {
                summary_action: SummaryAction::Previewed,
                created: 0,
                updated: 0,
                deleted: 0,
                stable: 0,
                skipped: 0,
                counts,
                gate_passed,
            });
        }

        let reviews = ctx.review.list_reviews().await?;
        match find_managed_summary(&reviews) {
            None => {
                let created = publish_fresh_review(self, &ctx, &summary, &desired).await?;
                Ok(SyncOutcome {
                    summary_action: SummaryAction::Created,
                    created,
                    updated: 0,
                    deleted: 0,
                    stable: 0,
                    skipped: 0,
                    counts,
                    gate_passed,
                })
            }
            Some(summary_review) => {
                let existing = ctx.review.list_inline_comments().await?;
                let plan = reconcile(&desired, &existing);
                if plan.skipped > 0 {
                    self.reporter.status(
                        "Reconcile",
                        &format!("{} comments without a recoverable key left untouched", plan.skipped),
                    );
                }

                let stats = apply_plan(self, &ctx, &summary_review.id, &summary, &plan).await?;
                Ok(SyncOutcome {
                    summary_action: SummaryAction::Updated,
                    created: stats.created,
                    updated: stats.updated,
                    deleted: stats.deleted,
                    stable: plan.stable,
                    skipped: plan.skipped,
                    counts,
                    gate_passed,
                })
            }
        }
    }
}
