//! 재조정 계획 적용 단계.
//!
//! 고정 순서: 요약 갱신 → 신규 생성(리뷰 1건) → 개별 수정 → 삭제.

use anyhow::{Context, Result};
use tracing::warn;

use crate::application::usecases::sync_report::SyncReportUseCase;
use crate::application::usecases::sync_report::context::ExecutionContext;
use crate::domain::review::{DesiredComment, ReconciliationPlan};

#[derive(Debug, Default)]
pub(super) struct ApplyStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// 기존 요약이 없을 때: 요약 + 모든 desired 코멘트를 리뷰 1건으로 제출한다.
/// desired가 비어도 요약만 담은 리뷰를 만든다.
pub(super) async fn publish_fresh_review(
    use_case: &SyncReportUseCase<'_>,
    ctx: &ExecutionContext,
    summary: &str,
    desired: &[DesiredComment],
) -> Result<usize> {
    let head_sha = ctx
        .head_sha
        .as_deref()
        .context("internal error: missing head sha for non-dry-run")?;

    use_case.reporter.section("Create Review");
    ctx.review
        .create_review(summary, desired, head_sha)
        .await
        .context("failed to create summary review")?;
    use_case.reporter.status(
        "Review",
        &format!("created summary review with {} comments", desired.len()),
    );
    Ok(desired.len())
}

/// 기존 요약이 있을 때: 요약을 갱신하고 계획의 세 집합을 순서대로 적용한다.
/// 각 단계는 항목 단위 실패를 기록만 하고 계속 진행한다.
pub(super) async fn apply_plan(
    use_case: &SyncReportUseCase<'_>,
    ctx: &ExecutionContext,
    summary_review_id: &str,
    summary: &str,
    plan: &ReconciliationPlan,
) -> Result<ApplyStats> {
    let head_sha = ctx
        .head_sha
        .as_deref()
        .context("internal error: missing head sha for non-dry-run")?;

    use_case.reporter.section("Apply Plan");
    let mut stats = ApplyStats::default();

    match ctx
        .review
        .update_review_summary(summary_review_id, summary)
        .await
    {
        Ok(()) => use_case.reporter.status("Review", "summary updated"),
        Err(err) => {
            warn!(review_id = summary_review_id, error = %err, "summary update failed");
            use_case
                .reporter
                .status("Review", "summary update failed; continuing");
        }
    }

    if !plan.to_create.is_empty() {
        match ctx.review.create_review("", &plan.to_create, head_sha).await {
            Ok(_) => {
                stats.created = plan.to_create.len();
                use_case.reporter.status(
                    "Review",
                    &format!("created {} new comments", plan.to_create.len()),
                );
            }
            Err(err) => {
                warn!(error = %err, "comment creation failed");
                use_case
                    .reporter
                    .status("Review", "comment creation failed; continuing");
            }
        }
    }

    for update in &plan.to_update {
        match ctx
            .review
            .update_comment(&update.comment_id, &update.comment.body)
            .await
        {
            Ok(()) => stats.updated += 1,
            Err(err) => {
                warn!(comment_id = %update.comment_id, error = %err, "comment update failed");
            }
        }
    }

    for comment_id in &plan.to_delete {
        match ctx.review.delete_comment(comment_id).await {
            Ok(()) => stats.deleted += 1,
            Err(err) => {
                warn!(comment_id = %comment_id, error = %err, "comment delete failed");
            }
        }
    }

    use_case.reporter.status(
        "Review",
        &format!(
            "applied plan: {} created, {} updated, {} deleted",
            stats.created, stats.updated, stats.deleted
        ),
    );
    Ok(stats)
}

/// dry-run: 게시할 내용을 콘솔로만 출력한다.
pub(super) fn preview_report(
    use_case: &SyncReportUseCase<'_>,
    summary: &str,
    desired: &[DesiredComment],
) {
    use_case.reporter.section("Dry Run: Summary");
    use_case.reporter.raw(summary);

    use_case.reporter.section("Dry Run: Inline Comments");
    for comment in desired {
        use_case
            .reporter
            .raw(&format!("--- {}:{} ---", comment.path, comment.line));
        use_case.reporter.raw(&comment.body);
    }
}
