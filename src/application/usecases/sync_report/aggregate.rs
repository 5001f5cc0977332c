//! 이슈 집계 단계: 페이지 순회와 desired 코멘트 구성.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::ports::AnalysisGateway;
use crate::application::usecases::sync_report::SyncReportUseCase;
use crate::domain::issue::{Issue, IssueCounts};
use crate::domain::review::{DesiredComment, ReportContext};

/// 이슈 검색을 전 페이지 순회해 하나의 목록으로 모은다.
///
/// 첫 페이지 실패는 치명적이다. 이후 페이지가 실패하거나 빈 결과를
/// 반환하면 순회를 멈추고 지금까지 모은 부분 결과를 돌려준다.
/// 결과 길이는 실제 수신한 페이지별 개수의 합과 같다.
pub(super) async fn fetch_all_issues(
    use_case: &SyncReportUseCase<'_>,
    gateway: &dyn AnalysisGateway,
) -> Result<Vec<Issue>> {
    use_case.reporter.status("Analysis", "fetching issues");

    let first = gateway
        .fetch_issue_page(1)
        .await
        .context("failed to fetch first issue page")?;

    let total_pages = if first.page_size == 0 {
        1
    } else {
        first.total.div_ceil(first.page_size)
    };
    let mut issues = first.issues;

    for page in 2..=total_pages {
        match gateway.fetch_issue_page(page).await {
            Ok(next) if next.issues.is_empty() => {
                warn!(page, "issue page returned no data; stopping aggregation");
                break;
            }
            Ok(next) => issues.extend(next.issues),
            Err(err) => {
                warn!(page, error = %err, "issue page fetch failed; keeping partial result");
                use_case.reporter.status(
                    "Analysis",
                    &format!("page {page} fetch failed; continuing with partial results"),
                );
                break;
            }
        }
    }

    use_case
        .reporter
        .kv("Issues", &issues.len().to_string());
    Ok(issues)
}

/// 이슈마다 있어야 할 인라인 코멘트를 렌더링하고 유형별 개수를 집계한다.
/// 라인을 정할 수 없는 이슈(파일/프로젝트 수준)는 인라인 코멘트가
/// 될 수 없으므로 제외한다.
pub(super) fn build_desired_comments(
    use_case: &SyncReportUseCase<'_>,
    ctx: &ReportContext,
    issues: &[Issue],
) -> (Vec<DesiredComment>, IssueCounts) {
    let mut desired = Vec::with_capacity(issues.len());
    let mut counts = IssueCounts::default();

    for issue in issues {
        counts.tally(issue.issue_type);

        let Some(line) = issue.anchor_line() else {
            debug!(key = %issue.key, "issue has no anchor line; not representable inline");
            continue;
        };

        desired.push(DesiredComment {
            key: issue.key.clone(),
            body: use_case.renderer.render_issue_note(ctx, issue),
            path: issue.path(),
            line,
        });
    }

    (desired, counts)
}
