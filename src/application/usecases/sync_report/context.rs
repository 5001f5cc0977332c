//! 동기화 실행 컨텍스트(설정/대상/게이트웨이) 준비 단계.

use anyhow::{Context, Result, bail};

use crate::application::usecases::sync_report::SyncReportUseCase;
use crate::application::ports::{AnalysisGateway, ReviewGateway};
use crate::domain::review::{ReportContext, RunOptions};

/// 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub report: ReportContext,
    pub analysis: Box<dyn AnalysisGateway>,
    pub review: Box<dyn ReviewGateway>,
    /// dry-run에서는 조회하지 않는다.
    pub head_sha: Option<String>,
}

/// 설정 로딩, 대상 파싱, 토큰 해석, 게이트웨이 생성까지 선행한다.
pub(super) async fn load_execution_context(
    use_case: &SyncReportUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load sonargate config")?;

    let target = use_case
        .target_resolver
        .parse(&options.url)
        .context("failed to parse pull request URL")?;

    let Some(analysis_host) = config
        .analysis
        .host
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        bail!("missing analysis.host in config. Set the analysis server base URL");
    };
    let Some(project_key) = config
        .analysis
        .project_key
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        bail!("missing analysis.project_key in config");
    };

    let report = ReportContext {
        analysis_host: analysis_host.trim_end_matches('/').to_string(),
        project_key: project_key.to_string(),
        pull_number: target.number,
        branch_plugin: config.analysis.branch_plugin(),
    };

    let host_cfg = config.host_config(&target.host);
    let vcs_token = use_case.token_resolver.resolve_host_token(host_cfg);
    if !options.dry_run && vcs_token.token.is_none() {
        bail!(
            "missing VCS token for host '{}'. Configure hosts.{}.token or hosts.{}.token_env in config, or use --dry-run",
            target.host,
            target.host,
            target.host,
        );
    }

    let analysis_token = use_case
        .token_resolver
        .resolve_analysis_token(&config.analysis);

    let analysis =
        use_case
            .analysis_factory
            .build(&report, analysis_token.token, config.page_size());
    let review = use_case
        .review_factory
        .build(&target, host_cfg, vcs_token.token);

    use_case.reporter.section("Fetch Target");
    use_case.reporter.kv("Host", &target.host);
    use_case.reporter.kv("Project", &report.project_key);

    let head_sha = if options.dry_run {
        None
    } else {
        use_case.reporter.status("VCS", "fetching head SHA");
        let sha = review.fetch_head_sha().await?;
        use_case.reporter.kv("Head SHA", &sha);
        Some(sha)
    };

    Ok(ExecutionContext {
        report,
        analysis,
        review,
        head_sha,
    })
}
