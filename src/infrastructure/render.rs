//! 리포트 마크다운 렌더링 모듈.
//!
//! 이슈 노트에 박히는 식별 링크는 domain::identity가 만들고,
//! 이 모듈은 그 주위의 사람용 본문만 책임진다.

use crate::domain::identity;
use crate::domain::issue::{Condition, Issue, IssueCounts, QualityGate};
use crate::domain::review::ReportContext;

const IMAGE_DIR_LINK: &str = "https://hsonar.s3.ap-southeast-1.amazonaws.com/images/";

/// 이슈 1건의 인라인 코멘트 본문을 생성한다.
pub fn render_issue_note(ctx: &ReportContext, issue: &Issue) -> String {
    let rule = &issue.rule;
    let rule_link = format!(
        "{}/coding_rules?open={rule}&rule_key={rule}",
        ctx.analysis_host
    );
    let issue_link = identity::issue_link(ctx, &issue.key);

    let tags = if issue.tags.is_empty() {
        String::new()
    } else {
        format!("`{}`　　", issue.tags.join("` `"))
    };
    let assignee = issue
        .assignee
        .as_deref()
        .map(|a| format!(" :bust_in_silhouette: @{a}　　"))
        .unwrap_or_default();

    let type_code = issue.issue_type.as_str();
    format!(
        "#### [:link:]({issue_link}){message}\n\n{type_icon} {type_label}　　{severity_icon} **{severity_label}**\n\n{tags}{assignee}[<sub>Why is this an issue?</sub>]({rule_link})",
        message = issue.message,
        type_icon = icon(type_code),
        type_label = capitalize(&type_code.replace('_', "")),
        severity_icon = icon(&issue.severity),
        severity_label = capitalize(&issue.severity),
    )
}

/// 품질 게이트 상태와 이슈 집계를 요약 리뷰 본문으로 만든다.
pub fn render_summary(ctx: &ReportContext, gate: &QualityGate, counts: &IssueCounts) -> String {
    let digest = digest_conditions(&gate.conditions);
    let status = if gate.status.is_passed() {
        "passed"
    } else {
        "failed"
    };

    // 값이 있을 때는 링크 텍스트 앞에 공백 하나가 더 들어간다(기존
    // 게시물과 바이트 단위로 같아야 재조정에서 안정으로 판정된다).
    let coverage_text = match digest.coverage {
        Some(value) => format!(
            " [{value:.2}% Coverage]({})",
            metric_url(ctx, "new_coverage")
        ),
        None => "**Coverage**".to_string(),
    };
    let duplication_text = match digest.duplication {
        Some(value) => format!(
            " [{value:.2}% Duplication]({})",
            metric_url(ctx, "new_duplicated_lines_density")
        ),
        None => "**Duplication**".to_string(),
    };

    format!(
        "### SonarQube Quality Gate {status}! [{status_icon}]({all_issues_url})\n\n\
         {bug_icon}  {bug_rating_icon} [{bugs} Bugs]({bugs_url})  \n\
         {vul_icon}  {vul_rating_icon} [{vulnerabilities} Vulnerabilities]({vulnerabilities_url})  \n\
         {smell_icon}  {smell_rating_icon} [{code_smells} Code Smells]({code_smells_url})\n\n\
         {coverage_icon} {coverage_text}  \n\
         {duplication_icon} {duplication_text}",
        status_icon = icon(status),
        all_issues_url = issues_url(ctx, None),
        bug_icon = icon("bug"),
        bug_rating_icon = icon(&digest.bug_rating),
        bugs = counts.bugs,
        bugs_url = issues_url(ctx, Some("BUG")),
        vul_icon = icon("vulnerability"),
        vul_rating_icon = icon(&digest.vulnerability_rating),
        vulnerabilities = counts.vulnerabilities,
        vulnerabilities_url = issues_url(ctx, Some("VULNERABILITY")),
        smell_icon = icon("code_smell"),
        smell_rating_icon = icon(&digest.code_smell_rating),
        code_smells = counts.code_smells,
        code_smells_url = issues_url(ctx, Some("CODE_SMELL")),
        coverage_icon = coverage_icon(digest.coverage),
        duplication_icon = duplication_icon(digest.duplication),
    )
}

/// 게이트 조건에서 요약에 필요한 등급/메트릭만 추린 다이제스트.
#[derive(Debug, Default, PartialEq)]
struct GateDigest {
    bug_rating: String,
    vulnerability_rating: String,
    code_smell_rating: String,
    coverage: Option<f64>,
    duplication: Option<f64>,
}

fn digest_conditions(conditions: &[Condition]) -> GateDigest {
    let mut digest = GateDigest::default();
    for condition in conditions {
        match condition.metric_key.as_str() {
            "new_reliability_rating" => digest.bug_rating = rating_level(&condition.actual_value),
            "new_security_rating" => {
                digest.vulnerability_rating = rating_level(&condition.actual_value)
            }
            "new_maintainability_rating" => {
                digest.code_smell_rating = rating_level(&condition.actual_value)
            }
            "new_coverage" => digest.coverage = condition.actual_value.parse().ok(),
            "new_duplicated_lines_density" => {
                digest.duplication = condition.actual_value.parse().ok()
            }
            _ => {}
        }
    }
    digest
}

/// 등급 메트릭 값(1~5)을 A~E 표기로 변환한다. 5 이상은 모두 E.
/// 서버는 "3.0"처럼 소수 표기로 줄 때가 있어 정수부만 본다.
fn rating_level(value: &str) -> String {
    let parsed = value
        .split('.')
        .next()
        .and_then(|v| v.parse::<u32>().ok());
    match parsed {
        Some(1) => "A",
        Some(2) => "B",
        Some(3) => "C",
        Some(4) => "D",
        Some(v) if v >= 5 => "E",
        _ => "",
    }
    .to_string()
}

fn icon(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    format!("![{name}]({IMAGE_DIR_LINK}{}.png)", name.to_lowercase())
}

fn coverage_icon(coverage: Option<f64>) -> String {
    let Some(value) = coverage else {
        return "*No data*".to_string();
    };
    if value < 50.0 {
        icon("coverage_lt_50")
    } else if value < 80.0 {
        icon("coverage_gt_50")
    } else {
        icon("coverage_gt_80")
    }
}

fn duplication_icon(duplication: Option<f64>) -> String {
    let Some(value) = duplication else {
        return "*No data*".to_string();
    };
    if value < 3.0 {
        icon("duplication_lt_3")
    } else if value < 5.0 {
        icon("duplication_3_5")
    } else if value < 10.0 {
        icon("duplication_5_10")
    } else if value < 20.0 {
        icon("duplication_10_20")
    } else {
        // 20% 이상도 원본 이미지 번들에 있는 에셋 이름을 그대로 쓴다.
        icon("duplication_lt_20")
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn issues_url(ctx: &ReportContext, issue_type: Option<&str>) -> String {
    let mut url = format!(
        "{}/project/issues?id={}&resolved=false&sinceLeakPeriod=true",
        ctx.analysis_host, ctx.project_key
    );
    if let Some(t) = issue_type {
        url.push_str(&format!("&types={t}"));
    }
    append_pull_request(ctx, url)
}

fn metric_url(ctx: &ReportContext, metric: &str) -> String {
    let url = format!(
        "{}/project/issues?id={}&metric={metric}&view=list",
        ctx.analysis_host, ctx.project_key
    );
    append_pull_request(ctx, url)
}

fn append_pull_request(ctx: &ReportContext, mut url: String) -> String {
    if ctx.branch_plugin {
        url.push_str(&format!("&pullRequest={}", ctx.pull_number));
    }
    url
}
