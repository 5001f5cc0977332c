//! 도메인 정책: 코멘트 식별 코덱과 요약 리뷰 탐색 규칙.
//!
//! 이슈 key는 별도 저장소 없이 렌더링된 본문 속 링크 파라미터로만
//! 실행 간에 전달된다. 이 모듈의 렌더/추출이 왕복 일치해야
//! 재조정 매칭이 성립한다.

use crate::domain::review::{ReportContext, Review};

/// 본문에서 key를 복원할 때 찾는 링크 파라미터.
const OPEN_PARAM: &str = "&open=";

/// 관리 대상 요약 리뷰의 제목 서명.
const SUMMARY_SIGNATURE: &str = "SonarQube Quality Gate";
/// 이전 버전이 게시한 요약 제목(계속 인식한다).
const LEGACY_SUMMARY_SIGNATURE: &str = "SonarQube Code Analytics";

/// 이슈 key를 복원 가능하게 내장한 이슈 상세 링크를 만든다.
pub fn issue_link(ctx: &ReportContext, key: &str) -> String {
    format!(
        "{}/project/issues?id={}&pullRequest={}&open={}",
        ctx.analysis_host, ctx.project_key, ctx.pull_number, key
    )
}

/// 렌더링된 본문에서 이슈 key를 복원한다.
/// 패턴이 없으면 `None`이며, 호출자는 이를 "건드리지 말 것"으로
/// 해석해야 한다(삭제 판단에 쓰면 안 됨).
pub fn extract_issue_key(body: &str) -> Option<String> {
    let start = body.find(OPEN_PARAM)? + OPEN_PARAM.len();
    let end = body[start..].find(')')? + start;
    let key = &body[start..end];
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}

/// 본문이 이 시스템이 관리하는 요약 리뷰인지 판별한다.
/// 별도 마커를 저장하는 대신 제목 형식 서명으로 인식한다.
pub fn is_managed_summary(body: &str) -> bool {
    let hashes = body.len() - body.trim_start_matches('#').len();
    if hashes == 0 {
        return false;
    }
    let rest = &body[hashes..];
    let Some(first) = rest.chars().next() else {
        return false;
    };
    if !first.is_whitespace() {
        return false;
    }
    let title = &rest[first.len_utf8()..];
    title.starts_with(SUMMARY_SIGNATURE) || title.starts_with(LEGACY_SUMMARY_SIGNATURE)
}

/// 리뷰 목록에서 관리 대상 요약을 찾는다.
/// 목록 순서 기준 마지막 일치가 정본이다. 과거 버그로 중복 게시된
/// 요약이 있어도 하나만 채택하고 나머지는 그대로 둔다.
pub fn find_managed_summary(reviews: &[Review]) -> Option<&Review> {
    reviews.iter().filter(|r| is_managed_summary(&r.body)).last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ReportContext {
        ReportContext {
            analysis_host: "https://sonar.example.com".to_string(),
            project_key: "demo".to_string(),
            pull_number: 42,
            branch_plugin: true,
        }
    }

    fn review(id: &str, body: &str) -> Review {
        Review {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn unit_extract_issue_key_round_trips_rendered_link() {
        let body = format!("#### [:link:]({})message", issue_link(&ctx(), "AX-123"));
        assert_eq!(extract_issue_key(&body), Some("AX-123".to_string()));
    }

    #[test]
    fn unit_extract_issue_key_returns_none_without_pattern() {
        assert_eq!(extract_issue_key("manually written comment"), None);
        assert_eq!(extract_issue_key("see https://sonar/issues?open=k"), None);
        // 파라미터는 있으나 key가 빈 경우
        assert_eq!(extract_issue_key("link (&open=)"), None);
    }

    #[test]
    fn unit_extract_issue_key_works_at_body_start() {
        assert_eq!(extract_issue_key("&open=k1)"), Some("k1".to_string()));
    }

    #[test]
    fn unit_is_managed_summary_accepts_current_and_legacy_headings() {
        assert!(is_managed_summary("### SonarQube Quality Gate passed!"));
        assert!(is_managed_summary("# SonarQube Code Analytics\n..."));
        assert!(!is_managed_summary("SonarQube Quality Gate passed"));
        assert!(!is_managed_summary("### Release notes"));
        assert!(!is_managed_summary(""));
        assert!(!is_managed_summary("###"));
    }

    #[test]
    fn functional_find_managed_summary_last_match_wins() {
        let reviews = vec![
            review("1", "### SonarQube Quality Gate failed!"),
            review("2", "LGTM"),
            review("3", "# SonarQube Code Analytics"),
        ];
        assert_eq!(find_managed_summary(&reviews).map(|r| r.id.as_str()), Some("3"));
    }

    #[test]
    fn functional_find_managed_summary_none_when_no_signature() {
        let reviews = vec![review("1", "LGTM"), review("2", "needs work")];
        assert!(find_managed_summary(&reviews).is_none());
    }
}
