//! 분석 서버가 보고하는 이슈/품질 게이트 값 객체.

/// 이슈 분류.
/// BUG/VULNERABILITY 외의 모든 유형은 code smell로 취급한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    Bug,
    Vulnerability,
    CodeSmell,
}

impl IssueType {
    /// 서버 응답의 type 문자열을 분류한다.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "BUG" => Self::Bug,
            "VULNERABILITY" => Self::Vulnerability,
            _ => Self::CodeSmell,
        }
    }

    /// 서버 표기 그대로의 코드값(아이콘/링크 URL에 사용).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "BUG",
            Self::Vulnerability => "VULNERABILITY",
            Self::CodeSmell => "CODE_SMELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// 분석 서버의 이슈 한 건. 조회 이후 불변 스냅샷으로만 다룬다.
#[derive(Debug, Clone)]
pub struct Issue {
    pub key: String,
    pub rule: String,
    pub project: String,
    pub component: String,
    pub message: String,
    pub severity: String,
    pub issue_type: IssueType,
    pub line: Option<u32>,
    pub text_range: Option<TextRange>,
    pub tags: Vec<String>,
    pub assignee: Option<String>,
}

impl Issue {
    /// 인라인 코멘트를 달 기준 라인.
    /// line이 없으면 text range 시작 라인으로 대체한다.
    pub fn anchor_line(&self) -> Option<u32> {
        self.line.or_else(|| self.text_range.map(|r| r.start_line))
    }

    /// component에서 `project:` 접두사를 제거한 저장소 경로.
    pub fn path(&self) -> String {
        let prefix = format!("{}:", self.project);
        self.component
            .strip_prefix(&prefix)
            .unwrap_or(&self.component)
            .to_string()
    }
}

/// 이슈 검색 결과 한 페이지.
#[derive(Debug, Clone)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// 품질 게이트 통과 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Passed,
    Failed,
}

impl GateStatus {
    /// 서버 status 문자열을 해석한다. `OK`만 통과로 본다.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "OK" { Self::Passed } else { Self::Failed }
    }

    pub fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub metric_key: String,
    pub actual_value: String,
    pub status: String,
}

/// 품질 게이트 스냅샷(종합 상태 + 메트릭 조건).
#[derive(Debug, Clone)]
pub struct QualityGate {
    pub status: GateStatus,
    pub conditions: Vec<Condition>,
}

/// 유형별 이슈 개수 집계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub bugs: usize,
    pub vulnerabilities: usize,
    pub code_smells: usize,
}

impl IssueCounts {
    pub fn tally(&mut self, issue_type: IssueType) {
        match issue_type {
            IssueType::Bug => self.bugs += 1,
            IssueType::Vulnerability => self.vulnerabilities += 1,
            IssueType::CodeSmell => self.code_smells += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.bugs + self.vulnerabilities + self.code_smells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(line: Option<u32>, text_range: Option<TextRange>) -> Issue {
        Issue {
            key: "k1".to_string(),
            rule: "rust:S100".to_string(),
            project: "demo".to_string(),
            component: "demo:src/lib.rs".to_string(),
            message: "message".to_string(),
            severity: "MAJOR".to_string(),
            issue_type: IssueType::Bug,
            line,
            text_range,
            tags: Vec::new(),
            assignee: None,
        }
    }

    #[test]
    fn unit_classify_maps_unknown_types_to_code_smell() {
        assert_eq!(IssueType::classify("BUG"), IssueType::Bug);
        assert_eq!(IssueType::classify("VULNERABILITY"), IssueType::Vulnerability);
        assert_eq!(IssueType::classify("CODE_SMELL"), IssueType::CodeSmell);
        assert_eq!(IssueType::classify("SECURITY_HOTSPOT"), IssueType::CodeSmell);
    }

    #[test]
    fn unit_anchor_line_falls_back_to_text_range_start() {
        assert_eq!(issue(Some(7), None).anchor_line(), Some(7));
        let range = TextRange {
            start_line: 3,
            end_line: 5,
        };
        assert_eq!(issue(None, Some(range)).anchor_line(), Some(3));
        assert_eq!(issue(None, None).anchor_line(), None);
    }

    #[test]
    fn unit_path_strips_project_prefix_only() {
        assert_eq!(issue(None, None).path(), "src/lib.rs");

        let mut odd = issue(None, None);
        odd.component = "other:src/lib.rs".to_string();
        assert_eq!(odd.path(), "other:src/lib.rs");
    }

    #[test]
    fn unit_gate_status_only_ok_passes() {
        assert!(GateStatus::from_wire("OK").is_passed());
        assert!(!GateStatus::from_wire("ERROR").is_passed());
        assert!(!GateStatus::from_wire("WARN").is_passed());
    }
}
