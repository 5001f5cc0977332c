//! 리뷰 동기화 도메인 엔티티/값 객체.

use crate::domain::issue::IssueCounts;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    pub dry_run: bool,
}

/// 렌더링된 링크/조회 파라미터에 필요한 실행 문맥.
/// 전역 조회 없이 호출 시점에 명시적으로 전달한다.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub analysis_host: String,
    pub project_key: String,
    pub pull_number: u64,
    pub branch_plugin: bool,
}

/// 이슈 1건에서 파생된, PR에 있어야 할 인라인 코멘트.
/// `key`는 반드시 원본 이슈의 key와 같다(재조정 조인 키).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredComment {
    pub key: String,
    pub body: String,
    pub path: String,
    pub line: u32,
}

/// 플랫폼에 이미 존재하는 인라인 코멘트.
/// key는 저장되어 있지 않고 body 파싱으로만 복원된다.
#[derive(Debug, Clone)]
pub struct ExistingComment {
    pub id: String,
    pub body: String,
    pub path: String,
    pub line: Option<u32>,
}

/// PR의 리뷰(요약 코멘트 후보).
#[derive(Debug, Clone)]
pub struct Review {
    pub id: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub comment_id: String,
    pub comment: DesiredComment,
}

/// 한 번의 실행에서 계산되는 생성/수정/삭제 액션 집합.
/// 실행마다 새로 만들고 어디에도 저장하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationPlan {
    pub to_create: Vec<DesiredComment>,
    pub to_update: Vec<CommentUpdate>,
    pub to_delete: Vec<String>,
    /// body까지 동일해 건드리지 않는 코멘트 수.
    pub stable: usize,
    /// key를 복원하지 못해 제외한 코멘트 수(절대 삭제하지 않음).
    pub skipped: usize,
}

impl ReconciliationPlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// 요약 리뷰에 수행한 액션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    Created,
    Updated,
    /// dry-run: 렌더링만 하고 게시하지 않음.
    Previewed,
}

/// `generate_report` 한 번의 실행 결과.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub summary_action: SummaryAction,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub stable: usize,
    pub skipped: usize,
    pub counts: IssueCounts,
    pub gate_passed: bool,
}
