//! 재조정 핵심: 원하는 코멘트 집합과 기존 코멘트 집합의 차이를
//! 생성/수정/삭제 액션으로 계산한다.
//!
//! 텍스트 파싱은 전부 identity 코덱에 위임하고, 이 모듈은 key 기준
//! 집합 연산만 수행한다. 출력 세 집합은 구성상 서로 겹치지 않는다.

use std::collections::HashMap;

use crate::domain::identity::extract_issue_key;
use crate::domain::review::{
    CommentUpdate, DesiredComment, ExistingComment, ReconciliationPlan,
};

/// 원하는 집합(desired)과 기존 집합(existing)을 key로 비교한다.
///
/// 규칙:
/// - desired key가 중복되면 뒤의 항목이 조용히 이긴다.
/// - key를 복원할 수 없는 기존 코멘트는 매칭/삭제 어느 쪽에도
///   넣지 않고 건너뛴다(skipped로 집계).
/// - 같은 key의 기존 코멘트가 여럿이면 순회 순서상 마지막이 매칭을
///   가져가고, 밀려난 앞의 중복은 고아로 삭제 대상이 된다.
pub fn reconcile(desired: &[DesiredComment], existing: &[ExistingComment]) -> ReconciliationPlan {
    let mut plan = ReconciliationPlan::default();

    // 뒤 항목이 앞 항목을 덮어쓴다.
    let mut desired_by_key: HashMap<&str, usize> = HashMap::new();
    for (idx, comment) in desired.iter().enumerate() {
        desired_by_key.insert(comment.key.as_str(), idx);
    }

    // 1차: key별 매칭 승자를 정하고, 밀려난 중복을 먼저 삭제 대상에 넣는다.
    let mut winner_by_key: HashMap<String, &ExistingComment> = HashMap::new();
    for comment in existing {
        let Some(key) = extract_issue_key(&comment.body) else {
            plan.skipped += 1;
            continue;
        };
        if let Some(displaced) = winner_by_key.insert(key, comment) {
            plan.to_delete.push(displaced.id.clone());
        }
    }

    // 2차: 승자만 desired와 비교한다. 순회는 기존 목록 순서를 따라
    // 결정적으로 이루어진다.
    for comment in existing {
        let Some(key) = extract_issue_key(&comment.body) else {
            continue;
        };
        let winner = winner_by_key
            .get(key.as_str())
            .is_some_and(|w| w.id == comment.id);
        if !winner {
            continue;
        }

        match desired_by_key.get(key.as_str()) {
            None => plan.to_delete.push(comment.id.clone()),
            Some(&idx) => {
                let wanted = &desired[idx];
                if wanted.body != comment.body {
                    plan.to_update.push(CommentUpdate {
                        comment_id: comment.id.clone(),
                        comment: wanted.clone(),
                    });
                } else {
                    plan.stable += 1;
                }
            }
        }
    }

    // 3차: 기존에 없는 desired는 생성한다. 중복 key는 승자 항목만.
    for (idx, comment) in desired.iter().enumerate() {
        if desired_by_key.get(comment.key.as_str()) != Some(&idx) {
            continue;
        }
        if !winner_by_key.contains_key(comment.key.as_str()) {
            plan.to_create.push(comment.clone());
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::issue_link;
    use crate::domain::review::ReportContext;

    fn ctx() -> ReportContext {
        ReportContext {
            analysis_host: "https://sonar.example.com".to_string(),
            project_key: "demo".to_string(),
            pull_number: 7,
            branch_plugin: true,
        }
    }

    fn body(key: &str, suffix: &str) -> String {
        format!("#### [:link:]({})finding {suffix}", issue_link(&ctx(), key))
    }

    fn desired(key: &str, suffix: &str) -> DesiredComment {
        DesiredComment {
            key: key.to_string(),
            body: body(key, suffix),
            path: "src/lib.rs".to_string(),
            line: 10,
        }
    }

    fn existing(id: &str, key: &str, suffix: &str) -> ExistingComment {
        ExistingComment {
            id: id.to_string(),
            body: body(key, suffix),
            path: "src/lib.rs".to_string(),
            line: Some(10),
        }
    }

    #[test]
    fn functional_fresh_run_creates_every_desired_comment() {
        // 시나리오 A: 이전 리뷰 없음
        let plan = reconcile(&[desired("k1", "a"), desired("k2", "b")], &[]);
        let keys: Vec<&str> = plan.to_create.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["k1", "k2"]);
        assert!(plan.to_update.is_empty());
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn functional_stable_run_produces_empty_plan() {
        // 시나리오 B: 양쪽 집합이 동일
        let plan = reconcile(
            &[desired("k1", "a"), desired("k2", "b")],
            &[existing("101", "k1", "a"), existing("102", "k2", "b")],
        );
        assert!(plan.is_noop());
        assert_eq!(plan.stable, 2);
    }

    #[test]
    fn functional_resolved_issue_deletes_stale_comment() {
        // 시나리오 C: k2가 해결됨
        let plan = reconcile(
            &[desired("k1", "a")],
            &[existing("101", "k1", "a"), existing("102", "k2", "b")],
        );
        assert!(plan.to_create.is_empty());
        assert!(plan.to_update.is_empty());
        assert_eq!(plan.to_delete, vec!["102".to_string()]);
    }

    #[test]
    fn functional_body_drift_schedules_update() {
        // 시나리오 D: 본문만 달라짐(예: assignee 변경)
        let plan = reconcile(&[desired("k1", "new")], &[existing("101", "k1", "old")]);
        assert!(plan.to_create.is_empty());
        assert!(plan.to_delete.is_empty());
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].comment_id, "101");
        assert_eq!(plan.to_update[0].comment.body, body("k1", "new"));
    }

    #[test]
    fn unit_unparseable_existing_comment_is_never_deleted() {
        let manual = ExistingComment {
            id: "900".to_string(),
            body: "reviewer wrote this by hand".to_string(),
            path: "src/lib.rs".to_string(),
            line: Some(3),
        };
        let plan = reconcile(&[desired("k1", "a")], &[manual]);
        assert!(plan.to_delete.is_empty());
        assert!(plan.to_update.is_empty());
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.to_create.len(), 1);
    }

    #[test]
    fn regression_duplicate_existing_keys_last_wins_and_orphans_are_deleted() {
        let plan = reconcile(
            &[desired("k1", "new")],
            &[existing("101", "k1", "old"), existing("102", "k1", "old")],
        );
        // 102가 매칭을 가져가고 101은 고아로 삭제된다.
        assert_eq!(plan.to_delete, vec!["101".to_string()]);
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].comment_id, "102");
    }

    #[test]
    fn regression_duplicate_desired_keys_later_occurrence_wins() {
        let plan = reconcile(&[desired("k1", "first"), desired("k1", "second")], &[]);
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_create[0].body, body("k1", "second"));
    }

    #[test]
    fn integration_partition_is_complete_and_disjoint() {
        let desired_set = vec![desired("k1", "a"), desired("k2", "b2"), desired("k3", "c")];
        let existing_set = vec![
            existing("101", "k1", "a"),  // stable
            existing("102", "k2", "b1"), // update
            existing("103", "k4", "d"),  // delete
        ];
        let plan = reconcile(&desired_set, &existing_set);

        let created: Vec<&str> = plan.to_create.iter().map(|c| c.key.as_str()).collect();
        let updated: Vec<&str> = plan
            .to_update
            .iter()
            .map(|u| u.comment.key.as_str())
            .collect();
        assert_eq!(created, vec!["k3"]);
        assert_eq!(updated, vec!["k2"]);
        assert_eq!(plan.to_delete, vec!["103".to_string()]);
        assert_eq!(plan.stable, 1);

        // desired key는 create/update/stable 중 정확히 하나에,
        // 기존 id는 delete/update/stable 중 정확히 하나에 속한다.
        assert_eq!(
            plan.to_create.len() + plan.to_update.len() + plan.stable,
            desired_set.len()
        );
        assert_eq!(
            plan.to_delete.len() + plan.to_update.len() + plan.stable,
            existing_set.len()
        );
    }

    #[test]
    fn integration_reconcile_is_idempotent_after_apply() {
        let desired_set = vec![desired("k1", "a"), desired("k2", "b")];
        let existing_set = vec![existing("101", "k1", "old"), existing("103", "k9", "z")];

        let first = reconcile(&desired_set, &existing_set);

        // 첫 계획을 적용한 뒤의 기존 집합을 재구성한다.
        let mut after: Vec<ExistingComment> = existing_set
            .into_iter()
            .filter(|c| !first.to_delete.contains(&c.id))
            .map(|mut c| {
                if let Some(update) = first.to_update.iter().find(|u| u.comment_id == c.id) {
                    c.body = update.comment.body.clone();
                }
                c
            })
            .collect();
        for (i, created) in first.to_create.iter().enumerate() {
            after.push(ExistingComment {
                id: format!("new-{i}"),
                body: created.body.clone(),
                path: created.path.clone(),
                line: Some(created.line),
            });
        }

        let second = reconcile(&desired_set, &after);
        assert!(second.is_noop());
        assert_eq!(second.stable, desired_set.len());
    }
}
