// src/engine.rs

use sqlx::SqliteConnection;

use crate::models::question::Question;

/// Discrimination score for a question given its answer counts.
///
/// 0.5 means the answers split perfectly evenly (maximally useful for
/// telling respondents apart), 0 means everyone agreed (useless).
/// A question nobody has answered yet scores 0.5 so it still gets asked.
pub fn compute_ratio(count_a: i64, count_b: i64) -> f64 {
    let total = count_a + count_b;
    if total == 0 {
        return 0.5;
    }
    count_a.min(count_b) as f64 / total as f64
}

/// Recounts the answers for a question and persists the new ratio.
///
/// Must run inside the same transaction as the answer write that triggered
/// it, otherwise a concurrent answer to the same question can leave the
/// cached ratio computed from stale counts.
pub async fn refresh_ratio(
    conn: &mut SqliteConnection,
    question_id: i64,
) -> Result<f64, sqlx::Error> {
    let count_a: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM answers WHERE question_id = ? AND answer_value = 'A'",
    )
    .bind(question_id)
    .fetch_one(&mut *conn)
    .await?;

    let count_b: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM answers WHERE question_id = ? AND answer_value = 'B'",
    )
    .bind(question_id)
    .fetch_one(&mut *conn)
    .await?;

    let ratio = compute_ratio(count_a, count_b);

    sqlx::query("UPDATE questions SET ratio = ? WHERE id = ?")
        .bind(ratio)
        .bind(question_id)
        .execute(&mut *conn)
        .await?;

    tracing::debug!("Updated question {} ratio to {}", question_id, ratio);

    Ok(ratio)
}

/// Picks the best next question from a candidate list.
///
/// Candidates must already exclude questions the session has answered or
/// skipped, and arrive in creation order (oldest first). If any candidate
/// has been scored, the list is stable-sorted by closeness to an even
/// split, with unscored questions pushed behind every scored one; ties
/// keep their incoming order. If nothing has been scored yet the incoming
/// creation order stands as-is.
pub fn pick_next(mut candidates: Vec<Question>) -> Option<Question> {
    if candidates.iter().any(|q| q.ratio.is_some()) {
        candidates.sort_by(|a, b| match (a.ratio, b.ratio) {
            (Some(ra), Some(rb)) => (ra - 0.5).abs().total_cmp(&(rb - 0.5).abs()),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, ratio: Option<f64>) -> Question {
        Question {
            id,
            session_id: "s".to_string(),
            text: format!("q{}", id),
            option_a: "A".to_string(),
            option_b: "B".to_string(),
            ratio,
            created_at: None,
        }
    }

    #[test]
    fn unanswered_question_scores_half() {
        assert_eq!(compute_ratio(0, 0), 0.5);
    }

    #[test]
    fn ratio_is_minority_share() {
        assert_eq!(compute_ratio(3, 1), 0.25);
        assert_eq!(compute_ratio(1, 3), 0.25);
        assert_eq!(compute_ratio(2, 2), 0.5);
        assert_eq!(compute_ratio(5, 0), 0.0);
    }

    #[test]
    fn ratio_stays_in_bounds() {
        for a in 0..20 {
            for b in 0..20 {
                let r = compute_ratio(a, b);
                assert!((0.0..=0.5).contains(&r), "ratio {} out of bounds", r);
            }
        }
    }

    #[test]
    fn picks_closest_to_even_split() {
        let picked = pick_next(vec![
            question(1, Some(0.25)),
            question(2, Some(0.5)),
            question(3, Some(0.4)),
        ]);
        assert_eq!(picked.unwrap().id, 2);
    }

    #[test]
    fn unscored_questions_rank_behind_scored_ones() {
        let picked = pick_next(vec![question(1, None), question(2, Some(0.1))]);
        assert_eq!(picked.unwrap().id, 2);
    }

    #[test]
    fn all_unscored_keeps_creation_order() {
        let picked = pick_next(vec![question(7, None), question(8, None)]);
        assert_eq!(picked.unwrap().id, 7);
    }

    #[test]
    fn ties_keep_incoming_order() {
        // Both 0.2 away from even; the older candidate wins.
        let picked = pick_next(vec![question(4, Some(0.3)), question(5, Some(0.3))]);
        assert_eq!(picked.unwrap().id, 4);
    }

    #[test]
    fn empty_candidate_set_yields_none() {
        assert!(pick_next(Vec::new()).is_none());
    }
}
