//! Review eligibility
//!
//! A card is reviewable when it is not completed and either has never been
//! passed or its level's interval has fully elapsed since the last pass.
//! The boundary is inclusive: at exactly `pass_time + interval` the card is
//! due. `remaining_days` uses the same boundary.
//!
//! An interval that would push the due date past the representable range
//! leaves the card waiting indefinitely.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Card, Level};

const SECONDS_PER_DAY: i64 = 86_400;

/// Length of a level's review interval
pub fn interval(level: &Level) -> Duration {
    Duration::days(i64::from(level.days_to_recommend))
}

/// Whether `card` may be reviewed at `now` given the interval of `level`
pub fn is_reviewable(card: &Card, level: &Level, now: DateTime<Utc>) -> bool {
    if card.completed {
        return false;
    }

    match card.pass_time {
        None => true,
        Some(passed) => match passed.checked_add_signed(interval(level)) {
            Some(due) => now >= due,
            None => false,
        },
    }
}

/// When the card next becomes reviewable
///
/// `None` for cards that were never passed (always due), for completed
/// cards (never due again) and when the due date is out of range.
pub fn next_review_at(card: &Card, level: &Level) -> Option<DateTime<Utc>> {
    if card.completed {
        return None;
    }
    card.pass_time
        .and_then(|passed| passed.checked_add_signed(interval(level)))
}

/// Whole days until the card becomes reviewable, rounded up
///
/// Zero exactly when `is_reviewable` holds, and for completed cards.
pub fn remaining_days(card: &Card, level: &Level, now: DateTime<Utc>) -> i64 {
    if card.completed || is_reviewable(card, level, now) {
        return 0;
    }

    match card.pass_time {
        Some(passed) => {
            let elapsed = (now - passed).num_seconds();
            let seconds = i64::from(level.days_to_recommend) * SECONDS_PER_DAY - elapsed;
            let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
            days.max(1)
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoxId, LevelNumber};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn level(number: u8, days: u32) -> Level {
        let mut level = Level::new(LevelNumber::new(number).unwrap());
        level.days_to_recommend = days;
        level
    }

    fn card_at(number: u8) -> Card {
        Card::new(BoxId::FIRST, "question").at_level(LevelNumber::new(number).unwrap())
    }

    #[test]
    fn test_never_passed_is_always_reviewable() {
        let card = card_at(4);
        let lvl = level(4, 8);
        assert!(is_reviewable(&card, &lvl, now()));
        assert!(is_reviewable(&card, &lvl, now() - Duration::days(10_000)));
        assert!(is_reviewable(&card, &lvl, now() + Duration::days(10_000)));
        assert_eq!(remaining_days(&card, &lvl, now()), 0);
        assert!(next_review_at(&card, &lvl).is_none());
    }

    #[test]
    fn test_completed_is_never_reviewable() {
        let mut card = card_at(13);
        card.completed = true;
        let lvl = level(13, 26);
        assert!(!is_reviewable(&card, &lvl, now()));

        card.pass_time = Some(now() - Duration::days(365));
        assert!(!is_reviewable(&card, &lvl, now()));
        assert_eq!(remaining_days(&card, &lvl, now()), 0);
        assert!(next_review_at(&card, &lvl).is_none());
    }

    #[test]
    fn test_interval_not_elapsed() {
        // Level 5 with a 10 day interval, passed 9 days ago
        let mut card = card_at(5);
        card.pass_time = Some(now() - Duration::days(9));
        let lvl = level(5, 10);

        assert!(!is_reviewable(&card, &lvl, now()));
        assert_eq!(remaining_days(&card, &lvl, now()), 1);

        let later = now() + Duration::days(2);
        assert!(is_reviewable(&card, &lvl, later));
        assert_eq!(remaining_days(&card, &lvl, later), 0);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut card = card_at(2);
        card.pass_time = Some(now() - Duration::days(4));
        let lvl = level(2, 4);

        assert!(is_reviewable(&card, &lvl, now()));
        assert!(!is_reviewable(&card, &lvl, now() - Duration::seconds(1)));
        assert_eq!(remaining_days(&card, &lvl, now() - Duration::seconds(1)), 1);
        assert_eq!(next_review_at(&card, &lvl), Some(now()));
    }

    #[test]
    fn test_remaining_days_rounds_up() {
        let mut card = card_at(3);
        card.pass_time = Some(now());
        let lvl = level(3, 6);

        assert_eq!(remaining_days(&card, &lvl, now()), 6);
        assert_eq!(remaining_days(&card, &lvl, now() + Duration::hours(1)), 6);
        assert_eq!(remaining_days(&card, &lvl, now() + Duration::days(1)), 5);
        assert_eq!(
            remaining_days(&card, &lvl, now() + Duration::days(5) + Duration::hours(23)),
            1
        );
    }

    #[test]
    fn test_huge_interval_never_due() {
        let mut card = card_at(2);
        card.pass_time = Some(now());
        let mut lvl = level(2, 4);
        lvl.set_days_to_recommend(u32::MAX).unwrap();

        assert!(!is_reviewable(&card, &lvl, now()));
        assert!(!is_reviewable(&card, &lvl, now() + Duration::days(365 * 1000)));
        assert!(next_review_at(&card, &lvl).is_none());
        assert_eq!(remaining_days(&card, &lvl, now()), i64::from(u32::MAX));
    }

    #[test]
    fn test_remaining_days_agrees_with_reviewable() {
        let mut card = card_at(6);
        card.pass_time = Some(now());
        let lvl = level(6, 12);

        for hours in (0..=24 * 14).step_by(7) {
            let at = now() + Duration::hours(hours);
            assert_eq!(
                remaining_days(&card, &lvl, at) == 0,
                is_reviewable(&card, &lvl, at),
                "disagreement at +{}h",
                hours
            );
        }
    }
}
