//! Course entitlements of a student, derived from their orders

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::orders::entities::{Order, PlanType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseAccess {
    /// Every course (an active quarterly plan)
    All,
    /// Only these courses; may be empty
    Courses(HashSet<i64>),
}

impl CourseAccess {
    pub fn is_empty(&self) -> bool {
        matches!(self, CourseAccess::Courses(ids) if ids.is_empty())
    }

    /// Course filter for the approved listing; `None` means unrestricted
    pub fn course_filter(&self) -> Option<Vec<i64>> {
        match self {
            CourseAccess::All => None,
            CourseAccess::Courses(ids) => {
                let mut ids: Vec<i64> = ids.iter().copied().collect();
                ids.sort_unstable();
                Some(ids)
            }
        }
    }
}

/// Resolves access from approved, active orders.
///
/// Single plans grant their course, any quarterly plan grants every course;
/// kit and premium plans grant nothing here. With `enforce_expiry` a quarterly
/// plan whose end date has passed is ignored.
pub fn resolve_course_access(
    orders: &[Order],
    now: DateTime<Utc>,
    enforce_expiry: bool,
) -> CourseAccess {
    let mut courses = HashSet::new();

    for order in orders.iter().filter(|o| o.is_approved_and_active()) {
        match order.plan_type {
            PlanType::Quarterly => {
                if enforce_expiry && order.is_expired_at(now) {
                    debug!(
                        "Skipping expired quarterly order {} of user {}",
                        order.id, order.user_id
                    );
                    continue;
                }
                return CourseAccess::All;
            }
            PlanType::Single => {
                if let Some(course_id) = order.course_id {
                    courses.insert(course_id);
                }
            }
            PlanType::Kit | PlanType::Premium => {}
        }
    }

    CourseAccess::Courses(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orders::entities::PAYMENT_APPROVED;
    use chrono::Duration;

    fn order(id: i64, plan_type: PlanType, course_id: Option<i64>) -> Order {
        Order {
            id,
            user_id: 1,
            course_id,
            plan_type,
            payment_status: PAYMENT_APPROVED.to_string(),
            is_active: true,
            end_date: None,
        }
    }

    #[test]
    fn test_single_orders_collect_courses() {
        let orders = vec![
            order(1, PlanType::Single, Some(10)),
            order(2, PlanType::Single, Some(11)),
            order(3, PlanType::Single, None),
            order(4, PlanType::Kit, Some(12)),
        ];
        let access = resolve_course_access(&orders, Utc::now(), true);
        assert_eq!(access, CourseAccess::Courses(HashSet::from([10, 11])));
        assert_eq!(access.course_filter(), Some(vec![10, 11]));
    }

    #[test]
    fn test_quarterly_grants_all() {
        let mut quarterly = order(1, PlanType::Quarterly, None);
        quarterly.end_date = Some(Utc::now() + Duration::days(30));
        let orders = vec![order(2, PlanType::Single, Some(10)), quarterly];
        let access = resolve_course_access(&orders, Utc::now(), true);
        assert_eq!(access, CourseAccess::All);
        assert_eq!(access.course_filter(), None);
    }

    #[test]
    fn test_expired_quarterly_is_ignored_when_enforced() {
        let mut quarterly = order(1, PlanType::Quarterly, None);
        quarterly.end_date = Some(Utc::now() - Duration::days(1));
        let orders = vec![quarterly, order(2, PlanType::Single, Some(10))];

        let strict = resolve_course_access(&orders, Utc::now(), true);
        assert_eq!(strict, CourseAccess::Courses(HashSet::from([10])));

        let lenient = resolve_course_access(&orders, Utc::now(), false);
        assert_eq!(lenient, CourseAccess::All);
    }

    #[test]
    fn test_no_orders_is_empty_not_error() {
        let access = resolve_course_access(&[], Utc::now(), true);
        assert!(access.is_empty());

        let mut inactive = order(1, PlanType::Quarterly, None);
        inactive.is_active = false;
        let mut unpaid = order(2, PlanType::Single, Some(4));
        unpaid.payment_status = "pending".into();
        assert!(resolve_course_access(&[inactive, unpaid], Utc::now(), true).is_empty());
    }
}
