use chrono::{DateTime, Utc};

pub const PAYMENT_APPROVED: &str = "approved";

/// Purchase plan of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    /// One course, identified by `course_id`
    Single,
    /// Time-boxed access to every course until `end_date`
    Quarterly,
    Kit,
    Premium,
}

impl std::str::FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(PlanType::Single),
            "quarterly" => Ok(PlanType::Quarterly),
            "kit" => Ok(PlanType::Kit),
            "premium" => Ok(PlanType::Premium),
            _ => Err(format!("Invalid plan type: {s}")),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanType::Single => "single",
            PlanType::Quarterly => "quarterly",
            PlanType::Kit => "kit",
            PlanType::Premium => "premium",
        };
        f.write_str(s)
    }
}

/// Order as consumed by the entitlement resolver (owned by billing)
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub course_id: Option<i64>,
    pub plan_type: PlanType,
    pub payment_status: String,
    pub is_active: bool,
    pub end_date: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_approved_and_active(&self) -> bool {
        self.is_active && self.payment_status == PAYMENT_APPROVED
    }

    /// An order without an end date never lapses
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end < now)
    }
}
