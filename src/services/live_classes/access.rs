//! Ownership guard shared by every mutating live class operation

use crate::models::{auth::entities::RequestContext, live_classes::entities::LiveClass};

/// A resource with a single owning user
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for LiveClass {
    fn owner_id(&self) -> i64 {
        self.instructor_id
    }
}

/// Owner, admin or manager
pub fn can_mutate<R: Owned + ?Sized>(resource: &R, requester: &RequestContext) -> bool {
    resource.owner_id() == requester.user_id || requester.is_moderator()
}

/// Unapproved classes are only visible to the owner and moderators
pub fn can_view(live_class: &LiveClass, requester: Option<&RequestContext>) -> bool {
    live_class.is_approved || requester.is_some_and(|ctx| can_mutate(live_class, ctx))
}
