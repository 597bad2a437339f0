//! Seed helpers for tables owned by other services

use super::SeaOrmStorage;
use crate::entity::{courses, orders, users};
use sea_orm::{ActiveModelTrait, Set};

pub(crate) async fn seed_user(storage: &SeaOrmStorage, name: &str, email: &str, role: &str) -> i64 {
    seed_user_with_status(storage, name, email, role, "active").await
}

pub(crate) async fn seed_user_with_status(
    storage: &SeaOrmStorage,
    name: &str,
    email: &str,
    role: &str,
    status: &str,
) -> i64 {
    let now = chrono::Utc::now().timestamp();
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role.to_string()),
        status: Set(status.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("seed user")
    .id
}

pub(crate) async fn seed_course(storage: &SeaOrmStorage, title: &str) -> i64 {
    let now = chrono::Utc::now().timestamp();
    courses::ActiveModel {
        title: Set(title.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("seed course")
    .id
}

pub(crate) async fn seed_order(
    storage: &SeaOrmStorage,
    user_id: i64,
    course_id: Option<i64>,
    plan_type: &str,
    payment_status: &str,
    is_active: bool,
    end_date: Option<i64>,
) -> i64 {
    orders::ActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        plan_type: Set(plan_type.to_string()),
        payment_status: Set(payment_status.to_string()),
        is_active: Set(is_active),
        end_date: Set(end_date),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("seed order")
    .id
}
