use super::SeaOrmStorage;
use crate::entity::orders::{Column, Entity as Orders};
use crate::errors::{LearnGrowError, Result};
use crate::models::orders::entities::{Order, PAYMENT_APPROVED};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::warn;

impl SeaOrmStorage {
    /// Approved and active orders; rows with unknown plan types are skipped
    pub async fn list_active_orders_for_user_impl(&self, user_id: i64) -> Result<Vec<Order>> {
        let rows = Orders::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PaymentStatus.eq(PAYMENT_APPROVED))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                LearnGrowError::database_operation(format!("Failed to query orders: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let (id, plan) = (m.id, m.plan_type.clone());
                let order = m.into_order();
                if order.is_none() {
                    warn!("Order {} has unknown plan type '{}', ignored", id, plan);
                }
                order
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::models::orders::entities::PlanType;

    #[tokio::test]
    async fn test_only_approved_active_orders() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = fixtures::seed_user(&storage, "Sam", "sam@example.com", "student").await;
        let course = fixtures::seed_course(&storage, "Algebra").await;

        fixtures::seed_order(&storage, user, Some(course), "single", "approved", true, None).await;
        fixtures::seed_order(&storage, user, Some(course), "single", "pending", true, None).await;
        fixtures::seed_order(&storage, user, None, "quarterly", "approved", false, None).await;
        fixtures::seed_order(&storage, user, None, "lifetime", "approved", true, None).await;

        let orders = storage.list_active_orders_for_user_impl(user).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].plan_type, PlanType::Single);
        assert_eq!(orders[0].course_id, Some(course));
    }
}
