//! SeaORM storage
//!
//! Single storage implementation over SQLite, PostgreSQL and MySQL.

#[cfg(test)]
pub(crate) mod fixtures;
mod live_classes;
mod orders;
mod users;

use crate::config::AppConfig;
use crate::errors::{LearnGrowError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// Connects using `database.*` config and runs pending migrations
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// Private in-memory SQLite database with migrations applied
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        // one connection: every sqlite memory connection is its own database
        let db = Self::connect_sqlite("sqlite::memory:", 1, 5).await?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| LearnGrowError::database_operation(format!("Migration failed: {e}")))
    }

    /// SQLite connection (WAL + pragma tuning)
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LearnGrowError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !url.contains(":memory:") {
            opt = opt.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| {
                LearnGrowError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL / MySQL connection
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            LearnGrowError::database_connection(format!("Cannot connect to database: {e}"))
        })
    }

    /// Infers the backend from the URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LearnGrowError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }
}

// Storage trait implementation
use crate::models::{
    live_classes::{
        entities::LiveClass,
        requests::{CreateLiveClassRequest, LiveClassListQuery, UpdateLiveClassRequest},
        responses::{LiveClassListResponse, LiveClassWindow},
    },
    orders::entities::Order,
    users::entities::User,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_active_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>> {
        self.list_active_orders_for_user_impl(user_id).await
    }

    async fn create_live_class(
        &self,
        instructor_id: i64,
        req: CreateLiveClassRequest,
    ) -> Result<LiveClass> {
        self.create_live_class_impl(instructor_id, req).await
    }

    async fn get_live_class_by_id(&self, id: i64) -> Result<Option<LiveClass>> {
        self.get_live_class_by_id_impl(id).await
    }

    async fn list_live_classes_by_instructor(
        &self,
        instructor_id: i64,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        self.list_live_classes_by_instructor_impl(instructor_id, query)
            .await
    }

    async fn list_live_classes_by_course(
        &self,
        course_id: i64,
        approved_only: bool,
    ) -> Result<Vec<LiveClass>> {
        self.list_live_classes_by_course_impl(course_id, approved_only)
            .await
    }

    async fn list_upcoming_live_classes(&self, limit: i64) -> Result<Vec<LiveClass>> {
        self.list_upcoming_live_classes_impl(limit).await
    }

    async fn list_approved_live_classes(
        &self,
        skip: i64,
        limit: i64,
        course_ids: Option<Vec<i64>>,
    ) -> Result<LiveClassWindow> {
        self.list_approved_live_classes_impl(skip, limit, course_ids)
            .await
    }

    async fn list_pending_live_classes(
        &self,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        self.list_pending_live_classes_impl(query).await
    }

    async fn update_live_class(
        &self,
        id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>> {
        self.update_live_class_impl(id, update).await
    }

    async fn set_live_class_approval(&self, id: i64, approved: bool) -> Result<Option<LiveClass>> {
        self.set_live_class_approval_impl(id, approved).await
    }

    async fn set_live_class_recorded_link(
        &self,
        id: i64,
        recorded_link: String,
    ) -> Result<Option<LiveClass>> {
        self.set_live_class_recorded_link_impl(id, recorded_link)
            .await
    }

    async fn delete_live_class(&self, id: i64) -> Result<Option<LiveClass>> {
        self.delete_live_class_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("learngrow.db").unwrap(),
            "sqlite://learngrow.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/lg").unwrap(),
            "postgres://u:p@localhost/lg"
        );
        assert!(SeaOrmStorage::build_database_url("mongodb://localhost").is_err());
    }
}
