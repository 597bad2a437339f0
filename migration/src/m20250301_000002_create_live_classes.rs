use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // course_id / instructor_id deliberately carry no foreign keys:
        // dangling references are tolerated and surface as null joins.
        manager
            .create_table(
                Table::create()
                    .table(LiveClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LiveClasses::Title).string().not_null())
                    .col(ColumnDef::new(LiveClasses::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(LiveClasses::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::ScheduledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LiveClasses::Duration).integer().not_null())
                    .col(ColumnDef::new(LiveClasses::Platform).string().not_null())
                    .col(ColumnDef::new(LiveClasses::MeetingLink).text().not_null())
                    .col(ColumnDef::new(LiveClasses::RecordedLink).text().null())
                    .col(
                        ColumnDef::new(LiveClasses::Status)
                            .string()
                            .not_null()
                            .default("Scheduled"),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_classes_instructor_id")
                    .table(LiveClasses::Table)
                    .col(LiveClasses::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_classes_course_id")
                    .table(LiveClasses::Table)
                    .col(LiveClasses::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_classes_scheduled_at")
                    .table(LiveClasses::Table)
                    .col(LiveClasses::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_classes_is_approved")
                    .table(LiveClasses::Table)
                    .col(LiveClasses::IsApproved)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LiveClasses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LiveClasses {
    #[sea_orm(iden = "live_classes")]
    Table,
    Id,
    Title,
    CourseId,
    InstructorId,
    ScheduledAt,
    Duration,
    Platform,
    MeetingLink,
    RecordedLink,
    Status,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}
