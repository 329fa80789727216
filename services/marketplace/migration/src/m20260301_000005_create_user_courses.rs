use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCourses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserCourses::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserCourses::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserCourses::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserCourses::UserId)
                            .col(UserCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserCourses::Table, UserCourses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserCourses::Table, UserCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(UserCourses::Table)
                    .col(UserCourses::CourseId)
                    .name("idx_user_courses_course_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCourses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserCourses {
    Table,
    UserId,
    CourseId,
    EnrolledAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
