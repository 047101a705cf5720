use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationDocuments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VerificationDocuments::UserId).uuid().not_null())
                    .col(ColumnDef::new(VerificationDocuments::Kind).string().not_null())
                    .col(ColumnDef::new(VerificationDocuments::Url).string().not_null())
                    .col(ColumnDef::new(VerificationDocuments::PublicId).string().null())
                    .col(
                        ColumnDef::new(VerificationDocuments::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(VerificationDocuments::Remarks).string().null())
                    .col(
                        ColumnDef::new(VerificationDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VerificationDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VerificationDocuments::Table, VerificationDocuments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_verification_documents_user_id")
                    .table(VerificationDocuments::Table)
                    .col(VerificationDocuments::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationDocuments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VerificationDocuments {
    Table,
    Id,
    UserId,
    Kind,
    Url,
    PublicId,
    Status,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
