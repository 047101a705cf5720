use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyFavorites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PropertyFavorites::UserId).uuid().not_null())
                    .col(ColumnDef::new(PropertyFavorites::PropertyId).uuid().not_null())
                    .col(
                        ColumnDef::new(PropertyFavorites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(PropertyFavorites::UserId)
                            .col(PropertyFavorites::PropertyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PropertyFavorites::Table, PropertyFavorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PropertyFavorites::Table, PropertyFavorites::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_favorites_property_id")
                    .table(PropertyFavorites::Table)
                    .col(PropertyFavorites::PropertyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyFavorites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PropertyFavorites {
    Table,
    UserId,
    PropertyId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
}
