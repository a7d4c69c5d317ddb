use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create shopping_lists table
        manager
            .create_table(
                Table::create()
                    .table(ShoppingLists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ShoppingLists::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(ShoppingLists::Name).string().not_null())
                    .col(ColumnDef::new(ShoppingLists::OwnerId).string().not_null())
                    .col(ColumnDef::new(ShoppingLists::IsArchived).boolean().not_null().default(false))
                    .col(ColumnDef::new(ShoppingLists::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ShoppingLists::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shopping_lists_owner_id")
                    .table(ShoppingLists::Table)
                    .col(ShoppingLists::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Create list_members table (membership references)
        manager
            .create_table(
                Table::create()
                    .table(ListMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ListMembers::ListId).string().not_null())
                    .col(ColumnDef::new(ListMembers::UserId).string().not_null())
                    .col(ColumnDef::new(ListMembers::AddedAt).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ListMembers::ListId)
                            .col(ListMembers::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_list_members_user_id")
                    .table(ListMembers::Table)
                    .col(ListMembers::UserId)
                    .to_owned(),
            )
            .await?;

        // Create items table
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::ListId).string().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::AddedBy).string().not_null())
                    .col(ColumnDef::new(Items::SolvedBy).string().null())
                    .col(ColumnDef::new(Items::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Items::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_list_id")
                    .table(Items::Table)
                    .col(Items::ListId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ListMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShoppingLists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum ShoppingLists {
    Table,
    Id,
    Name,
    OwnerId,
    IsArchived,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ListMembers {
    Table,
    ListId,
    UserId,
    AddedAt,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    ListId,
    Name,
    AddedBy,
    SolvedBy,
    CreatedAt,
    UpdatedAt,
}
