use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010001_create_feedback"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("feedback"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("presentation_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("slide_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("slide_index")).integer().null())
                    .col(ColumnDef::new(Alias::new("feedback_text")).text().not_null())
                    .col(ColumnDef::new(Alias::new("reviewer_name")).string().null())
                    .col(ColumnDef::new(Alias::new("reviewer_email")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("feedback_type"))
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(Alias::new("metadata")).json_binary().null())
                    // multi-form correlation
                    .col(
                        ColumnDef::new(Alias::new("form_id"))
                            .string()
                            .not_null()
                            .default("default"),
                    )
                    .col(ColumnDef::new(Alias::new("session_id")).string().null())
                    .col(ColumnDef::new(Alias::new("question_hash")).string().null())
                    .col(ColumnDef::new(Alias::new("form_context")).json_binary().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("feedback")).to_owned())
            .await
    }
}
