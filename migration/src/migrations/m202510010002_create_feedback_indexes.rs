use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010002_create_feedback_indexes"
    }
}

const INDEXES: [(&str, &[&str]); 3] = [
    ("idx_feedback_presentation_slide", &["presentation_id", "slide_id"]),
    ("idx_feedback_form_session", &["form_id", "session_id"]),
    ("idx_feedback_created_at", &["created_at"]),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, columns) in INDEXES {
            let mut index = Index::create();
            index.name(name).table(Alias::new("feedback")).if_not_exists();
            for column in columns {
                index.col(Alias::new(*column));
            }
            manager.create_index(index.to_owned()).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Alias::new("feedback"))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
