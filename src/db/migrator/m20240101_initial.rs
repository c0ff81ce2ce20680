// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::models::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first
        create(manager, &schema, SportTypes).await?;
        create(manager, &schema, Users).await?;
        create(manager, &schema, Activities).await?;
        create(manager, &schema, Clubs).await?;
        create(manager, &schema, Challenges).await?;
        create(manager, &schema, Leadership).await?;
        create(manager, &schema, Comments).await?;
        create(manager, &schema, Shares).await?;

        create(manager, &schema, UserActivity).await?;
        create(manager, &schema, UserChallenge).await?;
        create(manager, &schema, UserClub).await?;
        create(manager, &schema, ChallengeActivity).await?;
        create(manager, &schema, ActivityComment).await?;
        create(manager, &schema, ChallengeComment).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse dependency order
        let tables = [
            "challenge_comment",
            "activity_comment",
            "challenge_activity",
            "user_club",
            "user_challenge",
            "user_activity",
            "shares",
            "comments",
            "leadership",
            "challenges",
            "clubs",
            "activities",
            "users",
            "sport_types",
        ];

        for table in tables {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
