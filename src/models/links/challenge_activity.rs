// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activities counted towards a challenge.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "challenge_activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub challenge_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::challenge::Entity",
        from = "Column::ChallengeId",
        to = "crate::models::challenge::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Challenge,
    #[sea_orm(
        belongs_to = "crate::models::activity::Entity",
        from = "Column::ActivityId",
        to = "crate::models::activity::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Activity,
}

impl ActiveModelBehavior for ActiveModel {}
