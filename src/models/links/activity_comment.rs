// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::activity::Entity",
        from = "Column::ActivityId",
        to = "crate::models::activity::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Activity,
    #[sea_orm(
        belongs_to = "crate::models::comment::Entity",
        from = "Column::CommentId",
        to = "crate::models::comment::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Comment,
}

impl ActiveModelBehavior for ActiveModel {}
