// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stored Strava activity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Strava activity ID, when the upstream record carried one
    #[sea_orm(unique)]
    pub strava_id: Option<i64>,
    pub name: Option<String>,
    /// Distance in meters
    pub dist: f64,
    /// Moving time in seconds
    pub moving_time: i32,
    pub elapsed_time: Option<i32>,
    pub total_elevation_gain: Option<f64>,
    pub elevation_high: Option<f64>,
    pub elevation_low: Option<f64>,
    pub sport_type_id: Option<i32>,
    /// Start time (UTC)
    pub start_date: DateTime,
    pub start_date_local: Option<DateTime>,
    pub timezone: Option<String>,
    /// "lat,lng"
    pub start_latlng: Option<String>,
    pub end_latlng: Option<String>,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    /// Visibility flag
    pub private: bool,
    pub likes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sport_type::Entity",
        from = "Column::SportTypeId",
        to = "super::sport_type::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    SportType,
}

impl Related<super::sport_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SportType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
