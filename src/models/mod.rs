// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Relational data model (sea-orm entities).
//!
//! Many-to-many relationships are plain join entities under [`links`];
//! nothing here relies on ORM-managed bidirectional relations.

pub mod activity;
pub mod challenge;
pub mod club;
pub mod comment;
pub mod leadership;
pub mod links;
pub mod share;
pub mod sport_type;
pub mod user;

pub mod prelude {
    pub use super::activity::Entity as Activities;
    pub use super::challenge::Entity as Challenges;
    pub use super::club::Entity as Clubs;
    pub use super::comment::Entity as Comments;
    pub use super::leadership::Entity as Leadership;
    pub use super::links::activity_comment::Entity as ActivityComment;
    pub use super::links::challenge_activity::Entity as ChallengeActivity;
    pub use super::links::challenge_comment::Entity as ChallengeComment;
    pub use super::links::user_activity::Entity as UserActivity;
    pub use super::links::user_challenge::Entity as UserChallenge;
    pub use super::links::user_club::Entity as UserClub;
    pub use super::share::Entity as Shares;
    pub use super::sport_type::Entity as SportTypes;
    pub use super::user::Entity as Users;
}
