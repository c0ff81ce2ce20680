// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Association tables for the many-to-many relationships.
//!
//! Each row is an independent link record keyed by both foreign keys.

pub mod activity_comment;
pub mod challenge_activity;
pub mod challenge_comment;
pub mod user_activity;
pub mod user_challenge;
pub mod user_club;
