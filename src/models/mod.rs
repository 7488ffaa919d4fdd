// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire models for the Orbitah API.

pub mod achievement;
pub mod exploration;
pub mod focus_session;
pub mod goal;
pub mod group;
pub mod user;

pub use achievement::Achievement;
pub use exploration::{ExplorationState, ExplorationStateUpdate};
pub use focus_session::{FocusSession, FocusSessionCreate, FocusSessionUpdate};
pub use goal::{Goal, GoalCreate, GoalUpdate};
pub use group::{Group, GroupCreate, GroupUpdate};
pub use user::{Token, User, UserCreate, UserLogin, UserUpdate};
