//! Data structures for authentication-related entities.
//!
//! This module defines the canonical user record, the closed role
//! enumeration, and the session status machine. Canonical means fully
//! defaulted: every optional wire field has already been resolved by the
//! time a value of these types exists.

use journal_api::{RawGamification, RawUser};
use serde::{Deserialize, Serialize};

/// Fixed set of portal roles governing navigation and access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Author,
    Reviewer,
    JournalAdmin,
    SuperAdmin,
    Accountant,
}

impl Role {
    /// Maps a wire role string onto the enumeration. Unknown or empty values
    /// fall back to [`Role::Author`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reviewer" => Role::Reviewer,
            "journal_admin" | "journaladmin" => Role::JournalAdmin,
            "super_admin" | "superadmin" => Role::SuperAdmin,
            "accountant" => Role::Accountant,
            _ => Role::Author,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Author => "author",
            Role::Reviewer => "reviewer",
            Role::JournalAdmin => "journal_admin",
            Role::SuperAdmin => "super_admin",
            Role::Accountant => "accountant",
        }
    }
}

/// Gamification progress attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gamification {
    pub level: String,
    pub badges: Vec<String>,
    pub points: i64,
}

impl From<RawGamification> for Gamification {
    fn from(raw: RawGamification) -> Self {
        Self {
            level: raw.level,
            badges: raw.badges,
            points: raw.points,
        }
    }
}

/// Canonical identity record of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub affiliation: String,
    pub gamification: Gamification,
    pub avatar: Option<String>,
    pub telegram: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            patronymic: raw.patronymic,
            email: raw.email,
            phone: raw.phone,
            role: Role::parse(&raw.role),
            affiliation: raw.affiliation,
            gamification: raw.gamification.into(),
            avatar: raw.avatar,
            telegram: raw.telegram,
        }
    }
}

impl User {
    /// "Last First" display form used across the shell.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.last_name, self.first_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_owned()
        }
    }
}

/// Lifecycle of the session.
///
/// `Unknown → Loading → {Authenticated, Unauthenticated}`; logout and any
/// bootstrap failure transition back to `Unauthenticated`. There is no
/// refresh state: an expired access token surfaces as a failed profile
/// fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Unknown,
    Loading,
    Authenticated,
    Unauthenticated,
}
