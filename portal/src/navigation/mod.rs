//! Role-based navigation configuration and view-transition signalling.
//!
//! This module defines the routes the session manager can force the UI to,
//! the `Navigator` seam through which it does so, and the pure lookup from a
//! user role to that role's ordered navigation entries.

use crate::auth::Role;

/// Views the session manager can navigate the shell to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// View-transition collaborator injected into the session manager.
///
/// The core never renders; it only signals. The shell decides what a
/// transition to [`Route::Login`] or [`Route::Dashboard`] looks like.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// One entry in a role's navigation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub destination: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Ordered navigation entries for `role`; no role yields an empty list.
pub fn entries(role: Option<Role>) -> Vec<NavEntry> {
    let Some(role) = role else {
        return Vec::new();
    };
    let triples: &[(&str, &str, &str)] = match role {
        Role::Author => &[
            ("/dashboard", "home", "Dashboard"),
            ("/articles", "file-text", "My Articles"),
            ("/articles/new", "plus-circle", "Submit Article"),
            ("/notifications", "bell", "Notifications"),
            ("/profile", "user", "Profile"),
        ],
        Role::Reviewer => &[
            ("/dashboard", "home", "Dashboard"),
            ("/reviews", "clipboard", "Assigned Reviews"),
            ("/reviews/history", "archive", "Review History"),
            ("/notifications", "bell", "Notifications"),
            ("/profile", "user", "Profile"),
        ],
        Role::JournalAdmin => &[
            ("/dashboard", "home", "Dashboard"),
            ("/articles/queue", "inbox", "Submission Queue"),
            ("/udk-requests", "hash", "UDK Requests"),
            ("/reviewers", "users", "Reviewers"),
            ("/notifications", "bell", "Notifications"),
            ("/profile", "user", "Profile"),
        ],
        Role::SuperAdmin => &[
            ("/dashboard", "home", "Dashboard"),
            ("/users", "users", "Users"),
            ("/journals", "book-open", "Journals"),
            ("/udk-requests", "hash", "UDK Requests"),
            ("/notifications", "bell", "Notifications"),
            ("/profile", "user", "Profile"),
        ],
        Role::Accountant => &[
            ("/dashboard", "home", "Dashboard"),
            ("/payments", "credit-card", "Payments"),
            ("/reports", "bar-chart", "Reports"),
            ("/notifications", "bell", "Notifications"),
            ("/profile", "user", "Profile"),
        ],
    };
    triples
        .iter()
        .map(|&(destination, icon, label)| NavEntry {
            destination,
            icon,
            label,
        })
        .collect()
}
