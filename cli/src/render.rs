//! Plain-text rendering of session and menu views for the terminal.

use std::fmt::Write;

use shopino::catalog::{self, Department};
use shopino::profile::{self, MenuAction};
use shopino::{SessionStatus, User};

/// Name to greet the user with; login replies sometimes carry no username.
pub fn name_or_email(user: &User) -> &str {
    let name = profile::display_name(user);
    if name.is_empty() { user.email.as_deref().unwrap_or("shopper") } else { name }
}

pub fn whoami(status: &SessionStatus) -> String {
    let mut out = String::new();
    match status.user() {
        Some(user) => {
            let _ = writeln!(out, "status: {}", status.label());
            let _ = writeln!(out, "[{}] {}", profile::avatar_initial(user), name_or_email(user));
            if let Some(contact) = profile::contact_line(user) {
                let _ = writeln!(out, "{contact}");
            }
        }
        None => {
            let _ = writeln!(out, "status: {}", status.label());
            let _ = writeln!(out, "not signed in");
        }
    }
    out
}

pub fn account_menu(status: &SessionStatus) -> String {
    let mut out = String::new();
    for item in profile::account_menu(status) {
        let target = match item.action {
            MenuAction::Navigate => item.href,
            MenuAction::Logout => "shopino logout",
        };
        let _ = writeln!(out, "{:<16} {target}", item.label);
    }
    out
}

pub fn header_menu(status: &SessionStatus) -> String {
    let menu = profile::header_menu(status);
    let mut out = String::new();
    let _ = writeln!(out, "{}", menu.heading);
    if let Some(username) = menu.username {
        let _ = writeln!(out, "  {username}");
    }
    for item in menu.account_links {
        let _ = writeln!(out, "  {:<18} {}", item.label, item.href);
    }
    for section in menu.sections {
        let _ = writeln!(out, "\n{}", section.title);
        for item in section.items {
            let _ = writeln!(out, "  {:<18} {}", item.label, item.href);
        }
    }
    out
}

pub fn category_menu(department: Department) -> String {
    let tab = catalog::menu(department);
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", tab.department, tab.alt_text);
    for group in &tab.groups {
        let _ = writeln!(out, "  {}", group.title);
        for entry in group.items {
            let marker = if entry.featured { "*" } else { " " };
            let _ = writeln!(out, "   {marker} {:<18} {}", entry.name, entry.href);
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
