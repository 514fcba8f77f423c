//! Profile panel view-model.
//!
//! What the header dropdown, mobile menu, and profile panel show for the
//! current session: the signed-in identity and the menus, which switch
//! wholesale on whether the session is authenticated.

use crate::authority::types::User;
use crate::session::SessionStatus;

/// Shown in the avatar bubble when the username is empty.
pub const DEFAULT_AVATAR_INITIAL: char = 'U';

#[must_use]
pub fn display_name(user: &User) -> &str {
    &user.username
}

/// Upper-cased first character of the username, taken as stored.
#[must_use]
pub fn avatar_initial(user: &User) -> String {
    match user.username.chars().next() {
        Some(first) => first.to_uppercase().collect(),
        None => DEFAULT_AVATAR_INITIAL.to_string(),
    }
}

/// Secondary line under the name: phone when known, otherwise email.
#[must_use]
pub fn contact_line(user: &User) -> Option<&str> {
    let phone = user.phone.as_deref().filter(|p| !p.is_empty());
    phone.or_else(|| user.email.as_deref().filter(|e| !e.is_empty()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Navigate,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
    pub action: MenuAction,
}

const fn link(label: &'static str, href: &'static str) -> MenuItem {
    MenuItem { label, href, action: MenuAction::Navigate }
}

const AUTHENTICATED_MENU: &[MenuItem] = &[
    link("Order History", "/account/orders"),
    link("Return Orders", "/account/returns"),
    link("Account Info", "/account/info"),
    link("Change Password", "/account/password"),
    link("Address", "/account/address"),
    MenuItem { label: "Logout", href: "#", action: MenuAction::Logout },
];

const ANONYMOUS_MENU: &[MenuItem] = &[link("Sign In", "/login"), link("Create Account", "/login")];

/// Account menu for `status`. Anything short of `Authenticated` gets the
/// signed-out menu.
#[must_use]
pub fn account_menu(status: &SessionStatus) -> &'static [MenuItem] {
    if status.is_authenticated() { AUTHENTICATED_MENU } else { ANONYMOUS_MENU }
}

// =============================================================================
// MOBILE MENU
// =============================================================================

pub const WELCOME_HEADING: &str = "Welcome back";
pub const SIGNED_OUT_HEADING: &str = "Sign in for a better experience";

/// A titled block of links in the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

/// The header's slide-out menu for one session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMenu<'a> {
    pub heading: &'static str,
    /// Shown under the heading only when signed in.
    pub username: Option<&'a str>,
    pub account_links: &'static [MenuItem],
    pub sections: &'static [MenuSection],
}

const HEADER_SIGNED_IN_LINKS: &[MenuItem] = &[link("My Orders", "/account/orders"), link("Account", "/account")];

const HEADER_SIGNED_OUT_LINKS: &[MenuItem] = &[link("Sign In", "/login")];

const HEADER_SECTIONS: &[MenuSection] = &[
    MenuSection {
        title: "SHOP BY CATEGORY",
        items: &[
            link("New Arrivals", "/new-arrivals"),
            link("Men", "/men"),
            link("Women", "/women"),
            link("Kids", "/kids"),
            link("Accessories", "/accessories"),
        ],
    },
    MenuSection {
        title: "QUICK LINKS",
        items: &[
            link("Offers", "/offers"),
            link("Wishlist", "/wishlist"),
            link("Track Order", "/track-order"),
            link("Customer Support", "/support"),
        ],
    },
];

/// Mobile menu for `status`. The shop sections never change; the account
/// block fails closed like [`account_menu`].
#[must_use]
pub fn header_menu(status: &SessionStatus) -> HeaderMenu<'_> {
    match status.user() {
        Some(user) => HeaderMenu {
            heading: WELCOME_HEADING,
            username: Some(display_name(user)),
            account_links: HEADER_SIGNED_IN_LINKS,
            sections: HEADER_SECTIONS,
        },
        None => HeaderMenu {
            heading: SIGNED_OUT_HEADING,
            username: None,
            account_links: HEADER_SIGNED_OUT_LINKS,
            sections: HEADER_SECTIONS,
        },
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
