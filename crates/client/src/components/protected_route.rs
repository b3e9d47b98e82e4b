//! Route guard for pages that need a session.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::Route;

/// What the guard does for a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
}

pub fn guard_decision(token: Option<&str>) -> GuardDecision {
    match token {
        Some(t) if !t.is_empty() => GuardDecision::Render,
        _ => GuardDecision::RedirectToLogin,
    }
}

/// Layout that renders nested routes only while a token is present.
#[component]
pub fn ProtectedRoute() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();

    // Redirect to login if not authenticated
    use_effect(move || {
        let decision = guard_decision(auth.session.read().token());
        if decision == GuardDecision::RedirectToLogin {
            nav.replace(Route::Login { registered: false });
        }
    });

    let decision = guard_decision(auth.session.read().token());
    match decision {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::RedirectToLogin => rsx! {
            div { class: "flex items-center justify-center h-screen bg-gray-900 text-white",
                "Redirecting..."
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_only_with_token() {
        assert_eq!(guard_decision(Some("t")), GuardDecision::Render);
        assert_eq!(guard_decision(None), GuardDecision::RedirectToLogin);
        assert_eq!(guard_decision(Some("")), GuardDecision::RedirectToLogin);
    }
}
