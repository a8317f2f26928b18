use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::ForestError;
use crate::role::{authorize, permitted_routes, Role, Route};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub signed_in_at: DateTime<Utc>,
}

/// Holds the signed-in persona and the stack of screens it has opened.
///
/// Without a session the stack is empty and only the login view exists.
/// With one, the bottom of the stack is always the role's entry route.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    session: Option<Session>,
    stack: Vec<Route>,
    theme: Theme,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Authenticate and land on the role's entry route.
    ///
    /// On failure nothing changes: no session, login view stays current.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Route, ForestError> {
        let role = auth::authenticate(username, password)?;
        let entry = role.entry_route();
        self.session = Some(Session {
            username: username.to_string(),
            role,
            signed_in_at: Utc::now(),
        });
        self.stack = vec![entry];
        self.theme.set_for(role);
        Ok(entry)
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.stack.clear();
        self.theme.reset();
    }

    /// Routes the current session may open, in menu order.
    pub fn reachable(&self) -> &'static [Route] {
        match self.role() {
            Some(role) => permitted_routes(role),
            None => &[],
        }
    }

    pub fn can_open(&self, route: Route) -> bool {
        self.role().is_some_and(|role| authorize(role, route))
    }

    /// Push a route if the session's role may open it.
    pub fn navigate(&mut self, route: Route) -> Result<(), ForestError> {
        let role = self.role().ok_or(ForestError::NoSession)?;
        if !authorize(role, route) {
            return Err(ForestError::Unauthorized(format!(
                "{} cannot open {}",
                role.display_name(),
                route.display_name()
            )));
        }
        self.stack.push(route);
        Ok(())
    }

    /// Pop the top route. The entry route is never popped.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.stack.last().copied()
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }
}
