//! Deferred command dispatcher.
//!
//! SYSTEM CONTEXT
//! ==============
//! Commands arrive from the host's command channel before the app knows
//! whether anyone is logged in. The dispatcher holds the auth-check signal
//! and turns each recognised command into a navigation that runs only after
//! that signal settles. It never looks at the check's outcome; the route
//! guard redirects if there turns out to be no session.
//!
//! Navigation always happens on a spawned task, so a command handled after
//! the check has settled still navigates on the next tick rather than inside
//! `handle`.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde_json::Value;

use crate::net::types::Command;
use crate::routes::AppRoute;
use crate::state::auth_fetch::AuthFetchSignal;
use frames::Intent;

/// Runs `'static` local futures to completion.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Spawner backed by the Leptos local executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTasks;

impl Spawner for LocalTasks {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}

/// Navigation target for a command, or `None` if the command is ignored.
#[must_use]
pub fn command_target(command: &Command) -> Option<String> {
    let route = match command.intent() {
        Ok(Intent::Create) => AppRoute::Gist { gist_id: None, gist_name: None },
        Ok(Intent::Edit { gist_id, gist_name }) => {
            AppRoute::Gist { gist_id: Some(gist_id), gist_name: Some(gist_name) }
        }
        Err(e) => {
            leptos::logging::log!("ignoring command: {e}");
            return None;
        }
    };
    Some(route.path())
}

pub struct CommandDispatcher<S, N> {
    signal: AuthFetchSignal,
    spawner: S,
    navigate: Rc<N>,
}

impl<S, N> CommandDispatcher<S, N>
where
    S: Spawner,
    N: Fn(&str) + 'static,
{
    pub fn new(signal: AuthFetchSignal, spawner: S, navigate: N) -> Self {
        Self { signal, spawner, navigate: Rc::new(navigate) }
    }

    #[must_use]
    pub fn signal(&self) -> &AuthFetchSignal {
        &self.signal
    }

    /// Schedule the navigation a command asks for.
    ///
    /// Returns `false` for unrecognised commands, which schedule nothing.
    pub fn handle(&self, command: &Command) -> bool {
        let Some(target) = command_target(command) else {
            return false;
        };
        let settled = self.signal.wait();
        let navigate = Rc::clone(&self.navigate);
        self.spawner.spawn(
            async move {
                settled.await;
                navigate(&target);
            }
            .boxed_local(),
        );
        true
    }

    /// Handle a raw `app.command` payload. Payloads that are not commands are
    /// logged and dropped.
    pub fn handle_value(&self, data: &Value) -> bool {
        match Command::deserialize(data) {
            Ok(command) => self.handle(&command),
            Err(e) => {
                leptos::logging::warn!("malformed command payload: {e}");
                false
            }
        }
    }
}
