use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use super::*;

struct PoolSpawner(LocalSpawner);

impl Spawner for PoolSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.0.spawn_local(task).expect("spawn onto pool");
    }
}

fn recorder() -> (Rc<RefCell<Vec<AuthAction>>>, impl Fn(AuthAction) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |action| sink.borrow_mut().push(action))
}

#[test]
fn request_logout_shows_the_prompt() {
    let mut shown = String::new();
    let confirmed = request_logout(|prompt| {
        shown = prompt.to_owned();
        true
    });
    assert!(confirmed);
    assert_eq!(shown, LOGOUT_PROMPT);
}

#[test]
fn declined_logout_dispatches_nothing() {
    let mut pool = LocalPool::new();
    let spawner = PoolSpawner(pool.spawner());
    let (actions, dispatch) = recorder();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let started = logout_with_confirm(
        |_| false,
        dispatch,
        move || {
            counter.set(counter.get() + 1);
            async { Ok(()) }
        },
        &spawner,
    );
    pool.run_until_stalled();

    assert!(!started);
    assert!(actions.borrow().is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn confirmed_logout_dispatches_one_logout() {
    let mut pool = LocalPool::new();
    let spawner = PoolSpawner(pool.spawner());
    let (actions, dispatch) = recorder();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let started = logout_with_confirm(
        |_| true,
        dispatch,
        move || {
            counter.set(counter.get() + 1);
            async { Ok(()) }
        },
        &spawner,
    );
    pool.run_until_stalled();

    assert!(started);
    assert_eq!(calls.get(), 1);
    assert_eq!(*actions.borrow(), vec![AuthAction::LogoutStart, AuthAction::LogoutComplete]);
}

#[test]
fn failed_logout_request_still_completes() {
    let (actions, dispatch) = recorder();
    futures::executor::block_on(perform_logout(dispatch, || async { Err(ApiError::Status(500)) }));
    assert_eq!(*actions.borrow(), vec![AuthAction::LogoutStart, AuthAction::LogoutComplete]);
}

#[test]
fn close_always_sends_the_intent() {
    let mut pool = LocalPool::new();
    let spawner = PoolSpawner(pool.spawner());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    close_app(
        move || {
            counter.set(counter.get() + 1);
            async { Err(ApiError::Unavailable) }
        },
        &spawner,
    );
    pool.run_until_stalled();

    assert_eq!(calls.get(), 1);
}
