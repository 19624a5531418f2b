//! Per-channel handler registry for frames pushed by the host.
//!
//! DESIGN
//! ======
//! One handler per channel name. Registering a name again replaces the old
//! handler, so a root view that remounts re-registers without stacking
//! duplicate handlers. The browser runs a single thread, so the process-wide
//! registry is a `thread_local`.

#[cfg(test)]
#[path = "rpc_test.rs"]
mod rpc_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use super::types::Frame;

/// Callback invoked with the payload of a frame on its channel.
pub type Handler = Rc<dyn Fn(&Value)>;

/// Channel name -> handler map.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Register handlers, replacing any previous handler for the same channel.
    pub fn register_handlers<I, K>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = (K, Handler)>,
        K: Into<String>,
    {
        for (channel, handler) in handlers {
            self.handlers.insert(channel.into(), handler);
        }
    }

    /// Handler currently registered for `channel`.
    #[must_use]
    pub fn handler(&self, channel: &str) -> Option<Handler> {
        self.handlers.get(channel).cloned()
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::default());
}

/// Register handlers on the process-wide registry.
pub fn register_handlers<I, K>(handlers: I)
where
    I: IntoIterator<Item = (K, Handler)>,
    K: Into<String>,
{
    REGISTRY.with_borrow_mut(|registry| registry.register_handlers(handlers));
}

/// Route a frame to the handler registered for its channel.
///
/// Returns `false` when no handler is registered. The registry borrow is
/// released before the handler runs, so handlers may register again.
pub fn dispatch(frame: &Frame) -> bool {
    let Some(handler) = REGISTRY.with_borrow(|registry| registry.handler(&frame.syscall)) else {
        return false;
    };
    handler(&frame.data);
    true
}
