// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clickable actions attached to text styles.

use core::any::Any;
use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};

/// The event delivered to listeners when a clickable action is performed.
#[derive(Clone, Copy)]
pub struct ActionEvent<'a> {
    source: &'a dyn Any,
    command: &'a str,
}

impl<'a> ActionEvent<'a> {
    /// Creates an event for `command`, raised by `source`.
    pub fn new(source: &'a dyn Any, command: &'a str) -> Self {
        Self { source, command }
    }

    /// Returns the object that performed the action.
    pub fn source(&self) -> &'a dyn Any {
        self.source
    }

    /// Returns the action's command string.
    pub fn command(&self) -> &'a str {
        self.command
    }
}

impl fmt::Debug for ActionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionEvent")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Receives [`ActionEvent`]s from a [`ClickableTextAction`].
pub trait ActionListener: Send + Sync {
    /// Called synchronously when the action is performed.
    fn action_performed(&self, event: &ActionEvent<'_>);
}

impl<F> ActionListener for F
where
    F: Fn(&ActionEvent<'_>) + Send + Sync,
{
    fn action_performed(&self, event: &ActionEvent<'_>) {
        self(event);
    }
}

/// A shared handle to a registered listener. Listeners are compared by identity.
pub type ListenerHandle = Arc<dyn ActionListener>;

/// Returns `true` if both handles point at the same listener object.
pub fn same_listener(a: &ListenerHandle, b: &ListenerHandle) -> bool {
    core::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// A command string plus the listeners to notify when text carrying it is clicked.
///
/// Actions are shared between styles through `Arc` and are never copied when a style is derived.
/// Listener registration is serialized by an internal lock; everything else is immutable.
///
/// Two actions are equal when their commands are equal and they hold the *same* listener handles
/// in the same order.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use text_modifier::{ActionEvent, ClickableTextAction, ListenerHandle};
///
/// let clicks = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&clicks);
/// let listener: ListenerHandle = Arc::new(move |event: &ActionEvent<'_>| {
///     assert_eq!(event.command(), "open");
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let action = ClickableTextAction::new("open");
/// action.add_action_listener(listener);
/// action.perform_clickable_action(&());
/// assert_eq!(clicks.load(Ordering::SeqCst), 1);
/// ```
pub struct ClickableTextAction {
    command: Arc<str>,
    listeners: Mutex<Vec<ListenerHandle>>,
}

impl ClickableTextAction {
    /// Creates an action with no listeners.
    pub fn new(command: impl Into<Arc<str>>) -> Self {
        Self {
            command: command.into(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Creates an action, rejecting an empty command.
    pub fn try_new(command: &str) -> Result<Self> {
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }
        Ok(Self::new(command))
    }

    /// Returns the command string.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Appends a listener. The same handle may be registered more than once.
    pub fn add_action_listener(&self, listener: ListenerHandle) {
        let mut listeners = self.lock();
        listeners.push(listener);
        log::debug!(
            target: "text_modifier::action",
            "added listener to `{}` ({} registered)",
            self.command,
            listeners.len()
        );
    }

    /// Removes every registration of `listener`. Returns `true` if any was removed.
    pub fn remove_action_listener(&self, listener: &ListenerHandle) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|registered| !same_listener(registered, listener));
        let removed = listeners.len() != before;
        if removed {
            log::debug!(
                target: "text_modifier::action",
                "removed listener from `{}` ({} registered)",
                self.command,
                listeners.len()
            );
        }
        removed
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns a snapshot of the registered listeners, in registration order.
    pub fn listeners(&self) -> Vec<ListenerHandle> {
        self.lock().clone()
    }

    /// Notifies every listener, in registration order, on the calling thread.
    ///
    /// Does nothing when no listener is registered. Listeners run outside the registration lock,
    /// so they may add or remove listeners; such changes apply to the next dispatch.
    pub fn perform_clickable_action(&self, source: &dyn Any) {
        let listeners = self.listeners();
        if listeners.is_empty() {
            return;
        }
        log::debug!(
            target: "text_modifier::action",
            "dispatching `{}` to {} listener(s)",
            self.command,
            listeners.len()
        );
        let event = ActionEvent::new(source, &self.command);
        for listener in &listeners {
            listener.action_performed(&event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ListenerHandle>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for ClickableTextAction {
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        if self.command != other.command {
            return false;
        }
        // Snapshot one side so the two locks are never held together.
        let ours = self.listeners();
        let theirs = other.lock();
        ours.len() == theirs.len()
            && ours
                .iter()
                .zip(theirs.iter())
                .all(|(a, b)| same_listener(a, b))
    }
}

impl fmt::Debug for ClickableTextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickableTextAction")
            .field("command", &self.command)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl fmt::Display for ClickableTextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action `{}`", self.command)
    }
}
