use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::outcome::InputOutcome;
use crate::progress::Progress;
use crate::question::Question;

/// Emitted for every keystroke the session hands to its validator
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub outcome: InputOutcome,
    pub progress: Progress,
}

/// Emitted when the last character of a question is reached by typing
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCompletedEvent {
    pub question: Question,
    pub correct_count: usize,
    pub miss_count: usize,
    pub next_question_index: usize,
    pub is_last_question: bool,
}

/// Emitted once when a session reaches `Completed`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionCompletedEvent {
    pub total_correct_count: usize,
    pub total_miss_count: usize,
    pub completed_questions: usize,
    pub total_questions: usize,
}

impl SessionCompletedEvent {
    /// Fraction of attempts that were correct, 1.0 when nothing was attempted.
    pub fn accuracy(&self) -> f64 {
        crate::progress::accuracy(self.total_correct_count, self.total_miss_count)
    }
}

type Callback<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// Synchronous subscriber list for one kind of event.
///
/// Callbacks run in subscription order inside `emit`. A callback must not
/// subscribe to or unsubscribe from the stream that is currently emitting.
pub struct EventStream<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> EventStream<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Box::new(callback)));

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry
                        .borrow_mut()
                        .subscribers
                        .retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    pub fn emit(&self, event: &T) {
        let mut registry = self.registry.borrow_mut();
        for (_, callback) in registry.subscribers.iter_mut() {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }

    /// Detach every subscriber. Safe to call repeatedly.
    pub fn clear(&self) {
        self.registry.borrow_mut().subscribers.clear();
    }
}

impl<T: 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`EventStream::subscribe`].
///
/// Dropping the handle keeps the subscription alive; call
/// [`unsubscribe`](Subscription::unsubscribe) to detach.
#[must_use = "keep the handle to unsubscribe later"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
