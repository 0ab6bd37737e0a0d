/*!
 * Coalesced "caption preferences changed" notifications.
 *
 * Mutating a preference never calls observers directly. Instead a single task is
 * posted to the host's `TaskQueue`; further mutations before that task runs are
 * folded into it. Once it has fired, the next mutation schedules a new one.
 */

use log::debug;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// A deferred unit of work
pub type Task = Box<dyn FnOnce() + Send>;

/// Zero-delay task queue standing in for the host's main-thread run loop
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task to run on the next `run_pending`
    pub fn post(&self, task: Task) {
        self.tasks.lock().push_back(task);
    }

    /// Run every task queued before this call. Tasks posted while running wait
    /// for the next call. Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let batch: VecDeque<Task> = std::mem::take(&mut *self.tasks.lock());
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

/// Receives caption preference change notifications
pub trait CaptionPreferencesObserver: Send + Sync {
    fn caption_preferences_changed(&self);
}

struct NotifierShared {
    pending: AtomicBool,
    delivered: AtomicUsize,
    observers: Mutex<Vec<Weak<dyn CaptionPreferencesObserver>>>,
}

impl NotifierShared {
    fn fire(&self) {
        self.pending.store(false, Ordering::Release);
        self.delivered.fetch_add(1, Ordering::Relaxed);

        // Observers may query or even mutate preferences, so call them without
        // holding the lock.
        let live: Vec<Arc<dyn CaptionPreferencesObserver>> = {
            let mut observers = self.observers.lock();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        debug!("Delivering caption preferences change to {} observer(s)", live.len());
        for observer in live {
            observer.caption_preferences_changed();
        }
    }
}

/// Single-slot scheduler for preference change notifications
pub struct ChangeNotifier {
    shared: Arc<NotifierShared>,
    queue: TaskQueue,
}

impl ChangeNotifier {
    pub fn new(queue: TaskQueue) -> Self {
        Self {
            shared: Arc::new(NotifierShared {
                pending: AtomicBool::new(false),
                delivered: AtomicUsize::new(0),
                observers: Mutex::new(Vec::new()),
            }),
            queue,
        }
    }

    /// Register an observer. Only a weak reference is kept.
    pub fn register(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        self.shared.observers.lock().push(Arc::downgrade(observer));
    }

    pub fn unregister(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        let target = Arc::downgrade(observer);
        self.shared
            .observers
            .lock()
            .retain(|existing| !Weak::ptr_eq(existing, &target));
    }

    /// Schedule a notification unless one is already pending
    pub fn schedule(&self) {
        if self.shared.pending.swap(true, Ordering::AcqRel) {
            return;
        }

        let shared = Arc::downgrade(&self.shared);
        self.queue.post(Box::new(move || {
            // The owning store is gone: nothing to deliver.
            if let Some(shared) = shared.upgrade() {
                shared.fire();
            }
        }));
    }

    pub fn is_pending(&self) -> bool {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Number of notifications fired so far
    pub fn delivered_count(&self) -> usize {
        self.shared.delivered.load(Ordering::Relaxed)
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }
}
