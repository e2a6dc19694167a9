//! FIFO event queue with a single background consumer thread.

use std::collections::VecDeque;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// Caller-supplied callback invoked once per posted event, on the worker
/// thread, outside any lock.
pub type StateChangeHandler<E> = Box<dyn FnMut(E) + Send>;

/// A listener that processes state-change events on a dedicated thread.
///
/// The owning engine follows a strict protocol: spawn the listener before
/// posting the first event, [`post`](Self::post) during the run,
/// [`finish`](Self::finish) once no more events will be produced, then
/// [`join`](Self::join) to flush the queue before returning to the caller.
///
/// With no handler, events are popped and discarded. If the handler panics,
/// the payload is re-raised on the thread that joins, so handler defects are
/// never swallowed on the background thread.
pub struct StateChangeListener<E: Send + 'static> {
    shared: Arc<Shared<E>>,
    worker: Option<JoinHandle<()>>,
}

struct Shared<E> {
    queue: Mutex<VecDeque<E>>,
    available: Condvar,
    finished: AtomicBool,
}

impl<E: Send + 'static> StateChangeListener<E> {
    /// Starts the worker thread and returns the listener handle.
    pub fn spawn(handler: Option<StateChangeHandler<E>>) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            finished: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("state-change-listener".into())
            .spawn(move || drain(worker_shared, handler))
            .expect("failed to spawn state-change listener thread");

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Appends an event to the queue and returns immediately.
    ///
    /// Never blocks the producer beyond the queue lock. Events posted after
    /// [`finish`](Self::finish) are discarded.
    pub fn post(&self, event: E) {
        if self.shared.finished.load(Ordering::Acquire) {
            return;
        }

        let mut queue = self.shared.queue.lock().unwrap();
        queue.push_back(event);
        self.shared.available.notify_one();
    }

    /// Signals that no more events will be posted.
    ///
    /// One-way: the worker exits once the queue is empty and this flag is
    /// set. Already-queued events are still delivered.
    pub fn finish(&self) {
        // The flag flips under the queue lock so a worker between its
        // empty-queue check and its wait cannot miss the wakeup.
        let _queue = self.shared.queue.lock().unwrap();
        self.shared.finished.store(true, Ordering::Release);
        self.shared.available.notify_all();
    }

    /// Blocks until the worker has drained every queued event and exited.
    ///
    /// Re-raises the handler's panic payload on this thread if the handler
    /// panicked while processing an event.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if let Err(payload) = worker.join() {
                panic::resume_unwind(payload);
            }
        }
    }
}

impl<E: Send + 'static> Drop for StateChangeListener<E> {
    fn drop(&mut self) {
        self.finish();

        // A panic payload cannot be re-raised here without risking a
        // double panic; explicit `join` is the surfacing path.
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn drain<E>(shared: Arc<Shared<E>>, mut handler: Option<StateChangeHandler<E>>) {
    loop {
        let event = {
            let mut queue = shared.queue.lock().unwrap();
            loop {
                if let Some(event) = queue.pop_front() {
                    break Some(event);
                }
                if shared.finished.load(Ordering::Acquire) {
                    break None;
                }
                queue = shared.available.wait(queue).unwrap();
            }
        };

        // The handler runs outside the queue lock.
        match event {
            Some(event) => {
                if let Some(handler) = handler.as_mut() {
                    handler(event);
                }
            }
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::atomic::AtomicUsize;

    fn collecting_handler(sink: Arc<Mutex<Vec<u64>>>) -> StateChangeHandler<u64> {
        Box::new(move |event| sink.lock().unwrap().push(event))
    }

    #[test]
    fn test_delivers_all_events_in_posting_order() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let mut listener = StateChangeListener::spawn(Some(collecting_handler(Arc::clone(&sink))));

        for i in 0..1000u64 {
            listener.post(i);
        }
        listener.finish();
        listener.join();

        let received = sink.lock().unwrap();
        assert_eq!(received.len(), 1000);
        assert!(received.windows(2).all(|w| w[0] + 1 == w[1]));
    }

    #[test]
    fn test_join_returns_only_after_slow_handler_drains() {
        let handled = Arc::new(AtomicUsize::new(0));
        let handled_clone = Arc::clone(&handled);
        let mut listener = StateChangeListener::spawn(Some(Box::new(move |_: u64| {
            thread::sleep(std::time::Duration::from_millis(1));
            handled_clone.fetch_add(1, Ordering::SeqCst);
        })));

        for i in 0..50u64 {
            listener.post(i);
        }
        listener.finish();
        listener.join();

        assert_eq!(handled.load(Ordering::SeqCst), 50);
    }

    #[test]
    fn test_no_event_loss_under_concurrent_producers() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let mut listener = StateChangeListener::spawn(Some(Box::new(move |_: u64| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })));

        let particles = 64u64;
        let rounds = 100u64;
        (0..particles).into_par_iter().for_each(|p| {
            for r in 0..rounds {
                listener.post(p * rounds + r);
            }
        });
        listener.finish();
        listener.join();

        assert_eq!(count.load(Ordering::SeqCst), (particles * rounds) as usize);
    }

    #[test]
    fn test_missing_handler_discards_events() {
        let mut listener: StateChangeListener<u64> = StateChangeListener::spawn(None);
        for i in 0..100 {
            listener.post(i);
        }
        listener.finish();
        listener.join();
    }

    #[test]
    fn test_post_after_finish_is_discarded() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let mut listener = StateChangeListener::spawn(Some(collecting_handler(Arc::clone(&sink))));

        listener.post(1);
        listener.finish();
        listener.post(2);
        listener.join();

        assert_eq!(*sink.lock().unwrap(), vec![1]);
    }

    #[test]
    #[should_panic(expected = "handler defect")]
    fn test_handler_panic_resurfaces_on_join() {
        let mut listener = StateChangeListener::spawn(Some(Box::new(|_: u64| {
            panic!("handler defect");
        })));

        listener.post(1);
        listener.finish();
        listener.join();
    }

    #[test]
    fn test_drop_without_finish_joins_worker() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        {
            let listener = StateChangeListener::spawn(Some(collecting_handler(Arc::clone(&sink))));
            listener.post(7);
            // Dropped without an explicit finish/join.
        }
        assert_eq!(*sink.lock().unwrap(), vec![7]);
    }
}
