use log::{trace, warn};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A result tagged with the number of the input that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequenced<T> {
    pub seq: usize,
    pub payload: T,
}

type Sink<T> = Box<dyn FnMut(Sequenced<T>) + Send>;

struct Pending<T> {
    // next seq to hand to the sink
    expected: usize,
    buffer: BTreeMap<usize, T>,
    on_release: Sink<T>,
}

/// Hands results to a sink in sequence order no matter the order they
/// arrive in. Each seq must be submitted exactly once: a missing one holds
/// back everything after it, see `pending`. `usize::MAX` is never released.
pub struct Reorderer<T> {
    inner: Mutex<Pending<T>>,
}

impl<T> Reorderer<T> {
    pub fn new<F>(first_seq: usize, on_release: F) -> Self
            where F: FnMut(Sequenced<T>) + Send + 'static {
        Reorderer {
            inner: Mutex::new(Pending {
                expected: first_seq,
                buffer: BTreeMap::new(),
                on_release: Box::new(on_release),
            }),
        }
    }

    // A panicking sink leaves the state consistent, keep going
    fn lock(&self) -> MutexGuard<'_, Pending<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Buffer `result` and release every contiguous result from the cursor
    /// on. The sink runs inside the lock so releases never interleave.
    pub fn submit(&self, result: Sequenced<T>) {
        let mut pending = self.lock();
        let Sequenced { seq, payload } = result;
        if seq < pending.expected || pending.buffer.contains_key(&seq) {
            warn!("Dropping duplicate result for seq {}", seq);
            return;
        }
        // the cursor has to move past every released seq
        if seq == usize::MAX {
            warn!("Dropping result for seq {}, nothing can follow it", seq);
            return;
        }
        pending.buffer.insert(seq, payload);
        if seq != pending.expected {
            trace!("Holding seq {}, waiting for {}", seq, pending.expected);
            return;
        }
        let pending = &mut *pending;
        while let Some(payload) = pending.buffer.remove(&pending.expected) {
            trace!("Releasing seq {}", pending.expected);
            (pending.on_release)(Sequenced { seq: pending.expected, payload });
            pending.expected += 1;
        }
    }

    /// Results waiting on an earlier seq.
    pub fn pending(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Next seq to be released.
    pub fn expected(&self) -> usize {
        self.lock().expected
    }
}
