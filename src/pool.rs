use std::ops::{Deref, DerefMut};

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::buffer::Buffer;
use crate::field::Field;

/// Types that can be returned to a [`Pool`] and handed out again.
///
/// `recycle` must leave the value empty while keeping whatever allocation it
/// owns, so the next borrower starts from a clean state without paying for a
/// new allocation.
pub trait Recycle {
    fn recycle(&mut self);
}

impl Recycle for Buffer {
    fn recycle(&mut self) {
        self.reset();
    }
}

impl Recycle for Vec<Field> {
    fn recycle(&mut self) {
        self.clear();
    }
}

/// Concurrency-safe free list of reusable values.
///
/// Unlike the per-thread buffers of a single logger, a pool is shared by
/// every thread that logs. The free list sits behind a mutex, and a value is
/// popped out of it before being handed over, so no two borrowers can ever
/// hold the same instance.
///
/// The pool never shrinks and has no upper bound: a burst of concurrent
/// records leaves its buffers behind for the next burst.
///
/// # Examples
///
/// ```
/// # use field_logger::{Buffer, Pool};
/// let pool: Pool<Buffer> = Pool::new();
/// {
///     let mut buf = pool.guard();
///     buf.append_str("hello");
/// } // returned here, reset
/// assert_eq!(pool.idle(), 1);
/// assert!(pool.get().is_empty());
/// ```
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
}

impl<T: Default + Recycle> Pool<T> {
    pub fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Takes an empty value out of the pool, creating one on a miss.
    pub fn get(&self) -> T {
        self.free.lock().pop().unwrap_or_default()
    }

    /// Recycles `item` and stores it for the next borrower.
    pub fn put(&self, mut item: T) {
        item.recycle();
        self.free.lock().push(item);
    }

    /// Borrows a value that goes back to the pool when the guard is dropped,
    /// whichever way the borrowing scope is left.
    pub fn guard(&self) -> Pooled<'_, T> {
        Pooled {
            pool: self,
            item: self.get(),
        }
    }

    /// Number of values currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl<T: Default + Recycle> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value borrowed from a [`Pool`].
pub struct Pooled<'a, T: Default + Recycle> {
    pool: &'a Pool<T>,
    item: T,
}

impl<T: Default + Recycle> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Default + Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Default + Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        // An empty default costs no allocation for the pooled types.
        self.pool.put(std::mem::take(&mut self.item));
    }
}

lazy_static! {
    /// Buffers used by [`JsonWriter`](crate::JsonWriter).
    pub(crate) static ref JSON_BUFFERS: Pool<Buffer> = Pool::new();

    /// Buffers used by [`TextWriter`](crate::TextWriter).
    pub(crate) static ref TEXT_BUFFERS: Pool<Buffer> = Pool::new();

    /// Field lists backing in-flight [`Entry`](crate::Entry) values.
    pub(crate) static ref ENTRY_FIELDS: Pool<Vec<Field>> = Pool::new();
}
