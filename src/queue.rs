use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::hint::Hint;

/// Fixed-preallocation cap on a single `generate` call's work queue,
/// mirroring this crate's lineage's `EXPECTED_NUM_MODS`-sized
/// `RwQueue::with_capacity` calls -- a generous preallocation sized to the
/// overwhelming majority of real hint trees, not a hard ceiling on its own;
/// `generator` is what turns "queue grew past this" into `HintTooLarge`.
pub const SIZE_BIG : usize = 64;

/// One unit of BFS work: a dequeued hint paired with everything its handler
/// needs to splice in a piece of generated code at the right place (spec.md
/// §4.E "Queue item shape").
#[derive(Debug, Clone)]
pub struct HintMeta {
    pub hint : Hint,
    /// The placeholder token this item's generated code will replace.
    pub placeholder : String,
    /// When `is_capture`, the expression to capture (e.g. `pith_0[0]`);
    /// otherwise the expression this item's code should reference directly
    /// (e.g. `pith_0`). Use [`HintMeta::pith_ref`], not this field, when
    /// building a template's `{obj}` slot -- that's what resolves the two
    /// cases to the one string a handler should actually embed.
    pub pith_expr : String,
    /// The bound local name the pith expression is captured under, when
    /// `is_capture` is set (Open Question (ii) of spec.md §9, resolved as
    /// an explicit bit rather than a `:=`-substring search).
    pub pith_var_name : Option<String>,
    /// Indentation string for this item's emitted code.
    pub indent : String,
    /// Whether this item's pith needs a capturing assignment (as opposed
    /// to being re-evaluated inline every time it's referenced).
    pub is_capture : bool,
}

impl HintMeta {
    /// The expression a handler should actually embed in generated code:
    /// the captured name if this item captures its pith, else the raw
    /// expression. `generator` is responsible for splicing in the one-time
    /// `(name := expr)` capture assignment around this item's own code.
    pub fn pith_ref(&self) -> &str {
        self.pith_var_name.as_deref().unwrap_or(&self.pith_expr)
    }
}

/// A checked-out work buffer. Capacity is fixed at acquisition time;
/// `generator` treats exceeding it as `HintCodegenError::HintTooLarge`
/// rather than letting the buffer grow.
///
/// spec.md §4.D also describes "an auxiliary pair of set scratch objects...
/// pooled for union partitioning." `handlers::union` partitions its
/// children into two short-lived `Vec`s local to one handler call instead:
/// pooling them here would mean partitioning into a `HashSet`, whose
/// iteration order is not a function of the hint alone (it depends on the
/// process-wide `RandomState` seed), which would break the "same hint ->
/// byte-identical code" guarantee spec.md §5 requires of `generate`. The
/// work queue itself doesn't have this hazard because it's a `VecDeque`
/// that preserves enqueue order.
#[derive(Debug)]
pub struct Buffers {
    pub queue : VecDeque<HintMeta>,
    capacity : usize,
}

impl Buffers {
    fn with_capacity(capacity : usize) -> Self {
        Buffers {
            queue : VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Free-list of `Buffers`, shared across threads via a `parking_lot::Mutex`
/// the same way this crate's lineage shares its `RwQueue` across a worker
/// pool, except here the thing being pooled is scratch storage reused
/// across independent `generate` calls rather than a single run's live
/// work queue.
#[derive(Debug)]
pub struct HintQueuePool {
    free : Mutex<Vec<Buffers>>,
    default_capacity : usize,
}

impl HintQueuePool {
    pub fn new(default_capacity : usize) -> Self {
        HintQueuePool { free : Mutex::new(Vec::new()), default_capacity }
    }

    /// Checks out a `Buffers`, reusing a freed one if its capacity matches
    /// and minting a fresh one otherwise.
    pub fn acquire(&self, capacity : usize) -> PooledQueue<'_> {
        let mut free = self.free.lock();
        let buffers = match free.iter().position(|b| b.capacity() == capacity) {
            Some(idx) => free.swap_remove(idx),
            None => Buffers::with_capacity(capacity),
        };
        PooledQueue { pool : self, buffers : Some(buffers) }
    }

    pub fn acquire_default(&self) -> PooledQueue<'_> {
        self.acquire(self.default_capacity)
    }

    fn release(&self, mut buffers : Buffers) {
        buffers.clear();
        self.free.lock().push(buffers);
    }
}

impl Default for HintQueuePool {
    fn default() -> Self {
        HintQueuePool::new(SIZE_BIG)
    }
}

/// RAII handle returning its `Buffers` to the owning pool on every exit
/// path, including error returns out of `generator::generate`.
pub struct PooledQueue<'a> {
    pool : &'a HintQueuePool,
    buffers : Option<Buffers>,
}

impl<'a> std::ops::Deref for PooledQueue<'a> {
    type Target = Buffers;
    fn deref(&self) -> &Buffers {
        self.buffers.as_ref().expect("buffers taken before drop")
    }
}

impl<'a> std::ops::DerefMut for PooledQueue<'a> {
    fn deref_mut(&mut self) -> &mut Buffers {
        self.buffers.as_mut().expect("buffers taken before drop")
    }
}

impl<'a> Drop for PooledQueue<'a> {
    fn drop(&mut self) {
        if let Some(buffers) = self.buffers.take() {
            self.pool.release(buffers);
        }
    }
}
