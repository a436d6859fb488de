use crate::error::{Error, Result};

/// A fixed-capacity output buffer with a write cursor.
///
/// The backing `Vec` is allocated once, up front. `claim()` hands out the next
/// slots and moves the cursor; it never grows past the capacity, so the
/// buffer never reallocates and earlier claims keep their offsets. Many
/// polylines can be tessellated one after another into one Arena, and the
/// whole thing uploaded in one go.
///
/// # Examples
///
/// ```
/// use tessgeo::tessellate::Arena;
///
/// let mut arena = Arena::<u32>::new("indices", 8);
/// {
///     let claim = arena.claim(6).unwrap();
///     assert_eq!(0, claim.base);
///     claim.items.copy_from_slice(&[0, 1, 2, 2, 3, 0]);
/// }
/// assert_eq!(6, arena.len());
/// assert!(arena.claim(6).is_err());
/// assert_eq!(6, arena.len());
/// ```
#[derive(Clone, Debug)]
pub struct Arena<T> {
    name: &'static str,
    items: Vec<T>,
    capacity: usize,
}

/// Slots handed out by `Arena::claim()`.
#[derive(Debug)]
pub struct Claim<'a, T> {
    /// Offset of `items[0]` within the Arena.
    pub base: usize,
    pub items: &'a mut [T],
}

impl<T: Copy + Default> Arena<T> {
    /// `name` shows up in `Error::BufferTooSmall`.
    pub fn new(name: &'static str, capacity: usize) -> Arena<T> {
        Arena {
            name: name,
            items: Vec::with_capacity(capacity),
            capacity: capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The write cursor: how many slots have been claimed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Fails unless `n` more slots are available.
    pub fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            Err(Error::BufferTooSmall {
                buffer: self.name,
                required: n,
                capacity: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    /// Claims the next `n` slots, filled with `T::default()`.
    ///
    /// On failure the Arena is unchanged.
    pub fn claim(&mut self, n: usize) -> Result<Claim<T>> {
        self.ensure(n)?;
        let base = self.items.len();
        self.items.resize(base + n, T::default());
        Ok(Claim {
            base: base,
            items: &mut self.items[base..],
        })
    }

    /// Resets the cursor. Keeps the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
