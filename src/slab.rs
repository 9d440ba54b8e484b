use std::mem;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(usize);

// Every node stores three of these, so keep them a single word
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), mem::size_of::<usize>());
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 2 * mem::size_of::<usize>());

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl From<usize> for Ptr {
    #[inline(always)]
    fn from(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "bug: usize::MAX is reserved for the null ptr");
        Ptr(index)
    }
}

impl From<Option<usize>> for Ptr {
    #[inline(always)]
    fn from(index: Option<usize>) -> Self {
        index.map(Ptr::from).unwrap_or_default()
    }
}

impl Ptr {
    #[inline(always)]
    pub fn new(index: usize) -> Option<Self> {
        if index == usize::MAX {
            None
        } else {
            Some(Ptr(index))
        }
    }

    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Kept `#[inline]` so the `Option` only exists while writing the code. The compiler should
    // end up comparing against `usize::MAX` directly.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// A removed entry, holding the index of the next entry in the free list
    Vacant(Ptr),
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Indexes are not shifted when an individual item is removed. Instead of always pushing items
/// after the previously pushed item, the slab reuses space from previously removed entries when
/// possible. An index returned from `push` stays valid until that entry is removed or the slab is
/// cleared.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The index of the first entry in the free list or `Ptr::null()` if the free list is empty
    ///
    /// The free list is a stack threaded through the vacant entries of `entries`.
    free_list_head: Ptr,
    /// The number of occupied entries
    len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::default(),
            free_list_head: Ptr::null(),
            len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value at `index`, or `None` if that entry is vacant or out of
    /// bounds
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.entries.get(index)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value at `index`, or `None` if that entry is vacant or
    /// out of bounds
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.entries.get_mut(index)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Pushes a value into the slab and returns the index at which it was inserted.
    ///
    /// The most recently removed entry is reused first, otherwise the value goes at the end.
    pub fn push(&mut self, value: T) -> usize {
        self.len += 1;

        if let Some(free_index) = self.free_list_head.into_index() {
            let entry = &mut self.entries[free_index];
            let next_free = match *entry {
                Entry::Vacant(next) => next,
                Entry::Occupied(_) => unreachable!("bug: occupied entry on the free list"),
            };
            *entry = Entry::Occupied(value);
            self.free_list_head = next_free;

            return free_index;
        }

        let index = self.entries.len();
        // Since we store `Ptr` internally, we can't have usize::MAX as a valid index into the slab
        if index == usize::MAX {
            panic!("cannot have more than usize::MAX - 1 entries in slab");
        }
        self.entries.push(Entry::Occupied(value));

        index
    }

    /// Removes an item from the slab, returning its value, or `None` if the entry was already
    /// vacant.
    ///
    /// This does not move or modify any other entries in the slab. Their indexes remain the same.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let entry = self.entries.get_mut(index)?;
        if let Entry::Vacant(_) = entry {
            return None;
        }

        let prev = mem::replace(entry, Entry::Vacant(self.free_list_head));
        self.free_list_head = Ptr::from(index);
        self.len -= 1;

        match prev {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => unreachable!(),
        }
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab. This
    /// invalidates all previous indexes returned from `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list_head = Ptr::null();
        self.len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional)
    }

    /// Shrinks the capacity of the slab as much as possible without moving any entries.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<usize> for Slab<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("bug: slab index {} is not occupied", index),
        }
    }
}

impl<T> IndexMut<usize> for Slab<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("bug: slab index {} is not occupied", index),
        }
    }
}
