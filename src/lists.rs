use crate::error::ListError;
use crate::models::{Message, Task};

/// An insertion-ordered collection addressed by 0-based position.
///
/// Removing an item shifts everything after it down by one; positions are
/// never stable identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList<T> {
    items: Vec<T>,
}

pub type TaskList = ItemList<Task>;
pub type MessageList = ItemList<Message>;

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        ItemList { items: Vec::new() }
    }
}

impl<T> ItemList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item at the end of the list.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        self.check(index)?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.check(index)?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        self.check(index)?;
        Ok(&mut self.items[index])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Calls `visit` with each item and its 0-based position, in insertion order.
    pub fn for_each_indexed<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &T),
    {
        for (i, item) in self.items.iter().enumerate() {
            visit(i, item);
        }
    }

    fn check(&self, index: usize) -> Result<(), ListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ListError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<'a, T> IntoIterator for &'a ItemList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for ItemList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ItemList {
            items: iter.into_iter().collect(),
        }
    }
}

impl TaskList {
    /// Tasks whose description contains `needle`, with their 0-based positions.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.description_contains(needle))
    }

    /// Tasks that are due as of `query`, with their 0-based positions.
    pub fn due_on<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_due(query))
    }
}
