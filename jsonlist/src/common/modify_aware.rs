use crate::common::Value;
use std::ops::Deref;

/// A list of [Value]s that records whether it has been changed since it was loaded.
///
/// Lists read from a storage row are handed out as `ModifyAwareList` so the owner
/// can tell whether the column needs to be written back. Reads go through
/// `Deref<Target = [Value]>`; every mutating method marks the list modified.
///
/// # Examples
///
/// ```rust
/// use jsonlist::common::{ModifyAwareList, Value};
///
/// let mut list = ModifyAwareList::new(vec![Value::I64(1)]);
/// assert!(!list.is_modified());
///
/// list.push(Value::I64(2));
/// assert!(list.is_modified());
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ModifyAwareList {
    items: Vec<Value>,
    modified: bool,
}

impl ModifyAwareList {
    /// Wraps `items` in an unmodified list.
    pub fn new(items: Vec<Value>) -> Self {
        ModifyAwareList {
            items,
            modified: false,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Clears the modified flag, typically after the list has been persisted.
    pub fn reset_modified(&mut self) {
        self.modified = false;
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.items
    }

    pub fn push(&mut self, value: Value) {
        self.modified = true;
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        let popped = self.items.pop();
        if popped.is_some() {
            self.modified = true;
        }
        popped
    }

    /// Inserts `value` at `index`. Panics if `index > len`, like [Vec::insert].
    pub fn insert(&mut self, index: usize, value: Value) {
        self.modified = true;
        self.items.insert(index, value);
    }

    /// Removes and returns the element at `index`, or `None` when out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            self.modified = true;
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: Value) -> Option<Value> {
        let slot = self.items.get_mut(index)?;
        self.modified = true;
        Some(std::mem::replace(slot, value))
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.modified = true;
        }
        self.items.clear();
    }

    pub fn retain(&mut self, f: impl FnMut(&Value) -> bool) {
        let before = self.items.len();
        self.items.retain(f);
        if self.items.len() != before {
            self.modified = true;
        }
    }

    /// Runs `f` against the element at `index` and marks the list modified.
    pub fn modify<R>(&mut self, index: usize, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let slot = self.items.get_mut(index)?;
        self.modified = true;
        Some(f(slot))
    }
}

impl Deref for ModifyAwareList {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl Extend<Value> for ModifyAwareList {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        let before = self.items.len();
        self.items.extend(iter);
        if self.items.len() != before {
            self.modified = true;
        }
    }
}

impl From<Vec<Value>> for ModifyAwareList {
    fn from(items: Vec<Value>) -> Self {
        ModifyAwareList::new(items)
    }
}

impl<'a> IntoIterator for &'a ModifyAwareList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ModifyAwareList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// equality ignores the modified flag
impl PartialEq for ModifyAwareList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl PartialEq<Vec<Value>> for ModifyAwareList {
    fn eq(&self, other: &Vec<Value>) -> bool {
        &self.items == other
    }
}

impl PartialEq<[Value]> for ModifyAwareList {
    fn eq(&self, other: &[Value]) -> bool {
        self.items.as_slice() == other
    }
}

impl std::fmt::Debug for ModifyAwareList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifyAwareList")
            .field("items", &self.items)
            .field("modified", &self.modified)
            .finish()
    }
}
