//! Single-slot error state.

/// A pending mutation of the slot, in the order it was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange<E> {
    Set(E),
    Clear,
}

/// Holds at most one captured error. Setting an occupied slot overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSlot<E> {
    held: Option<E>,
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self { held: None }
    }
}

impl<E> ErrorSlot<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, change: StateChange<E>) {
        match change {
            StateChange::Set(error) => self.held = Some(error),
            StateChange::Clear => self.held = None,
        }
    }

    pub fn get(&self) -> Option<&E> {
        self.held.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.held.is_some()
    }

    pub fn take(&mut self) -> Option<E> {
        self.held.take()
    }
}
