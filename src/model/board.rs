use serde::{Deserialize, Serialize};

use super::todo::{Status, Todo};

/// All cards of a board, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub todos: Vec<Todo>,
}

impl Board {
    pub fn new(todos: Vec<Todo>) -> Self {
        Board { todos }
    }

    /// Next free key: one past the highest key, or 1 for an empty board
    pub fn next_key(&self) -> u64 {
        self.todos.iter().map(|t| t.key).max().map_or(1, |k| k + 1)
    }

    pub fn get(&self, key: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.key == key)
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.key == key)
    }

    /// Cards in one column, in insertion order
    pub fn in_status(&self, status: Status) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.status == status).collect()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}
