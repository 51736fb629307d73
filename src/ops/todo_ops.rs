use chrono::{Local, NaiveDate};
use log::info;
use regex::Regex;

use crate::model::board::Board;
use crate::model::todo::{Priority, Status, Todo};

/// Title given to cards created with a blank title
pub const DEFAULT_TITLE: &str = "New To-Do";

/// Error type for card operations
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("To-Do not found with key: {0}")]
    NotFound(u64),
    #[error("invalid status: {0} (expected todo, in-progress, done or archived)")]
    InvalidStatus(String),
    #[error("invalid priority: {0} (expected low, medium or high)")]
    InvalidPriority(String),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Fields for a new card; `None` picks the default
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
}

/// Partial update; only `Some` fields are applied.
/// `deadline: Some(None)` clears the deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub deadline: Option<Option<NaiveDate>>,
}

/// Cards of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    pub status: Status,
    pub todos: Vec<&'a Todo>,
}

impl Column<'_> {
    pub fn count(&self) -> usize {
        self.todos.len()
    }
}

/// Add a card and return its key.
pub fn create(board: &mut Board, new: NewTodo) -> u64 {
    let key = board.next_key();
    let title = new.title.trim();
    let todo = Todo {
        key,
        title: if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        },
        content: new.content,
        status: new.status.unwrap_or(Status::Todo),
        priority: new.priority.unwrap_or(Priority::Low),
        created_at: Local::now().date_naive(),
        deadline: new.deadline,
    };
    info!("created To-Do {} in {}", key, todo.status);
    board.todos.push(todo);
    key
}

/// Apply a partial update to the card with `key`.
pub fn edit(board: &mut Board, key: u64, update: TodoUpdate) -> Result<&Todo, TodoError> {
    let todo = board.get_mut(key).ok_or(TodoError::NotFound(key))?;
    if let Some(title) = update.title {
        todo.title = title;
    }
    if let Some(content) = update.content {
        todo.content = content;
    }
    if let Some(status) = update.status {
        todo.status = status;
    }
    if let Some(priority) = update.priority {
        todo.priority = priority;
    }
    if let Some(deadline) = update.deadline {
        todo.deadline = deadline;
    }
    info!("edited To-Do {}", key);
    Ok(todo)
}

pub fn get(board: &Board, key: u64) -> Option<&Todo> {
    board.get(key)
}

/// Snapshot of every card, in insertion order
pub fn all(board: &Board) -> Vec<Todo> {
    board.todos.clone()
}

/// Remove the card with `key`.
pub fn delete(board: &mut Board, key: u64) -> Result<Todo, TodoError> {
    let index = board
        .todos
        .iter()
        .position(|t| t.key == key)
        .ok_or(TodoError::NotFound(key))?;
    info!("deleted To-Do {}", key);
    Ok(board.todos.remove(index))
}

/// Move a card to another column.
pub fn move_to(board: &mut Board, key: u64, status: Status) -> Result<(), TodoError> {
    edit(
        board,
        key,
        TodoUpdate {
            status: Some(status),
            ..Default::default()
        },
    )?;
    Ok(())
}

/// Move a card one column left (`-1`) or right (`+1`), stopping at the
/// board edges. Returns the new status.
pub fn shift(board: &mut Board, key: u64, delta: isize) -> Result<Status, TodoError> {
    let current = board.get(key).ok_or(TodoError::NotFound(key))?.status;
    let target = (current.column() as isize + delta).clamp(0, Status::ALL.len() as isize - 1);
    let status = Status::ALL[target as usize];
    if status != current {
        move_to(board, key, status)?;
    }
    Ok(status)
}

/// Cards grouped per column, in `Status::ALL` order.
pub fn columns(board: &Board) -> Vec<Column<'_>> {
    Status::ALL
        .iter()
        .map(|&status| Column {
            status,
            todos: board.in_status(status),
        })
        .collect()
}

/// Cards whose title or content matches `re`
pub fn search<'a>(board: &'a Board, re: &Regex) -> Vec<&'a Todo> {
    board
        .todos
        .iter()
        .filter(|t| re.is_match(&t.title) || re.is_match(&t.content))
        .collect()
}

pub fn parse_status(s: &str) -> Result<Status, TodoError> {
    Status::parse(s.trim()).ok_or_else(|| TodoError::InvalidStatus(s.to_string()))
}

pub fn parse_priority(s: &str) -> Result<Priority, TodoError> {
    Priority::parse(s.trim()).ok_or_else(|| TodoError::InvalidPriority(s.to_string()))
}

/// Parse a `YYYY-MM-DD` deadline; blank input means no deadline.
pub fn parse_deadline(s: &str) -> Result<Option<NaiveDate>, TodoError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TodoError::InvalidDate(s.to_string()))
}
