use serde::Serialize;

use crate::model::todo::{Priority, Status, Todo};
use crate::ops::todo_ops::Column;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub key: u64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub status: Status,
    pub count: usize,
    pub todos: Vec<TodoJson>,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub columns: Vec<ColumnJson>,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub key: u64,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn todo_to_json(todo: &Todo) -> TodoJson {
    TodoJson {
        key: todo.key,
        title: todo.title.clone(),
        content: todo.content.clone(),
        status: todo.status,
        priority: todo.priority,
        created_at: todo.created_at.format("%Y-%m-%d").to_string(),
        deadline: todo.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
    }
}

pub fn columns_to_json(columns: &[Column<'_>]) -> BoardJson {
    BoardJson {
        columns: columns
            .iter()
            .map(|c| ColumnJson {
                status: c.status,
                count: c.count(),
                todos: c.todos.iter().map(|t| todo_to_json(t)).collect(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One-line card summary: `#3 [high] Title (due 5 Mar 2025)`
pub fn format_todo_line(todo: &Todo) -> String {
    let mut line = format!("#{} [{}] {}", todo.key, todo.priority, todo.title);
    if let Some(due) = todo.deadline_display() {
        line.push_str(&format!(" (due {})", due));
    }
    line
}

/// Columns with headers and counts, skipping empty columns' bodies
pub fn format_columns(columns: &[Column<'_>]) -> String {
    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})\n", column.status.label(), column.count()));
        for todo in &column.todos {
            out.push_str("  ");
            out.push_str(&format_todo_line(todo));
            out.push('\n');
        }
    }
    out
}

/// Full card details
pub fn format_todo_detail(todo: &Todo) -> String {
    let mut out = format!("#{} {}\n", todo.key, todo.title);
    out.push_str(&format!("status: {}\n", todo.status));
    out.push_str(&format!("priority: {}\n", todo.priority));
    out.push_str(&format!("created: {}\n", todo.created_at.format("%Y-%m-%d")));
    if let Some(deadline) = todo.deadline {
        out.push_str(&format!("deadline: {}\n", deadline.format("%Y-%m-%d")));
    }
    if todo.content.is_empty() {
        out.push_str("\nNo content...\n");
    } else {
        out.push('\n');
        out.push_str(&todo.content);
        out.push('\n');
    }
    out
}
