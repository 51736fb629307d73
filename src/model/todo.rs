use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board column a card lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
    Archived,
}

impl Status {
    /// All statuses in column order (left to right)
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Done,
        Status::Archived,
    ];

    /// The stored identifier (`todo`, `in-progress`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Archived => "archived",
        }
    }

    /// Human-readable column title
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To-Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Archived => "Archived",
        }
    }

    /// Parse a stored identifier
    pub fn parse(s: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|st| st.as_str() == s)
    }

    /// Column index in `Status::ALL`
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
            Status::Archived => 3,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        Priority::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable numeric key, unique within a board
    pub key: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: Status,
    pub priority: Priority,
    /// Day the card was created
    pub created_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl Todo {
    /// Deadline formatted for display, e.g. `5 Mar 2025`
    pub fn deadline_display(&self) -> Option<String> {
        self.deadline.map(|d| d.format("%-d %b %Y").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_identifier() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("in progress"), None);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn columns_follow_declaration_order() {
        let cols: Vec<usize> = Status::ALL.iter().map(|s| s.column()).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
    }

    #[test]
    fn deadline_display_uses_day_month_year() {
        let todo = Todo {
            key: 1,
            title: "Ship".into(),
            content: String::new(),
            status: Status::Todo,
            priority: Priority::High,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 5),
        };
        assert_eq!(todo.deadline_display().as_deref(), Some("5 Mar 2025"));
    }

    #[test]
    fn todo_without_content_or_deadline_deserializes() {
        let json = r#"{"key":3,"title":"A","status":"done","priority":"low","created_at":"2025-02-01"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.content, "");
        assert_eq!(todo.deadline, None);
        assert_eq!(todo.status, Status::Done);
    }
}
