use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    FileRead,
    HttpFetch,
    DbQuery,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskKind::FileRead => "csv",
            TaskKind::HttpFetch => "api",
            TaskKind::DbQuery => "db",
        };
        f.write_str(label)
    }
}

/// One unit of fetch work. Created at startup and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTask {
    pub kind: TaskKind,
    pub source: String,
}

impl FetchTask {
    pub fn new(kind: TaskKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn file_read(path: impl Into<String>) -> Self {
        Self::new(TaskKind::FileRead, path)
    }

    pub fn http_fetch(url: impl Into<String>) -> Self {
        Self::new(TaskKind::HttpFetch, url)
    }

    pub fn db_query(query: impl Into<String>) -> Self {
        Self::new(TaskKind::DbQuery, query)
    }
}

impl fmt::Display for FetchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_constructors() {
        let task = FetchTask::file_read("data.csv");
        assert_eq!(task.kind, TaskKind::FileRead);
        assert_eq!(task.source, "data.csv");

        assert_eq!(FetchTask::http_fetch("http://x").kind, TaskKind::HttpFetch);
        assert_eq!(FetchTask::db_query("SELECT 1").kind, TaskKind::DbQuery);
    }

    #[test]
    fn test_task_display() {
        let task = FetchTask::http_fetch("http://localhost/users");
        assert_eq!(task.to_string(), "[api] http://localhost/users");
    }
}
