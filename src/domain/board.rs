use std::fmt;

/// Agile board flavours the issue tracker can order a backlog for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardType {
    Kanban,
    Scrum,
}

impl BoardType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "kanban" => Some(BoardType::Kanban),
            "scrum" => Some(BoardType::Scrum),
            _ => None,
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardType::Kanban => write!(f, "kanban"),
            BoardType::Scrum => write!(f, "scrum"),
        }
    }
}
