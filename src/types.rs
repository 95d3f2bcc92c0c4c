//! Shared types used across the codebase

/// Persistence operation performed on behalf of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Create,
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Select => "select",
            Operation::Create => "create",
            Operation::Update => "update",
        };
        f.write_str(name)
    }
}
