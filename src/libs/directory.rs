use serde::Serialize;

pub const NAME_MAX_LEN: usize = 100;

/// A folder that tasks can be filed into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    pub id: Option<i64>,
    pub name: String,
}

impl Directory {
    pub fn new(name: &str) -> Self {
        Directory {
            id: None,
            name: name.to_string(),
        }
    }
}
