use std::fmt;

use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

use crate::schema::todos;

/// Longest title the `todos.title` column accepts.
pub const TITLE_MAX_LEN: usize = 250;

#[derive(Serialize, Deserialize, Queryable, Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub is_done: bool,
    pub added_date: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = todos)]
pub struct NewTodo {
    pub title: String,
    pub is_done: bool,
    pub added_date: Option<DateTime<Utc>>,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title={} , Completed = {}", self.title, self.is_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_title_and_completion() {
        let todo = Todo {
            id: 7,
            title: "Water the plants".into(),
            is_done: true,
            added_date: None,
        };

        assert_eq!(todo.to_string(), "Title=Water the plants , Completed = true");
    }
}
