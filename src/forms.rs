use chrono::{DateTime, Utc};
use rocket::form::{self, error::ErrorKind, Context, Error};
use serde::Serialize;

use crate::models::{NewTodo, TITLE_MAX_LEN};

pub const REQUIRED: &str = "This field is required.";
pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";

#[derive(FromForm, Debug)]
pub struct TodoForm {
    #[field(validate = title_rules())]
    pub title: String,
    pub is_done: bool,
}

fn title_rules<'v>(title: &str) -> form::Result<'v, ()> {
    if title.contains('\0') {
        Err(Error::validation(NULL_CHARACTERS))?;
    }

    let title = title.trim();
    if title.is_empty() {
        Err(Error::validation(REQUIRED))?;
    }

    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        Err(Error::validation(format!(
            "Ensure this value has at most {} characters (it has {}).",
            TITLE_MAX_LEN, len
        )))?;
    }

    Ok(())
}

impl TodoForm {
    pub fn new_todo(&self, now: DateTime<Utc>) -> NewTodo {
        NewTodo {
            title: self.title.trim().to_string(),
            is_done: self.is_done,
            added_date: Some(now),
        }
    }
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct FormView {
    pub title: String,
    pub is_done: bool,
    pub errors: Vec<String>,
}

impl FormView {
    /// Echoes a rejected submission back with its messages.
    pub fn rejected(context: &Context<'_>) -> Self {
        let errors = context
            .errors()
            .map(|error| match error.kind {
                ErrorKind::Missing => REQUIRED.to_string(),
                _ => error.to_string(),
            })
            .collect();

        FormView {
            title: context.field_value("title").unwrap_or_default().to_string(),
            is_done: context.field_value("is_done").map_or(false, checked),
            errors,
        }
    }

    /// A valid submission the database refused.
    pub fn refused(form: &TodoForm, message: String) -> Self {
        FormView {
            title: form.title.clone(),
            is_done: form.is_done,
            errors: vec![message],
        }
    }
}

// Same truthy set as Rocket's `bool` form field.
fn checked(value: &str) -> bool {
    value.is_empty()
        || ["on", "yes", "true"]
            .iter()
            .any(|truthy| value.eq_ignore_ascii_case(truthy))
}
