use chrono::Utc;
use rocket::form::{Contextual, Form};
use rocket::response::{Debug, Redirect};
use rocket::serde::json::Json;
use rocket::State;
use rocket_dyn_templates::{context, Template};

use crate::config::Settings;
use crate::forms::{FormView, TodoForm};
use crate::models::Todo;
use crate::pages;
use crate::store::{StoreError, Todos};

#[derive(Responder)]
pub enum Submission {
    Created(Redirect),
    #[response(status = 422)]
    Rejected(Template),
    Failed(Debug<StoreError>),
}

fn todo_form(settings: &Settings, form: FormView) -> Template {
    Template::render(
        "todo_form",
        context! { site_name: &settings.site_name, form: form },
    )
}

#[get("/todos/new")]
pub fn new_todo(settings: &State<Settings>) -> Template {
    todo_form(settings, FormView::default())
}

#[post("/todos/new", data = "<form>")]
pub async fn create_todo<'r>(
    todos: Todos,
    settings: &State<Settings>,
    form: Form<Contextual<'r, TodoForm>>,
) -> Submission {
    let form = form.into_inner();
    let Some(submitted) = form.value else {
        log::warn!("todo form rejected: {} error(s)", form.context.errors().count());
        return Submission::Rejected(todo_form(settings, FormView::rejected(&form.context)));
    };

    match todos.insert(submitted.new_todo(Utc::now())).await {
        Ok(todo) => {
            log::info!("created todo #{}: {}", todo.id, todo);
            Submission::Created(Redirect::found(uri!(pages::home)))
        }
        Err(StoreError::Integrity(message)) => {
            log::warn!("todo refused by the database: {}", message);
            Submission::Rejected(todo_form(settings, FormView::refused(&submitted, message)))
        }
        Err(e) => {
            log::error!("failed to store todo: {}", e);
            Submission::Failed(Debug(e))
        }
    }
}

#[get("/todos/<id>")]
pub async fn todo_detail(
    todos: Todos,
    settings: &State<Settings>,
    id: i32,
) -> Result<Option<Template>, Debug<StoreError>> {
    let todo = todos.get(id).await?;

    Ok(todo.map(|todo| {
        Template::render(
            "todo_detail",
            context! {
                site_name: &settings.site_name,
                summary: todo.to_string(),
                todo: todo,
            },
        )
    }))
}

#[get("/")]
pub async fn get_all_todos(todos: Todos) -> Result<Json<Vec<Todo>>, Debug<StoreError>> {
    Ok(Json(todos.all().await?))
}

#[get("/<id>")]
pub async fn get_todo(todos: Todos, id: i32) -> Result<Option<Json<Todo>>, Debug<StoreError>> {
    Ok(todos.get(id).await?.map(Json))
}
