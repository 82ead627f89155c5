use chrono::Local;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::{Debug, Redirect};
use rocket::request::{self, FromRequest, Request};
use rocket::{Orbit, Rocket, State};
use rocket_dyn_templates::{context, Template};

use crate::config::Settings;
use crate::store::{StoreError, Todos};

pub const FRIENDS: [&str; 6] = [
    "Ajay",
    "Ashvini",
    "Omprakash",
    "Nabajyoti",
    "Chandrasekhar",
    "Mahendra",
];

pub const ABOUT_DESCRIPTION: &str = "this is about page description";

#[get("/")]
pub async fn home(
    todos: Todos,
    settings: &State<Settings>,
) -> Result<Template, Debug<StoreError>> {
    let todos = todos.all().await?;

    Ok(Template::render(
        "home",
        context! { site_name: &settings.site_name, todos: todos },
    ))
}

#[get("/welcome/<name>")]
pub fn welcome(name: &str, settings: &State<Settings>) -> Template {
    let date = Local::now().format("%A, %d %B, %Y at %X").to_string();

    Template::render(
        "welcome",
        context! { site_name: &settings.site_name, name: name, date: date },
    )
}

#[get("/friends")]
pub fn friends(settings: &State<Settings>) -> Template {
    Template::render(
        "friends-list",
        context! { site_name: &settings.site_name, friends: FRIENDS },
    )
}

/// The running instance, for rendering templates by hand.
pub struct Launched<'r>(&'r Rocket<Orbit>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Launched<'r> {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, ()> {
        request::Outcome::Success(Launched(req.rocket()))
    }
}

#[get("/about")]
pub fn about(
    launched: Launched<'_>,
    settings: &State<Settings>,
) -> Result<RawHtml<String>, Status> {
    let context = context! {
        site_name: &settings.site_name,
        description: ABOUT_DESCRIPTION,
    };

    Template::show(launched.0, "about", context)
        .map(RawHtml)
        .ok_or_else(|| {
            log::error!("template `about` could not be rendered");
            Status::InternalServerError
        })
}

#[get("/contact")]
pub fn contact() -> Redirect {
    Redirect::found(uri!(about))
}
