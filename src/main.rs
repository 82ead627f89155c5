mod config;
mod forms;
mod models;
mod pages;
mod schema;
mod store;
mod todos;


#[macro_use]
extern crate rocket;

use rocket::{fairing::AdHoc, figment::Figment, Build, Rocket};
use rocket_dyn_templates::Template;

use config::{Settings, Storage};
use store::{Db, MemoryStore};

#[derive(Debug, thiserror::Error)]
enum LaunchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] rocket::figment::Error),
    #[error(transparent)]
    Rocket(#[from] rocket::Error),
}

pub fn rocket(figment: Figment) -> Result<Rocket<Build>, rocket::figment::Error> {
    let storage = config::storage(&figment)?;

    let rocket = rocket::custom(figment)
        .attach(Template::fairing())
        .attach(AdHoc::config::<Settings>())
        .attach(AdHoc::on_liftoff("Storage", move |_| {
            Box::pin(async move { log::info!("todos are kept in {:?} storage", storage) })
        }))
        .mount(
            "/",
            routes![
                pages::home,
                pages::welcome,
                pages::friends,
                pages::about,
                pages::contact,
                todos::new_todo,
                todos::create_todo,
                todos::todo_detail,
            ],
        )
        .mount("/api/todos", routes![todos::get_all_todos, todos::get_todo]);

    Ok(match storage {
        Storage::Postgres => rocket.attach(Db::fairing()),
        Storage::Memory => rocket.manage(MemoryStore::default()),
    })
}

#[rocket::main]
async fn main() -> Result<(), LaunchError> {
    dotenvy::dotenv().ok();

    let _rocket = rocket(config::figment())?.launch().await?;

    Ok(())
}
