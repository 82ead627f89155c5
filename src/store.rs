use std::sync::Arc;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::request::{self, FromRequest, Request};
use rocket::tokio::sync::Mutex;
use rocket_sync_db_pools::database;

use crate::models::{NewTodo, Todo};
use crate::schema::todos;

#[database("sampleweb")]
pub struct Db(diesel::PgConnection);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("database error: {0}")]
    Database(#[source] DieselError),
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => StoreError::Integrity(info.message().to_string()),
            other => StoreError::Database(other),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    table: Arc<Mutex<MemoryTable>>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: i32,
    rows: Vec<Todo>,
    #[cfg(test)]
    refusal: Option<String>,
}

impl MemoryStore {
    pub async fn all(&self) -> Vec<Todo> {
        let table = self.table.lock().await;
        table.rows.iter().rev().cloned().collect()
    }

    pub async fn get(&self, id: i32) -> Option<Todo> {
        let table = self.table.lock().await;
        table.rows.iter().find(|todo| todo.id == id).cloned()
    }

    pub async fn insert(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut table = self.table.lock().await;
        #[cfg(test)]
        if let Some(message) = table.refusal.take() {
            return Err(StoreError::Integrity(message));
        }
        table.last_id += 1;

        let todo = Todo {
            id: table.last_id,
            title: new.title,
            is_done: new.is_done,
            added_date: new.added_date,
        };
        table.rows.push(todo.clone());
        Ok(todo)
    }

    /// Makes the next insert fail like a constraint violation would.
    #[cfg(test)]
    pub fn refuse_next(&self, message: &str) {
        let mut table = self.table.try_lock().expect("memory table is idle");
        table.refusal = Some(message.to_string());
    }
}

pub enum Todos {
    Postgres(Db),
    Memory(MemoryStore),
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Todos {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, ()> {
        if let Some(store) = req.rocket().state::<MemoryStore>() {
            return request::Outcome::Success(Todos::Memory(store.clone()));
        }

        Db::from_request(req).await.map(Todos::Postgres)
    }
}

impl Todos {
    pub async fn all(&self) -> Result<Vec<Todo>, StoreError> {
        match self {
            Todos::Postgres(db) => db
                .run(|c| todos::table.order(todos::id.desc()).load::<Todo>(c))
                .await
                .map_err(StoreError::from),
            Todos::Memory(store) => Ok(store.all().await),
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        match self {
            Todos::Postgres(db) => db
                .run(move |c| todos::table.find(id).first::<Todo>(c).optional())
                .await
                .map_err(StoreError::from),
            Todos::Memory(store) => Ok(store.get(id).await),
        }
    }

    pub async fn insert(&self, new: NewTodo) -> Result<Todo, StoreError> {
        match self {
            Todos::Postgres(db) => db
                .run(move |c| {
                    diesel::insert_into(todos::table)
                        .values(new)
                        .get_result::<Todo>(c)
                })
                .await
                .map_err(StoreError::from),
            Todos::Memory(store) => store.insert(new).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.into(),
            is_done: false,
            added_date: Some(Utc::now()),
        }
    }

    #[rocket::async_test]
    async fn memory_store_assigns_sequential_ids() {
        let store = MemoryStore::default();

        let first = store.insert(new_todo("first")).await.unwrap();
        let second = store.insert(new_todo("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).await, Some(second));
        assert_eq!(store.get(3).await, None);
    }

    #[rocket::async_test]
    async fn memory_store_lists_newest_first() {
        let store = MemoryStore::default();
        store.insert(new_todo("older")).await.unwrap();
        store.insert(new_todo("newer")).await.unwrap();

        let titles: Vec<_> = store.all().await.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[rocket::async_test]
    async fn clones_share_one_table() {
        let store = MemoryStore::default();
        store.clone().insert(new_todo("shared")).await.unwrap();

        assert_eq!(store.all().await.len(), 1);
    }

    #[rocket::async_test]
    async fn refused_insert_stores_nothing() {
        let store = MemoryStore::default();
        store.refuse_next("duplicate key value");

        let refused = store.insert(new_todo("dup")).await;
        assert!(matches!(refused, Err(StoreError::Integrity(m)) if m == "duplicate key value"));
        assert!(store.all().await.is_empty());

        let next = store.insert(new_todo("dup")).await.unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn constraint_violations_are_integrity_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value")),
        );

        match StoreError::from(error) {
            StoreError::Integrity(message) => assert_eq!(message, "duplicate key value"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_errors_stay_database_errors() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::Database(DieselError::NotFound)
        ));
    }
}
