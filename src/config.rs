use rocket::figment::{self, Figment};
use serde::Deserialize;

/// Where todos are kept.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Postgres,
    Memory,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub site_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            site_name: "Sample Web".into(),
        }
    }
}

/// Rocket's figment, with `DATABASE_URL` overriding the pool url.
pub fn figment() -> Figment {
    let figment = rocket::Config::figment();
    match std::env::var("DATABASE_URL") {
        Ok(url) => figment.merge(("databases.sampleweb.url", url)),
        Err(_) => figment,
    }
}

pub fn storage(figment: &Figment) -> Result<Storage, figment::Error> {
    match figment.extract_inner::<Storage>("storage") {
        Err(e) if e.missing() => Ok(Storage::default()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_defaults_to_postgres() {
        assert_eq!(storage(&Figment::new()).unwrap(), Storage::Postgres);
    }

    #[test]
    fn storage_is_read_from_figment() {
        let figment = Figment::new().merge(("storage", "memory"));
        assert_eq!(storage(&figment).unwrap(), Storage::Memory);
    }

    #[test]
    fn unknown_storage_is_an_error() {
        let figment = Figment::new().merge(("storage", "floppy"));
        assert!(storage(&figment).is_err());
    }

    #[test]
    fn settings_fill_in_defaults() {
        let settings: Settings = Figment::new().extract().unwrap();
        assert_eq!(settings, Settings::default());

        let figment = Figment::new().merge(("site_name", "Todo Town"));
        let settings: Settings = figment.extract().unwrap();
        assert_eq!(settings.site_name, "Todo Town");
    }
}
