use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JWTSettings,
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminSettings>
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    // Browser origins allowed by CORS, "*" allows any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32
}

#[derive(Deserialize, Debug)]
pub struct JWTSettings{
    pub secret: SecretString,
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64
}

// Administrator created at startup when no user holds the username yet
#[derive(Deserialize, Debug)]
pub struct BootstrapAdminSettings{
    pub username: String,
    pub password: SecretString
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_connections() -> u32 {
    10
}

fn default_expiry_minutes() -> i64 {
    30
}

impl DatabaseSettings {
    // Url of the postgres server itself, used to create databases
    pub fn get_database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String {
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

impl Settings{
    pub fn get() -> Result<Self, ConfigError>{
        Self::from_file("configuration/base")
    }

    /// Reads `path` (extension optional, `.json` is picked up) and applies
    /// `APP__SECTION__KEY` environment overrides on top of it. Allowed origins
    /// are read from the environment as a comma separated list.
    pub fn from_file(path: &str) -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
