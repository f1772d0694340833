use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file path, or `:memory:` for an in-memory store.
    pub db_file: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_file: env::var("DB_FILE").unwrap_or_else(|_| "data.sqlite".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
