use std::env;

/// Process-wide configuration, loaded once at startup and passed explicitly
/// to the components that need it. No other code reads the environment.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
            server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Production tightens TLS requirements toward the database.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
