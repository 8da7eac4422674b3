use crate::http::PgClient;
use thiserror::Error;
use tokio_postgres::{Config, NoTls};
use tracing::{debug, error, trace};

/// Connection settings for the persistence target, read from `.env`.
#[derive(Debug)]
pub struct DbConfig {
    pub host: String,
    pub dbname: String,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("FUNDODB_USER and FUNDODB_PASSWORD must be set together; only {0} was provided")]
    HalfPair(&'static str),
}

impl DbConfig {
    /// Read the target host and database from the environment.
    ///
    /// Leaving both `FUNDODB_USER` and `FUNDODB_PASSWORD` unset selects
    /// trusted (OS) authentication; setting only one of them is a
    /// misconfiguration and fails here, before any connection attempt.
    pub fn from_env() -> Result<Self, CredentialError> {
        let host =
            dotenv::var("FUNDODB_HOST").map_err(|_| CredentialError::Missing("FUNDODB_HOST"))?;
        let dbname =
            dotenv::var("FUNDODB_NAME").map_err(|_| CredentialError::Missing("FUNDODB_NAME"))?;
        let user = dotenv::var("FUNDODB_USER").ok();
        let password = dotenv::var("FUNDODB_PASSWORD").ok();

        match (&user, &password) {
            (Some(_), None) => return Err(CredentialError::HalfPair("FUNDODB_USER")),
            (None, Some(_)) => return Err(CredentialError::HalfPair("FUNDODB_PASSWORD")),
            _ => {}
        }

        Ok(Self {
            host,
            dbname,
            user,
            password,
        })
    }

    pub fn trusted(&self) -> bool {
        self.user.is_none()
    }

    /// Open a connection to the target, spawning the connection driver task.
    pub async fn connect(&self) -> anyhow::Result<PgClient> {
        let mut config = Config::new();
        config.host(&self.host).dbname(&self.dbname);
        if self.trusted() {
            trace!("no credentials supplied; using trusted authentication");
            if let Ok(user) = std::env::var("USER") {
                config.user(&user);
            }
        } else if let (Some(user), Some(password)) = (&self.user, &self.password) {
            config.user(user).password(password);
        }

        let (client, connection) = config.connect(NoTls).await.map_err(|err| {
            error!(
                "failed to connect to '{}' on '{}', error({err})",
                self.dbname, self.host
            );
            err
        })?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!("database connection error: {err}");
            }
        });
        debug!("connected to '{}' on '{}'", self.dbname, self.host);

        Ok(client)
    }
}
