pub mod db;
pub mod fundamentus;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
    pub(crate) use tokio_postgres::Client as PgClient;
}

/// Chrome on Windows; Fundamentus rejects the default reqwest agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the shared scraping client, with a `USER_AGENT` override read from
/// the `.env` file when present.
pub fn std_client_build() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .user_agent(dotenv::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()))
        .build()
        .expect("failed to build reqwest client")
}

pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
