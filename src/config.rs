use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote mood API, e.g. "http://localhost:5000/api".
    pub api_base_url: String,
    /// Path of the local cache blob (full serialized entry list, one file).
    pub cache_path: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("MOODMATE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".into()),
            cache_path: env::var("MOODMATE_CACHE_PATH")
                .unwrap_or_else(|_| "moodmate-entries.json".into()),
            http_timeout_secs: env::var("MOODMATE_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            cache_path: "moodmate-entries.json".into(),
            http_timeout_secs: 30,
        }
    }
}
