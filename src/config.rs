use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(deserialize_with = "deserialize_secret")]
    pub database_url: SecretString,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub questions_per_page: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl Settings {
    /// Defaults, then `trivia.toml` if present, then the environment (and `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_sources(
            Config::builder()
                .add_source(File::with_name("trivia").required(false))
                .add_source(Environment::default().try_parsing(false)),
        )
    }

    fn from_sources(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("questions_per_page", 10)?
            .set_default("max_connections", 5)?
            .build()?
            .try_deserialize()?;
        if settings.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "questions_per_page must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
