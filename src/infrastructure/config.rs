use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub nightscout: NightscoutDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen: String,
}

/// Fallbacks used when a request doesn't carry its own url/token query
/// parameters. Both optional; a request missing either with no fallback
/// configured is a client error.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NightscoutDefaults {
    pub default_url: Option<String>,
    pub default_token: Option<String>,
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("server.listen", "0.0.0.0:8080")?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(config::Environment::with_prefix("GLUCOPANEL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
