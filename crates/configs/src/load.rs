use {
    crate::Config,
    anyhow::{Context, Result, anyhow},
    std::path::Path,
    tokio::fs,
};

/// Load the deployment configuration from a TOML file.
pub async fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    let config = from_toml(&data).with_context(|| format!("invalid configuration file {path:?}"))?;
    tracing::debug!(?path, networks = config.networks.len(), "loaded configuration");
    Ok(config)
}

/// Parse the deployment configuration from TOML.
///
/// Not reporting the detailed parser error because it quotes the offending
/// input, which could leak private keys. Only the line is reported.
pub fn from_toml(data: &str) -> Result<Config> {
    toml::de::from_str(data).map_err(|err| match err.span() {
        Some(span) => {
            let line = data[..span.start].matches('\n').count() + 1;
            anyhow!("TOML error on line {line}")
        }
        None => anyhow!("TOML error"),
    })
}
