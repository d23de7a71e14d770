use ferrous_acme_dns_domain::{CliOverrides, Config};

/// Runs before logging is installed, so failures are returned, not logged.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
