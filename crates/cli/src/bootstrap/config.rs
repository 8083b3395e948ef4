use resilient_dns_domain::{CliOverrides, Config};

/// Load, override and validate. Nothing is listening yet, so errors go to
/// stderr through `anyhow` rather than the log.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
