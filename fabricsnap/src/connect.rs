use std::time::Duration;

use anyhow::{bail, Context, Result};
use fabricsnap::config::{self, Config};
use fabricsnap::source::{ClassSource, DirSource, HttpOptions, HttpSource};

use crate::cli::SourceArgs;

/// Build the payload source from CLI flags and config: a payload directory
/// when `--from-dir` is given, a live controller session otherwise.
pub fn build_source(args: &SourceArgs, config: &Config) -> Result<Box<dyn ClassSource>> {
    if let Some(dir) = &args.from_dir {
        if !dir.is_dir() {
            bail!("payload directory {} does not exist", dir.display());
        }
        return Ok(Box::new(DirSource::new(dir)));
    }

    let host = args
        .host
        .clone()
        .unwrap_or_else(|| config.controller.host.clone());
    if host.is_empty() {
        bail!("no controller host configured; pass --host or set controller.host in the config file");
    }
    let username = args
        .username
        .clone()
        .unwrap_or_else(|| config.controller.username.clone());
    if username.is_empty() {
        bail!("no controller username configured; pass --username or set controller.username");
    }
    let password = config::password_from_env().with_context(|| {
        format!(
            "controller password not set; export it via {}",
            config::PASSWORD_ENV
        )
    })?;

    let options = HttpOptions {
        timeout: Duration::from_secs(args.timeout_secs.unwrap_or(config.controller.timeout_secs)),
        verify_tls: config.controller.verify_tls && !args.insecure,
    };
    let source = HttpSource::login(&host, &username, &password, &options)
        .with_context(|| format!("failed to establish a session with {host}"))?;
    Ok(Box::new(source))
}
