use {
    crate::driver::Policy,
    std::{path::PathBuf, time::Duration},
};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Path to the deployment configuration file. This file should be in
    /// TOML format, see `config.toml` at the root of the repository.
    #[clap(long, env, default_value = "config.toml")]
    pub config: PathBuf,

    /// Name of the configured network to deploy to. Defaults to the
    /// configuration's `default-network`, or the only configured network.
    #[clap(long, env)]
    pub network: Option<String>,

    /// Name of the contract to deploy.
    #[clap(long, env, default_value = "TrustLayer")]
    pub contract: String,

    /// Directory holding the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Number of blocks that have to be mined, including the one the
    /// deployment was included in, before it counts as confirmed.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub confirmations: u64,

    /// Stop waiting for the deployment to be confirmed after this long, e.g.
    /// "2m". Waits indefinitely by default.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,

    /// The log filter.
    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,ethrpc=info,contracts=info,configs=info"
    )]
    pub log: String,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

impl Args {
    pub fn policy(&self) -> Policy {
        Policy {
            confirmations: self.confirmations,
            timeout: self.confirmation_timeout,
        }
    }
}

impl std::fmt::Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "config: {:?}", self.config)?;
        writeln!(f, "network: {:?}", self.network)?;
        writeln!(f, "contract: {}", self.contract)?;
        writeln!(f, "artifacts: {:?}", self.artifacts)?;
        writeln!(f, "confirmations: {}", self.confirmations)?;
        writeln!(f, "confirmation_timeout: {:?}", self.confirmation_timeout)?;
        writeln!(f, "log: {}", self.log)?;
        write!(f, "use_json_logs: {}", self.use_json_logs)
    }
}
