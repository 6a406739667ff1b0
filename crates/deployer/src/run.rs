use {
    crate::{chain, cli, driver},
    alloy::primitives::Address,
    anyhow::Result,
    clap::Parser,
    contracts::Artifacts,
    ethrpc::Web3,
    std::{io::Write, process::ExitCode},
};

/// Runs the deployment as a command line program: parses `args`, sets up
/// logging, deploys and reports the outcome.
///
/// On failure the whole error chain is written to stderr and the returned
/// code is non-zero. Nothing is written to stdout in that case.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = cli::Args::parse_from(args);
    observe::tracing::initialize(&observe::Config::new(&args.log, args.use_json_logs));
    tracing::info!("running deployer with arguments:\n{}", args);

    ExitCode::from(report(run(&args, &mut std::io::stdout()).await))
}

/// Writes a failed run's error chain to stderr and returns the process exit
/// status: 0 on success, 1 on failure.
fn report(result: Result<Address>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {err:?}");
            1
        }
    }
}

/// Loads the configuration named by `args` and deploys the contract to the
/// selected network, writing the result line to `out`.
pub async fn run(args: &cli::Args, out: &mut impl Write) -> Result<Address> {
    let config = configs::load(&args.config).await?;
    tracing::debug!("loaded configuration:\n{}", config);
    let (name, network) = config.select_network(args.network.as_deref())?;
    tracing::info!(
        network = name,
        compiler_version = %config.compiler_version,
        "deploying"
    );

    let web3 = Web3::new(name, &network.url, &network.accounts)?;
    let resolver = chain::Resolver::new(
        Artifacts::new(&args.artifacts),
        config.compiler_version.clone(),
        web3,
    );
    driver::deploy(&resolver, &args.contract, &args.policy(), out).await
}
