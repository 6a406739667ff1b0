//! The deployment procedure: resolve the contract's factory, submit the
//! deployment, wait for it to be confirmed and report the address.
//!
//! Every step either succeeds or fails the whole deployment. There are no
//! retries and nothing is rolled back; a submitted deployment cannot be
//! withdrawn.

use {
    crate::traits::FactoryResolver,
    alloy::primitives::Address,
    anyhow::{Context, Result},
    std::{fmt, io::Write, time::Duration},
};

/// What it takes for a deployment to count as confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Number of blocks, including the one the deployment was included in,
    /// that have to be mined. At least 1.
    pub confirmations: u64,
    /// Give up waiting after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: None,
        }
    }
}

/// The steps of a deployment. Used to tell which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingFactory,
    Submitting,
    Confirming,
    ReadingAddress,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ResolvingFactory => "resolving contract factory",
            Self::Submitting => "submitting deployment",
            Self::Confirming => "waiting for deployment confirmation",
            Self::ReadingAddress => "reading deployed contract address",
        })
    }
}

/// Deploys a new instance of `contract` and writes its address to `out`.
///
/// Every call deploys a new instance, nothing is reused.
pub async fn deploy(
    resolver: &dyn FactoryResolver,
    contract: &str,
    policy: &Policy,
    out: &mut impl Write,
) -> Result<Address> {
    let factory = resolver
        .resolve(contract)
        .await
        .context(Stage::ResolvingFactory)?;
    tracing::debug!(contract, "resolved contract factory");

    let mut deployment = factory.deploy().await.context(Stage::Submitting)?;
    tracing::debug!(contract, "submitted deployment");

    deployment
        .wait_for_deployment(policy)
        .await
        .context(Stage::Confirming)?;
    tracing::debug!(contract, confirmations = policy.confirmations, "deployment confirmed");

    let address = deployment.address().await.context(Stage::ReadingAddress)?;
    tracing::info!(contract, %address, "contract deployed");

    writeln!(out, "Contract deployed to: {address}").context("failed to report address")?;
    Ok(address)
}
