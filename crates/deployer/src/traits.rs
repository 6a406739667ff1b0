//! Trait definitions for the external toolchain the driver talks to.
//!
//! These traits abstract artifact lookup and blockchain interactions to
//! enable unit testing with mocks.

use {
    crate::driver::Policy,
    alloy::primitives::Address,
    anyhow::Result,
};

/// Resolves contract factories by contract name.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FactoryResolver: Send + Sync {
    /// Fails if there is no deployable build artifact for `name`.
    async fn resolve(&self, name: &str) -> Result<Box<dyn ContractFactory>>;
}

/// Produces deployments of one contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submits a transaction creating a new contract instance. Returns as soon
    /// as the node accepted the transaction.
    async fn deploy(&self) -> Result<Box<dyn DeploymentHandle>>;
}

/// A submitted deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeploymentHandle: Send + Sync {
    /// Waits until the deployment transaction is included and confirmed as
    /// required by `policy`. Fails if the transaction reverted.
    async fn wait_for_deployment(&mut self, policy: &Policy) -> Result<()>;

    /// The address of the deployed contract.
    async fn address(&self) -> Result<Address>;
}
