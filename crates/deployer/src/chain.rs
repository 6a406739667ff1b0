//! Deployments backed by compiled artifacts and a real node.

use {
    crate::{
        driver::Policy,
        traits::{ContractFactory, DeploymentHandle, FactoryResolver},
    },
    alloy::{
        network::{Ethereum, ReceiptResponse, TransactionBuilder},
        primitives::{Address, B256, Bytes},
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, bail},
    contracts::Artifacts,
    ethrpc::Web3,
};

/// Resolves factories from an artifacts directory. Artifacts built with a
/// compiler other than the configured one are rejected.
pub struct Resolver {
    artifacts: Artifacts,
    compiler_version: String,
    web3: Web3,
}

impl Resolver {
    pub fn new(artifacts: Artifacts, compiler_version: String, web3: Web3) -> Self {
        Self {
            artifacts,
            compiler_version,
            web3,
        }
    }
}

#[async_trait::async_trait]
impl FactoryResolver for Resolver {
    async fn resolve(&self, name: &str) -> Result<Box<dyn ContractFactory>> {
        // Walking the artifacts directory is blocking file system work.
        let artifacts = self.artifacts.clone();
        let contract = name.to_string();
        let (artifact, compiler_version) = tokio::task::spawn_blocking(move || {
            let artifact = artifacts.find(&contract)?;
            let compiler_version = artifact.compiler_version()?;
            Ok::<_, contracts::Error>((artifact, compiler_version))
        })
        .await
        .context("artifact lookup task failed")??;
        match compiler_version {
            Some(version) if version != self.compiler_version => bail!(
                "artifact {:?} was compiled with solc {version} but {} is configured",
                artifact.path,
                self.compiler_version
            ),
            Some(_) => (),
            None => tracing::debug!(
                path = ?artifact.path,
                "compiler version of artifact unknown, not checking it"
            ),
        }

        tracing::debug!(
            path = ?artifact.path,
            source = %artifact.source_name,
            size = artifact.bytecode.len(),
            "using artifact"
        );
        Ok(Box::new(Factory {
            bytecode: artifact.bytecode,
            web3: self.web3.clone(),
        }))
    }
}

/// Deploys creation code from the default signer of the wallet.
pub struct Factory {
    bytecode: Bytes,
    web3: Web3,
}

#[async_trait::async_trait]
impl ContractFactory for Factory {
    async fn deploy(&self) -> Result<Box<dyn DeploymentHandle>> {
        let from = self.web3.default_signer_address();
        // Fixing the nonce up front makes the contract address known before
        // the transaction is mined.
        let nonce = self
            .web3
            .provider
            .get_transaction_count(from)
            .pending()
            .await
            .context("failed to fetch deployer nonce")?;
        let address = from.create(nonce);

        let tx = TransactionRequest::default()
            .from(from)
            .nonce(nonce)
            .with_deploy_code(self.bytecode.clone());
        let pending = self
            .web3
            .provider
            .send_transaction(tx)
            .await
            .context("failed to send deployment transaction")?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(?tx_hash, %from, nonce, %address, "deployment transaction submitted");

        Ok(Box::new(Deployment {
            pending: Some(pending),
            tx_hash,
            address,
        }))
    }
}

pub struct Deployment {
    /// Taken once the deployment is awaited.
    pending: Option<PendingTransactionBuilder<Ethereum>>,
    tx_hash: B256,
    address: Address,
}

#[async_trait::async_trait]
impl DeploymentHandle for Deployment {
    async fn wait_for_deployment(&mut self, policy: &Policy) -> Result<()> {
        let pending = self
            .pending
            .take()
            .context("deployment was already awaited")?;
        let receipt = pending
            .with_required_confirmations(policy.confirmations)
            .with_timeout(policy.timeout)
            .get_receipt()
            .await
            .with_context(|| format!("failed to confirm transaction {:?}", self.tx_hash))?;

        if !receipt.status() {
            bail!(
                "deployment transaction {:?} reverted in block {:?}",
                self.tx_hash,
                receipt.block_number
            );
        }
        match receipt.contract_address {
            Some(address) if address == self.address => (),
            Some(address) => {
                tracing::warn!(
                    expected = %self.address,
                    actual = %address,
                    "contract deployed to unexpected address"
                );
                self.address = address;
            }
            None => bail!(
                "receipt of transaction {:?} has no contract address",
                self.tx_hash
            ),
        }

        tracing::info!(
            tx_hash = ?self.tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "deployment transaction confirmed"
        );
        Ok(())
    }

    async fn address(&self) -> Result<Address> {
        Ok(self.address)
    }
}
