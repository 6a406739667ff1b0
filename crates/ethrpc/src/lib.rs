mod instrumentation;
mod wallet;

pub use wallet::wallet;
use {
    alloy::{
        network::{Ethereum, EthereumWallet, NetworkWallet},
        primitives::Address,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    anyhow::{Context, Result, bail},
    instrumentation::InstrumentationLayer,
    url::Url,
};

pub type AlloyProvider = DynProvider;

/// A provider connected to a single network together with the wallet that
/// signs the transactions sent through it.
#[derive(Debug, Clone)]
pub struct Web3 {
    pub provider: AlloyProvider,
    pub wallet: EthereumWallet,
}

impl Web3 {
    /// Connects to the network `name` at `url`, signing with `accounts`.
    ///
    /// This is where the network descriptor gets validated: a malformed URL
    /// or private key is reported here. Errors never include the offending
    /// values since both may be secret.
    pub fn new(name: &str, url: &str, accounts: &[String]) -> Result<Self> {
        let wallet =
            wallet(accounts).with_context(|| format!("invalid accounts for network {name:?}"))?;
        let provider = provider(name, url, wallet.clone())?;
        Ok(Self { provider, wallet })
    }

    /// The address of the first configured account.
    pub fn default_signer_address(&self) -> Address {
        <EthereumWallet as NetworkWallet<Ethereum>>::default_signer_address(&self.wallet)
    }
}

/// Builds a provider for the node at `url` that signs transactions with
/// `wallet`. Every request is traced with the network `name`.
pub fn provider(name: &str, url: &str, wallet: EthereumWallet) -> Result<AlloyProvider> {
    let url: Url = url
        .parse()
        .with_context(|| format!("invalid RPC url for network {name:?}"))?;
    match url.scheme() {
        "http" | "https" => (),
        scheme => bail!("unsupported RPC url scheme {scheme:?} for network {name:?}"),
    }

    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer {
            label: name.to_string(),
        })
        .http(url);
    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased())
}
