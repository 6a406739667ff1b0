//! Deployment configuration: the compiler version the build artifacts are
//! expected to be produced with and the networks contracts can be deployed
//! to.
//!
//! The configuration is a plain value. It does not validate RPC URLs or
//! signing credentials; those are only parsed when a network is actually
//! used to connect to a node.

pub use load::{from_toml, load};
use {
    anyhow::{Result, bail},
    serde::Deserialize,
    std::{collections::BTreeMap, fmt},
};

mod load;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Semantic version of the solidity compiler the build artifacts are
    /// expected to be compiled with.
    pub compiler_version: String,

    /// Network used when none is requested explicitly.
    #[serde(default)]
    pub default_network: Option<String>,

    /// Networks by name.
    #[serde(default)]
    pub networks: BTreeMap<String, Network>,
}

/// A named RPC endpoint together with the credentials used to sign
/// transactions sent to it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Network {
    /// The node RPC API endpoint.
    pub url: String,

    /// Private keys in the order they should be used. The first one signs
    /// deployments.
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl Config {
    /// Looks up a network by name.
    pub fn network(&self, name: &str) -> Result<&Network> {
        match self.networks.get(name) {
            Some(network) => Ok(network),
            None => bail!(
                "network {name:?} is not configured; known networks: {:?}",
                self.networks.keys().collect::<Vec<_>>()
            ),
        }
    }

    /// Picks the network to deploy to: the requested one if any, otherwise
    /// the configured default, otherwise the only configured network.
    pub fn select_network<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Result<(&'a str, &'a Network)> {
        let name = match (requested, self.default_network.as_deref()) {
            (Some(name), _) | (None, Some(name)) => name,
            (None, None) => {
                let mut names = self.networks.keys();
                match (names.next(), names.next()) {
                    (Some(name), None) => name.as_str(),
                    (None, _) => bail!("no networks configured"),
                    _ => bail!(
                        "no network selected and no default network configured; pick one of \
                         {:?}",
                        self.networks.keys().collect::<Vec<_>>()
                    ),
                }
            }
        };
        Ok((name, self.network(name)?))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compiler_version: {}", self.compiler_version)?;
        writeln!(f, "default_network: {:?}", self.default_network)?;
        for (name, network) in &self.networks {
            writeln!(f, "network {name}: {network:?}")?;
        }
        Ok(())
    }
}

/// Manual impl instead of relying on a derived one to avoid accidentally
/// printing secrets. Both the URL (which can embed API keys) and the accounts
/// are printed as "SECRET".
impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("url", &"SECRET")
            .field("accounts", &format_args!("{} x SECRET", self.accounts.len()))
            .finish()
    }
}
