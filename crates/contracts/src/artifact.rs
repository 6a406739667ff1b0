use {
    crate::Error,
    alloy::primitives::Bytes,
    serde::{Deserialize, de::DeserializeOwned},
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

/// Library placeholders in the bytecode, by source file and library name.
/// The offsets themselves are not needed.
type LinkReferences = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// A compiled contract that is ready to be deployed.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Where the artifact was loaded from.
    pub path: PathBuf,
    pub contract_name: String,
    /// The source file declaring the contract, relative to the project root.
    pub source_name: String,
    /// Creation code.
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    source_name: String,
    bytecode: String,
    #[serde(default)]
    link_references: LinkReferences,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Header {
    contract_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildInfo {
    solc_version: String,
}

impl Artifact {
    /// Reads only the contract name a JSON file declares, without checking
    /// that the rest of it is a deployable artifact.
    pub(crate) fn declared_name(path: &Path) -> Result<String, Error> {
        read_json::<Header>(path).map(|header| header.contract_name)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw: RawArtifact = read_json(path)?;

        if !raw.link_references.is_empty() {
            return Err(Error::UnlinkedLibraries {
                name: raw.contract_name,
                libraries: raw
                    .link_references
                    .iter()
                    .flat_map(|(source, libraries)| {
                        libraries.keys().map(move |library| format!("{source}:{library}"))
                    })
                    .collect(),
            });
        }

        let bytecode = alloy::primitives::hex::decode(raw.bytecode.trim())
            .map_err(|_| Error::MalformedBytecode(path.to_path_buf()))?;
        if bytecode.is_empty() {
            return Err(Error::EmptyBytecode(raw.contract_name));
        }

        tracing::debug!(?path, contract = %raw.contract_name, "loaded artifact");
        Ok(Self {
            path: path.to_path_buf(),
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            bytecode: bytecode.into(),
        })
    }

    /// The version of the compiler that produced this artifact, as recorded
    /// in the build info referenced by the artifact's debug file. Returns
    /// `None` when there is no debug file next to the artifact.
    pub fn compiler_version(&self) -> Result<Option<String>, Error> {
        let debug_file = self.path.with_extension("dbg.json");
        if !debug_file.is_file() {
            tracing::debug!(?debug_file, "no debug file for artifact");
            return Ok(None);
        }

        let DebugFile { build_info } = read_json(&debug_file)?;
        let build_info = match debug_file.parent() {
            Some(dir) => dir.join(build_info),
            None => build_info,
        };
        let BuildInfo { solc_version } = read_json(&build_info)?;
        Ok(Some(solc_version))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
