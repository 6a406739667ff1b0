//! Lookup of compiled contract artifacts.
//!
//! The solidity compiler toolchain writes one JSON artifact per contract
//! into an artifacts directory laid out as
//! `<root>/contracts/<Source>.sol/<Contract>.json`. Next to each artifact it
//! writes a `<Contract>.dbg.json` pointing at the build info of the
//! compilation that produced it, which records the compiler version.

pub use artifact::Artifact;
use std::{
    fs,
    path::{Path, PathBuf},
};

mod artifact;

/// Directory name under the artifacts root holding per-compilation build
/// info. Never contains contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no artifact for contract {name:?} found under {root:?}")]
    NotFound { name: String, root: PathBuf },
    #[error("multiple artifacts for contract {name:?}: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("contract {0:?} has no bytecode; it is abstract or an interface")]
    EmptyBytecode(String),
    #[error("contract {name:?} needs libraries to be linked: {libraries:?}")]
    UnlinkedLibraries { name: String, libraries: Vec<String> },
    #[error("artifact {0:?} has malformed bytecode")]
    MalformedBytecode(PathBuf),
    #[error("I/O error while reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An artifacts directory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds and loads the artifact of the contract with the given name.
    ///
    /// The conventional location for a contract declared in a source file of
    /// the same name is tried first. Otherwise the whole directory is
    /// searched for artifacts declaring that contract name.
    pub fn find(&self, name: &str) -> Result<Artifact, Error> {
        let conventional = self
            .root
            .join("contracts")
            .join(format!("{name}.sol"))
            .join(format!("{name}.json"));
        if conventional.is_file() {
            return Artifact::load(&conventional);
        }

        let mut candidates = Vec::new();
        collect_json_files(&self.root, name, &mut candidates)?;
        let mut matches = Vec::new();
        for path in candidates {
            match Artifact::declared_name(&path) {
                Ok(declared) if declared == name => matches.push(path),
                Ok(declared) => {
                    tracing::debug!(?path, %declared, "skipping artifact of other contract")
                }
                Err(err) => tracing::debug!(?path, ?err, "skipping file that is not an artifact"),
            }
        }

        match matches.len() {
            0 => Err(Error::NotFound {
                name: name.to_string(),
                root: self.root.clone(),
            }),
            1 => Artifact::load(&matches[0]),
            _ => Err(Error::Ambiguous {
                name: name.to_string(),
                paths: matches,
            }),
        }
    }
}

/// Recursively collects `<name>.json` files below `dir`, skipping build info.
fn collect_json_files(dir: &Path, name: &str, found: &mut Vec<PathBuf>) -> Result<(), Error> {
    let io = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let file_name = format!("{name}.json");
    let mut entries = fs::read_dir(dir)
        .map_err(io)?
        .map(|entry| entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io)?;
    // Deterministic order for error messages.
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (path, file_type) in entries {
        let Some(entry_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        // Symlinked directories are not followed, they may form cycles.
        if file_type.is_dir() {
            if entry_name != BUILD_INFO_DIR {
                collect_json_files(&path, name, found)?;
            }
        } else if entry_name == file_name && path.is_file() {
            found.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs};

    fn artifact_json(name: &str, bytecode: &str) -> String {
        serde_json::json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{name}.sol"),
            "abi": [],
            "bytecode": bytecode,
            "deployedBytecode": "0x00",
            "linkReferences": {},
            "deployedLinkReferences": {},
        })
        .to_string()
    }

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn finds_conventional_location() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/TrustLayer.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x6001600c60003960016000f300"),
        );

        let artifact = Artifacts::new(dir.path()).find("TrustLayer").unwrap();
        assert_eq!(artifact.contract_name, "TrustLayer");
        assert_eq!(artifact.source_name, "contracts/TrustLayer.sol");
        assert_eq!(artifact.bytecode.len(), 13);
    }

    #[test]
    fn searches_other_source_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/nested/Trust.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x00"),
        );
        write(
            dir.path(),
            "contracts/nested/Trust.sol/TrustLayer.dbg.json",
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../../build-info/a.json"}"#,
        );
        write(dir.path(), "build-info/TrustLayer.json", "not an artifact");

        let artifact = Artifacts::new(dir.path()).find("TrustLayer").unwrap();
        assert!(artifact.path.ends_with("contracts/nested/Trust.sol/TrustLayer.json"));
    }

    #[test]
    fn missing_contract() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/Other.sol/Other.json",
            &artifact_json("Other", "0x00"),
        );

        let err = Artifacts::new(dir.path()).find("TrustLayer").unwrap_err();
        assert!(matches!(err, Error::NotFound { name, .. } if name == "TrustLayer"));
    }

    #[test]
    fn search_skips_files_that_are_not_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/nested/Trust.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x00"),
        );
        write(
            dir.path(),
            "deployments/ganache/TrustLayer.json",
            r#"{"address":"0x31aa312dA17359581818b332B0e5e25211834c73"}"#,
        );
        write(dir.path(), "scratch/TrustLayer.json", "not json");

        let artifact = Artifacts::new(dir.path()).find("TrustLayer").unwrap();
        assert!(artifact.path.ends_with("contracts/nested/Trust.sol/TrustLayer.json"));
    }

    #[test]
    fn search_reports_errors_of_matching_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/nested/Trust.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x"),
        );

        let err = Artifacts::new(dir.path()).find("TrustLayer").unwrap_err();
        assert!(matches!(err, Error::EmptyBytecode(name) if name == "TrustLayer"));
    }

    #[cfg(unix)]
    #[test]
    fn search_does_not_follow_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/nested/Trust.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x00"),
        );
        std::os::unix::fs::symlink(dir.path(), dir.path().join("contracts/nested/loop")).unwrap();

        let artifact = Artifacts::new(dir.path()).find("TrustLayer").unwrap();
        assert!(artifact.path.ends_with("contracts/nested/Trust.sol/TrustLayer.json"));
    }

    #[test]
    fn missing_artifacts_directory() {
        let err = Artifacts::new("/does/not/exist").find("TrustLayer").unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn ambiguous_contract() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/A.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x00"),
        );
        write(
            dir.path(),
            "contracts/B.sol/TrustLayer.json",
            &artifact_json("TrustLayer", "0x00"),
        );

        let err = Artifacts::new(dir.path()).find("TrustLayer").unwrap_err();
        let Error::Ambiguous { paths, .. } = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(paths.len(), 2);
    }
}
