//! Loading of compiled contract artifacts.
//!
//! Both Hardhat (`artifacts/<path>/<File>.sol/<Name>.json`, bytecode as a hex
//! string) and Foundry (`out/<File>.sol/<Name>.json`, bytecode as an object)
//! layouts are understood.

use {
    crate::toolkit::ResolutionError,
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
        str::FromStr,
    },
    walkdir::WalkDir,
};

/// Directory holding the compiler's build info. It never contains contract
/// artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    /// Creation bytecode.
    pub bytecode: Bytes,
}

/// Library placeholders per source file and library name.
type LinkReferences = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    source_name: Option<String>,
    #[serde(default)]
    abi: JsonAbi,
    bytecode: RawBytecode,
    #[serde(default)]
    link_references: LinkReferences,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    #[serde(rename_all = "camelCase")]
    Object {
        object: String,
        #[serde(default)]
        link_references: LinkReferences,
    },
}

/// Finds and loads the artifact of the contract `name` below `dir`.
pub fn resolve(dir: &Path, name: &str) -> Result<Artifact, ResolutionError> {
    let (path, contract_name) = match name.rsplit_once(':') {
        Some((source, contract)) => {
            let path = dir.join(source).join(format!("{contract}.json"));
            if !path.is_file() {
                return Err(ResolutionError::NotFound { name: name.into() });
            }
            (path, contract)
        }
        None => (find(dir, name)?, name),
    };
    tracing::debug!(?path, "loading artifact");
    load(&path, contract_name)
}

fn find(dir: &Path, name: &str) -> Result<PathBuf, ResolutionError> {
    let file_name = format!("{name}.json");
    let mut candidates = Vec::new();
    let entries = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR);
    for entry in entries {
        let entry = entry.map_err(|err| ResolutionError::Io {
            path: err.path().unwrap_or(dir).to_path_buf(),
            source: err.into(),
        })?;
        // Exact file name comparison also skips Hardhat's `<Name>.dbg.json`.
        if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
            candidates.push(entry.into_path());
        }
    }

    match candidates.len() {
        0 => Err(ResolutionError::NotFound { name: name.into() }),
        1 => Ok(candidates.remove(0)),
        _ => {
            let mut candidates: Vec<_> = candidates
                .iter()
                .map(|path| fully_qualified_name(dir, path, name))
                .collect();
            candidates.sort();
            Err(ResolutionError::Ambiguous {
                name: name.into(),
                candidates,
            })
        }
    }
}

/// `contracts/Token.sol:MyToken` for `<dir>/contracts/Token.sol/MyToken.json`.
fn fully_qualified_name(dir: &Path, path: &Path, name: &str) -> String {
    let source = path
        .parent()
        .and_then(|parent| parent.strip_prefix(dir).ok())
        .unwrap_or(Path::new(""));
    format!("{}:{name}", source.display())
}

fn load(path: &Path, name: &str) -> Result<Artifact, ResolutionError> {
    let contents = std::fs::read(path).map_err(|source| ResolutionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawArtifact =
        serde_json::from_slice(&contents).map_err(|source| ResolutionError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let contract_name = raw.contract_name.unwrap_or_else(|| name.to_owned());
    let (code, link_references) = match raw.bytecode {
        RawBytecode::Hex(code) => (code, raw.link_references),
        RawBytecode::Object {
            object,
            link_references,
        } => (object, link_references),
    };

    if !link_references.is_empty() {
        let libraries = link_references
            .iter()
            .flat_map(|(source, libraries)| {
                libraries
                    .keys()
                    .map(move |library| format!("{source}:{library}"))
            })
            .collect();
        return Err(ResolutionError::Unlinked {
            name: contract_name,
            libraries,
        });
    }

    let bytecode =
        Bytes::from_str(code.trim()).map_err(|source| ResolutionError::InvalidBytecode {
            path: path.to_path_buf(),
            source,
        })?;
    if bytecode.is_empty() {
        return Err(ResolutionError::Abstract {
            name: contract_name,
        });
    }

    Ok(Artifact {
        contract_name,
        source_name: raw.source_name,
        abi: raw.abi,
        bytecode,
    })
}
