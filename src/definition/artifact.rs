use super::index::ElementIndex;
use super::model::ProcessDefinition;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

const ARTIFACT_VERSION: u32 = 1;

/// A validated process definition in binary form.
///
/// Loading skips JSON parsing and condition conversion; the graph and group-shape
/// checks are run again so a tampered artifact is still rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompiledProcess {
    version: u32,
    pub definition: ProcessDefinition,
}

impl CompiledProcess {
    pub fn new(definition: ProcessDefinition) -> Result<Self, ArtifactError> {
        ElementIndex::build(&definition)?;
        Ok(Self {
            version: ARTIFACT_VERSION,
            definition,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Codec(format!("Serialization failed: {}", e)))
    }

    /// Saves the compiled process to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| io_error(path, e))?;
        file.write_all(&bytes).map_err(|e| io_error(path, e))?;
        Ok(())
    }

    /// Loads a compiled process from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| io_error(path, e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| io_error(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes and re-validates a compiled process.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let (compiled, _): (CompiledProcess, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| ArtifactError::Codec(format!("Deserialization failed: {}", e)))?;
        if compiled.version != ARTIFACT_VERSION {
            return Err(ArtifactError::Codec(format!(
                "Unsupported artifact version {} (expected {})",
                compiled.version, ARTIFACT_VERSION
            )));
        }
        ElementIndex::build(&compiled.definition)?;
        Ok(compiled)
    }

    pub fn into_definition(self) -> ProcessDefinition {
        self.definition
    }
}

fn io_error(path: &str, e: std::io::Error) -> ArtifactError {
    ArtifactError::Io {
        path: path.to_string(),
        message: e.to_string(),
    }
}
