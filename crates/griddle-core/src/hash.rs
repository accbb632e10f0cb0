use crate::{Error, Result};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::sync::Arc;

/// A "hash bytes, return bytes" capability.
pub type HashFn = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// Named algorithms the hasher resolves out of the box.
pub const SUPPORTED_ALGORITHMS: &[&str] = &["sha224", "sha256", "sha384", "sha512"];

/// Known test value hashed once at configuration time to validate the
/// composed algorithm list.
const PROBE: &[u8] = b"testing all algorithms for errors";

/// One configured algorithm: a name from [`SUPPORTED_ALGORITHMS`] or a
/// custom callable.
pub enum AlgorithmSpec {
    Name(String),
    Custom { label: String, hash: HashFn },
}

impl AlgorithmSpec {
    pub fn name(name: impl Into<String>) -> Self {
        AlgorithmSpec::Name(name.into())
    }

    pub fn custom(
        label: impl Into<String>,
        hash: impl Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    ) -> Self {
        AlgorithmSpec::Custom {
            label: label.into(),
            hash: Arc::new(hash),
        }
    }
}

/// The one-way hashing collaborator for password-like fields.
///
/// Folds the salted input through the configured algorithm chain for a
/// number of iterations and returns the hex digest. The chain is validated
/// once, at configuration time; an invalid entry is a fatal configuration
/// error identifying the algorithm.
pub struct Hasher {
    algorithms: Vec<(String, HashFn)>,
    iterations: u32,
}

impl Hasher {
    /// The default chain: sha384 then sha512.
    pub fn new() -> Self {
        Self {
            algorithms: vec![
                ("sha384".to_string(), digest_fn::<Sha384>()),
                ("sha512".to_string(), digest_fn::<Sha512>()),
            ],
            iterations: 1_000,
        }
    }

    /// Builds a hasher from the given algorithm list, validating each entry
    /// by hashing a known test value.
    pub fn with_algorithms(specs: Vec<AlgorithmSpec>) -> Result<Self> {
        let mut algorithms = Vec::with_capacity(specs.len());
        for spec in specs {
            match spec {
                AlgorithmSpec::Name(name) => {
                    let hash = builtin(&name).ok_or_else(|| {
                        Error::invalid_algorithm(
                            &name,
                            format!(
                                "not in the supported set ({})",
                                SUPPORTED_ALGORITHMS.join(", ")
                            ),
                        )
                    })?;
                    algorithms.push((name, hash));
                }
                AlgorithmSpec::Custom { label, hash } => algorithms.push((label, hash)),
            }
        }

        if algorithms.is_empty() {
            return Err(Error::invalid_algorithm(
                "<empty>",
                "at least one algorithm must be configured",
            ));
        }

        let mut digest = PROBE.to_vec();
        for (label, hash) in &algorithms {
            digest = hash(&digest);
            if digest.is_empty() {
                return Err(Error::invalid_algorithm(label, "produced an empty digest"));
            }
        }

        Ok(Self {
            algorithms,
            iterations: 1_000,
        })
    }

    /// Sets the iteration count (at least 1).
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Hashes `value` seasoned with `salt` and `pepper`, returning the hex
    /// digest of the final round.
    pub fn hash(&self, value: &str, salt: &str, pepper: &str) -> String {
        let mut bytes = interleave(value.as_bytes(), salt.as_bytes(), pepper.as_bytes());
        for _ in 0..self.iterations {
            for (_, hash) in &self.algorithms {
                bytes = hash(&bytes);
            }
        }
        hex::encode(bytes)
    }

    /// Labels of the configured algorithms, in order.
    pub fn algorithm_labels(&self) -> Vec<&str> {
        self.algorithms
            .iter()
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithms", &self.algorithm_labels())
            .field("iterations", &self.iterations)
            .finish()
    }
}

fn digest_fn<D: Digest>() -> HashFn {
    Arc::new(|bytes: &[u8]| D::digest(bytes).as_slice().to_vec())
}

fn builtin(name: &str) -> Option<HashFn> {
    match name.to_ascii_lowercase().as_str() {
        "sha224" => Some(digest_fn::<Sha224>()),
        "sha256" => Some(digest_fn::<Sha256>()),
        "sha384" => Some(digest_fn::<Sha384>()),
        "sha512" => Some(digest_fn::<Sha512>()),
        _ => None,
    }
}

/// Interleaves the value bytes with cycled salt and pepper bytes. Empty
/// seasonings contribute nothing; the value always contributes fully.
fn interleave(value: &[u8], salt: &[u8], pepper: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() * 3);
    for (index, byte) in value.iter().enumerate() {
        if !salt.is_empty() {
            out.push(salt[index % salt.len()]);
        }
        out.push(*byte);
        if !pepper.is_empty() {
            out.push(pepper[index % pepper.len()]);
        }
    }
    if value.is_empty() {
        out.extend_from_slice(salt);
        out.extend_from_slice(pepper);
    }
    out
}
