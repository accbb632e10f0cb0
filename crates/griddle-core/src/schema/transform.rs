use crate::config::Settings;
use crate::hash::Hasher;
use crate::value::Value;
use crate::{Error, Result};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Alphabet used for generated random strings.
pub const RANDOM_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&*+-=?@^_";

/// A value transform attached to a field descriptor.
///
/// Invoked exactly once per field per record construction, before the
/// record's fields are staged: with the supplied value when one was given,
/// or with no value for transforms that do not require an argument (the
/// auto-generation case).
#[derive(Clone)]
pub enum Transform {
    /// Clamps numeric input to the declared bounds.
    Clamp { min: Option<f64>, max: Option<f64> },

    /// Generates a random string of the declared length, ignoring any
    /// supplied value. The length is resolved from the owning field when
    /// the hook is collected.
    RandomString { length: Option<usize> },

    /// One-way hashes the supplied value through the configured hashing
    /// entry point.
    PasswordHash,

    /// A caller-provided transform.
    Custom(Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>),
}

/// Collaborators a transform may need at application time.
#[derive(Clone, Default)]
pub struct TransformContext {
    pub hasher: Option<Arc<Hasher>>,
}

impl TransformContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves the password-hashing entry point from a settings store.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hasher: settings.hasher("password_hasher").ok(),
        }
    }
}

impl Transform {
    /// False for transforms that generate a value when none is supplied.
    pub fn requires_argument(&self) -> bool {
        !matches!(self, Transform::RandomString { .. })
    }

    /// Applies the transform to the supplied value (or to nothing, for
    /// generating transforms).
    pub fn apply(&self, supplied: Option<Value>, cx: &TransformContext) -> Result<Value> {
        match self {
            Transform::Clamp { min, max } => {
                let value = required(supplied, "clamp")?;
                clamp(value, *min, *max)
            }
            Transform::RandomString { length } => {
                let length = length.ok_or_else(|| {
                    Error::configuration("random string field has no declared length")
                })?;
                Ok(Value::String(random_string(length)))
            }
            Transform::PasswordHash => {
                let value = required(supplied, "password")?;
                let hasher = cx.hasher.as_deref().ok_or_else(|| {
                    Error::configuration(
                        "password hashing entry point is not configured \
                         (set the `password_hasher` setting)",
                    )
                })?;
                let plain = match value {
                    Value::String(plain) => plain,
                    Value::I64(n) => n.to_string(),
                    Value::F64(n) => n.to_string(),
                    other => {
                        return Err(Error::configuration(format!(
                            "password field cannot hash a {} value",
                            other.type_name()
                        )))
                    }
                };
                Ok(Value::String(hasher.hash(&plain, "", "")))
            }
            Transform::Custom(transform) => {
                let value = required(supplied, "custom")?;
                transform(value)
            }
        }
    }
}

fn required(supplied: Option<Value>, what: &str) -> Result<Value> {
    supplied.ok_or_else(|| err!("{what} transform requires an input value"))
}

fn clamp(value: Value, min: Option<f64>, max: Option<f64>) -> Result<Value> {
    match value {
        Value::F64(mut v) => {
            if let Some(min) = min {
                v = v.max(min);
            }
            if let Some(max) = max {
                v = v.min(max);
            }
            Ok(Value::F64(v))
        }
        Value::I64(mut v) => {
            if let Some(min) = min {
                v = v.max(min.ceil() as i64);
            }
            if let Some(max) = max {
                v = v.min(max.floor() as i64);
            }
            Ok(Value::I64(v))
        }
        other => Err(Error::configuration(format!(
            "clamp transform applied to a {} value",
            other.type_name()
        ))),
    }
}

fn random_string(length: usize) -> String {
    let alphabet: Vec<char> = RANDOM_ALPHABET.chars().collect();
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Clamp { min, max } => f
                .debug_struct("Clamp")
                .field("min", min)
                .field("max", max)
                .finish(),
            Transform::RandomString { length } => f
                .debug_struct("RandomString")
                .field("length", length)
                .finish(),
            Transform::PasswordHash => f.write_str("PasswordHash"),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
