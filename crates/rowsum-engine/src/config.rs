use derive_builder::Builder;

use crate::cursor::CursorKind;
use crate::error::EngineError;
use crate::partition::Strategy;

/// How one run splits the matrix across threads.
///
/// ```
/// use rowsum_engine::{EngineConfig, Strategy};
///
/// let config = EngineConfig::builder()
///     .threads(4)
///     .strategy(Strategy::Dynamic)
///     .build()
///     .unwrap();
/// assert_eq!(config.chunk, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, serde::Serialize)]
#[builder(build_fn(validate = "Self::validate", error = "EngineError"))]
pub struct EngineConfig {
    pub threads: usize,

    #[builder(default)]
    pub strategy: Strategy,

    /// Cursor implementation used by the dynamic strategy
    #[builder(default)]
    pub cursor: CursorKind,

    /// Rows per dynamic claim; the static strategy ignores it
    #[builder(default = "1")]
    pub chunk: usize,

    /// Keep the claimed row indices in each worker state
    #[builder(default)]
    pub record_rows: bool,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), EngineError> {
        if self.threads == Some(0) {
            return Err(EngineError::ZeroThreads);
        }
        if self.chunk == Some(0) {
            return Err(EngineError::ZeroChunk);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::builder().threads(2).build().unwrap();
        assert_eq!(config.strategy, Strategy::Static);
        assert_eq!(config.cursor, CursorKind::Locked);
        assert_eq!(config.chunk, 1);
        assert!(!config.record_rows);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = EngineConfig::builder().threads(0).build().unwrap_err();
        assert!(matches!(err, EngineError::ZeroThreads));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let err = EngineConfig::builder().threads(1).chunk(0).build().unwrap_err();
        assert!(matches!(err, EngineError::ZeroChunk));
    }

    #[test]
    fn test_threads_required() {
        let err = EngineConfig::builder().build().unwrap_err();
        assert!(matches!(err, EngineError::MissingSetting("threads")));
    }
}
