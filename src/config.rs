use crate::queue::SIZE_BIG;

/// Plain-struct configuration for a single `generate`/`generate_memoized`
/// call, mirroring this crate's lineage's own plain-struct `PPOptions`
/// rather than reaching for an external config-file crate this generator
/// has no use for (it has no files to read -- every caller constructs a
/// `GenConfig` in process).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenConfig {
    /// Whether the BFS driver captures each dequeued pith under a bound
    /// local name before testing it, versus re-evaluating the pith
    /// expression inline everywhere it's referenced. A performance
    /// optimization, not a correctness requirement -- both strategies
    /// produce semantically equivalent generated code.
    pub capture_piths : bool,
    /// Work-queue preallocation, overridable so tests can exercise
    /// `HintCodegenError::HintTooLarge` without building an enormous hint.
    pub queue_capacity : usize,
    /// Whether the sized-sequence handler's random index is wired through
    /// a bound `random.getrandbits`-equivalent callable (`true`, the
    /// default) or a deterministic stand-in so golden-output tests see
    /// stable generated text (`false`).
    pub bind_random_bits : bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            capture_piths : true,
            queue_capacity : SIZE_BIG,
            bind_random_bits : true,
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = GenConfig::default();
        assert!(cfg.capture_piths);
        assert_eq!(cfg.queue_capacity, SIZE_BIG);
        assert!(cfg.bind_random_bits);
    }
}
