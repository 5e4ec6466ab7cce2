/// Lookahead used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 5;

/// Settings the search engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Lookahead in plies. A pass costs one ply. At zero, `negamax` returns the
    /// static evaluation, but a computer turn still plays: each legal move is
    /// scored by the evaluation of the board it leads to.
    pub depth: u8,
    /// Worker threads for a dedicated pool. `None` runs on rayon's global pool.
    pub threads: Option<usize>,
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            threads: None,
        }
    }
}
