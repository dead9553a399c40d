use std::fmt;

/// The three load phases of a migration run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Categories,
    Chains,
    Hotels,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Categories => "categories",
            Phase::Chains => "chains",
            Phase::Hotels => "hotels",
        };
        f.write_str(name)
    }
}

/// Rows written versus rows that were already in storage for one insert call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted: usize,
    pub already_present: usize,
}

/// Counts and diagnostics for one committed load phase.
///
/// - `extracted`: distinct entities produced by extraction
/// - `skipped`: records dropped by extraction plus entities excluded by validation
/// - `duplicates`: ids coalesced inside the batch plus ids already in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub extracted: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub messages: Vec<String>,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            extracted: 0,
            inserted: 0,
            skipped: 0,
            duplicates: 0,
            messages: Vec::new(),
        }
    }
}

/// Outcome of a fully committed migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub categories: PhaseReport,
    pub chains: PhaseReport,
    pub hotels: PhaseReport,
}

impl MigrationReport {
    pub fn phases(&self) -> [&PhaseReport; 3] {
        [&self.categories, &self.chains, &self.hotels]
    }
}
