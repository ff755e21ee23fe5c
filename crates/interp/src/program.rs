//! Loaded program: the pattern table and the run sequence

use std::collections::HashMap;

/// One instruction record: the verbatim tokens of a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub tokens: Vec<String>,
    /// Source line (1-indexed)
    pub line: usize,
}

impl Instruction {
    pub fn new(tokens: Vec<String>, line: usize) -> Self {
        Instruction { tokens, line }
    }

    /// Opcode-position token, exactly as written
    pub fn opcode(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Argument tokens following the opcode
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

/// Pattern table and sequence produced by the loader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub patterns: HashMap<String, Vec<Instruction>>,
    /// Pattern names in run order; duplicates and unknown names allowed
    pub sequence: Vec<String>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_pattern(&self, name: &str) -> Option<&[Instruction]> {
        self.patterns.get(name).map(Vec::as_slice)
    }

    /// Upper bound on executed instructions: the sum of every sequenced pattern's length
    pub fn instruction_budget(&self) -> usize {
        self.sequence
            .iter()
            .filter_map(|name| self.find_pattern(name))
            .map(<[Instruction]>::len)
            .sum()
    }

    /// Pattern names, sorted, for stable listings
    pub fn pattern_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
