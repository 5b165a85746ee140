//! Access formula model and parser.
//!
//! Grammar:
//! ```text
//! formula   := node
//! node      := threshold | participant
//! threshold := 'T' digits '(' node (',' node)* ')'
//! participant := one or more characters other than '(' ')' ','
//! ```
//! Whitespace around tokens is ignored. `T<k>` with `k = 1` is an OR of its
//! children and `k = len(children)` is an AND.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display, str::FromStr};

use super::SharingError;

/// Deepest nesting of thresholds the parser accepts.
const MAX_DEPTH: usize = 64;

/// A node of the access structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaNode {
    Participant(String),
    Threshold {
        threshold: usize,
        children: Vec<FormulaNode>,
    },
}

impl FormulaNode {
    fn is_satisfied_by(&self, present: &HashSet<&str>) -> bool {
        match self {
            FormulaNode::Participant(name) => present.contains(name.as_str()),
            FormulaNode::Threshold {
                threshold,
                children,
            } => {
                children
                    .iter()
                    .filter(|child| child.is_satisfied_by(present))
                    .count()
                    >= *threshold
            }
        }
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            FormulaNode::Participant(name) => names.push(name),
            FormulaNode::Threshold { children, .. } => children
                .iter()
                .for_each(|child| child.collect_names(names)),
        }
    }
}

impl Display for FormulaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaNode::Participant(name) => f.write_str(name),
            FormulaNode::Threshold {
                threshold,
                children,
            } => {
                write!(f, "T{threshold}(")?;
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parsed, immutable access structure over a finite set of named
/// participants.
///
/// Two formulas are equal when their canonical text (see [`Display`]) is
/// equal, so formatting differences in the source text do not matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessFormula {
    root: FormulaNode,
    names: Vec<String>,
}

impl AccessFormula {
    pub fn parse(source: &str) -> Result<Self, SharingError> {
        let root = Parser::new(source).parse()?;

        let mut all_names = Vec::new();
        root.collect_names(&mut all_names);
        let mut seen = HashSet::new();
        let names = all_names
            .into_iter()
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect();

        Ok(Self { root, names })
    }

    /// The `T<k>(name_1,...,name_n)` shorthand for "any `k` of these `n`
    /// participants".
    pub fn threshold_shorthand(threshold: usize, names: &[impl AsRef<str>]) -> String {
        let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        format!("T{}({})", threshold, names.join(","))
    }

    /// Build a flat `k`-of-`n` formula.
    pub fn threshold(threshold: usize, names: &[impl AsRef<str>]) -> Result<Self, SharingError> {
        Self::parse(&Self::threshold_shorthand(threshold, names))
    }

    pub fn root(&self) -> &FormulaNode {
        &self.root
    }

    /// All distinct participant names, in order of first appearance.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of leaves naming `name`, which is also the number of values in
    /// that participant's share.
    pub fn leaf_count(&self, name: &str) -> usize {
        let mut all_names = Vec::new();
        self.root.collect_names(&mut all_names);
        all_names.into_iter().filter(|n| *n == name).count()
    }

    /// Whether the given set of participants is authorized by this formula.
    pub fn is_satisfied_by<'a>(&self, participants: impl IntoIterator<Item = &'a str>) -> bool {
        let present: HashSet<&str> = participants.into_iter().collect();
        self.root.is_satisfied_by(&present)
    }
}

impl Display for AccessFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl PartialEq for AccessFormula {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for AccessFormula {}

impl FromStr for AccessFormula {
    type Err = SharingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccessFormula {
    type Error = SharingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccessFormula> for String {
    fn from(formula: AccessFormula) -> Self {
        formula.to_string()
    }
}

/// Recursive descent parser over the characters of a formula.
struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    fn parse(mut self) -> Result<FormulaNode, SharingError> {
        let root = self.parse_node(0)?;
        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(root)
    }

    fn parse_node(&mut self, depth: usize) -> Result<FormulaNode, SharingError> {
        if depth > MAX_DEPTH {
            return Err(self.error("formula is nested too deeply"));
        }

        self.skip_whitespace();
        let token_start = self.position;
        let token = self.read_token();
        if token.is_empty() {
            return Err(self.error("expected a participant name or a threshold"));
        }

        self.skip_whitespace();
        if self.peek() != Some('(') {
            return Ok(FormulaNode::Participant(token));
        }

        let threshold =
            parse_threshold_token(&token).ok_or_else(|| SharingError::InvalidFormula {
                position: token_start,
                reason: format!("'{token}' is not a threshold of the form T<k>"),
            })?;
        self.position += 1;

        let mut children = vec![self.parse_node(depth + 1)?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.position += 1;
                    children.push(self.parse_node(depth + 1)?);
                }
                Some(')') => {
                    self.position += 1;
                    break;
                }
                Some(_) => return Err(self.error("expected ',' or ')'")),
                None => return Err(self.error("unterminated threshold")),
            }
        }

        if threshold == 0 || threshold > children.len() {
            return Err(SharingError::InvalidThreshold {
                threshold,
                children: children.len(),
            });
        }

        let mut siblings = HashSet::new();
        for child in &children {
            if let FormulaNode::Participant(name) = child {
                if !siblings.insert(name.as_str()) {
                    return Err(SharingError::DuplicateParticipant(name.clone()));
                }
            }
        }

        Ok(FormulaNode::Threshold {
            threshold,
            children,
        })
    }

    /// Read up to the next structural character and trim surrounding
    /// whitespace.
    fn read_token(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.peek() {
            if matches!(c, '(' | ')' | ',') {
                break;
            }
            self.position += 1;
        }
        self.chars[start..self.position]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn error(&self, reason: &str) -> SharingError {
        SharingError::InvalidFormula {
            position: self.position,
            reason: reason.to_string(),
        }
    }
}

fn parse_threshold_token(token: &str) -> Option<usize> {
    let digits = token.strip_prefix('T')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
