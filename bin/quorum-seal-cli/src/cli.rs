//! Command-line arguments

use clap::{ArgGroup, Args, Parser, Subcommand};
use quorum_seal::types::operations::FormulaRequest;
use std::path::PathBuf;

use crate::error::CliError;

#[derive(Debug, Parser)]
pub struct Cli {
    /// Path to the service config file. Built-in defaults are used if this
    /// is not provided.
    #[clap(long)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a new key and write one share file per participant.
    Split {
        #[clap(flatten)]
        formula: FormulaArgs,
        /// Directory for the share files and `public_key.json`.
        #[clap(long)]
        out: PathBuf,
    },
    /// Sign a document with enough shares to restore the key.
    Sign {
        #[clap(long)]
        document: PathBuf,
        /// Share files, separated by commas.
        #[clap(long, value_delimiter = ',', required = true)]
        shares: Vec<PathBuf>,
        /// Where to write the signed document.
        #[clap(long)]
        out: PathBuf,
    },
    /// Reshare a key under a new access formula.
    Reissue {
        /// Share files under the current formula, separated by commas.
        #[clap(long, value_delimiter = ',', required = true)]
        shares: Vec<PathBuf>,
        #[clap(flatten)]
        formula: FormulaArgs,
        /// Directory for the new share files and `public_key.json`.
        #[clap(long)]
        out: PathBuf,
    },
    /// Check the signature embedded in a document.
    Verify {
        #[clap(long)]
        document: PathBuf,
        #[clap(long)]
        public_key: PathBuf,
    },
}

/// Either `--threshold` with `--names`, or `--formula`.
#[derive(Debug, Args)]
#[clap(group(ArgGroup::new("access").required(true).args(&["threshold", "formula"])))]
pub struct FormulaArgs {
    /// Number of participants needed to use the key.
    #[clap(long, requires = "names")]
    pub threshold: Option<usize>,
    /// Participant names, separated by commas.
    #[clap(long, value_delimiter = ',')]
    pub names: Vec<String>,
    /// Access formula, e.g. `T1(T2(Alice,Bob),Carol)`.
    #[clap(long, conflicts_with = "names")]
    pub formula: Option<String>,
}

impl FormulaArgs {
    pub fn to_request(&self) -> Result<FormulaRequest, CliError> {
        match (self.threshold, &self.formula) {
            (Some(threshold), None) => Ok(FormulaRequest::Threshold {
                threshold,
                names: self.names.clone(),
            }),
            (None, Some(formula)) => Ok(FormulaRequest::Formula {
                formula: formula.clone(),
            }),
            _ => Err(CliError::MissingFormula),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_arguments_become_a_request() {
        let cli = Cli::parse_from([
            "quorum-seal-cli",
            "split",
            "--threshold",
            "2",
            "--names",
            "Alice,Bob,Carol",
            "--out",
            "shares",
        ]);
        let Command::Split { formula, out } = cli.command else {
            panic!("expected split");
        };
        assert_eq!(out, PathBuf::from("shares"));
        assert_eq!(
            formula.to_request().unwrap(),
            FormulaRequest::Threshold {
                threshold: 2,
                names: vec!["Alice".into(), "Bob".into(), "Carol".into()],
            }
        );
    }

    #[test]
    fn a_formula_is_required() {
        let result = Cli::try_parse_from(["quorum-seal-cli", "split", "--out", "shares"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "quorum-seal-cli",
            "reissue",
            "--shares",
            "a.share.json",
            "--threshold",
            "1",
            "--formula",
            "T1(A,B)",
            "--out",
            "shares",
        ]);
        assert!(result.is_err());
    }
}
