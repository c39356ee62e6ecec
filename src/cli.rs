use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::constants::DEFAULT_MANAGED_SCOPE;

#[derive(Parser, Debug)]
#[command(
    name = "depbump",
    version,
    about = "Guided major-version migrations for JavaScript projects"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project directory containing package.json"
    )]
    pub dir: String,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_MANAGED_SCOPE,
        help = "Managed dependency namespace prefix (e.g. @acme/)"
    )]
    pub scope: String,
    #[arg(
        long,
        global = true,
        default_value_t = false,
        help = "Answer yes to every compatibility prompt"
    )]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate the project from React 17 to React 18
    React,
    /// Migrate the project from Node 20 to Node 22
    Node,
    /// Run the compatibility gate without mutating anything
    Check {
        #[arg(long, value_enum, default_value_t = CheckTarget::React)]
        target: CheckTarget,
    },
    /// Inspect the project and environment for migration readiness
    Doctor,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckTarget {
    React,
    Node,
}
