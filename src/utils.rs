//! Utils

use clap::Parser;

use crate::catalog::CategoryFilter;

/// Arguments for the ordering demo
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Menu fixture to load from `./fixtures`
    #[clap(short, long, default_value = "menu")]
    pub fixture: String,

    /// Category to show ("all" shows every section)
    #[clap(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Search text matched against names and descriptions
    #[clap(short, long, default_value = "")]
    pub search: String,
}
