//! CLI argument definitions using clap
//!
//! Commands:
//! - easybook serve --config <path> [--port <port>]
//! - easybook query --config <path> --entity <table> [list parameters]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::query::RawQuery;

/// EasyBook - hotel booking API
#[derive(Parser, Debug)]
#[command(name = "easybook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./easybook.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one list query against the seeded store and print the rows
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./easybook.json")]
        config: PathBuf,

        #[command(flatten)]
        list: ListArgs,
    },
}

/// List parameters, same syntax as the HTTP query string
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Table to list, e.g. `hotel`
    #[arg(long)]
    pub entity: String,

    /// Filter. e.g. `col1:v1,col2:v2`
    #[arg(long)]
    pub query: Option<String>,

    /// Fields returned. e.g. `col1,col2`
    #[arg(long)]
    pub fields: Option<String>,

    /// Sorted-by fields. e.g. `col1,col2`
    #[arg(long)]
    pub sortby: Option<String>,

    /// Order per sortby field, or one for all. e.g. `desc,asc`
    #[arg(long)]
    pub order: Option<String>,

    #[arg(long)]
    pub limit: Option<String>,

    #[arg(long)]
    pub offset: Option<String>,
}

impl ListArgs {
    pub fn raw_query(&self) -> RawQuery {
        RawQuery {
            query: self.query.clone(),
            fields: self.fields.clone(),
            sortby: self.sortby.clone(),
            order: self.order.clone(),
            limit: self.limit.clone(),
            offset: self.offset.clone(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
