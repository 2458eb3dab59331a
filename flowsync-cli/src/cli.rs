//! Command-line arguments

use clap::{ArgAction, Args, Parser, Subcommand};
use flowsync_core::ListFilters;
use std::path::PathBuf;

use crate::commands::{
    links::LinksCommands, members::MembersCommands, notices::NoticesCommands,
    organizations::OrganizationsCommands, projects::ProjectsCommands,
};
use crate::output::OutputFormat;

/// Administer FlowSync projects, organizations, members and notices
#[derive(Debug, Parser)]
#[command(name = "flowsync", version, about, propagate_version = true)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token used to authenticate
    #[arg(long, global = true, env = "FLOWSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file to load on top of the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project boards
    Projects(ProjectsCommands),

    /// Customer and developer organizations
    Organizations(OrganizationsCommands),

    /// Member accounts
    Members(MembersCommands),

    /// Notices
    Notices(NoticesCommands),

    /// Link reachability checks
    Links(LinksCommands),
}

/// Filters shared by every list command.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Search keyword
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Dashboard query string, e.g. "keyword=api&status=IN_PROGRESS&currentPage=2"
    #[arg(short, long)]
    pub query: Option<String>,
}

impl PageArgs {
    /// Start from `--query` (or the defaults) and apply the explicit flags.
    pub fn to_filters(&self, default_page_size: u32) -> ListFilters {
        let mut filters = match &self.query {
            Some(query) => ListFilters::from_query_str(query, default_page_size),
            None => ListFilters::new(default_page_size),
        };

        if let Some(keyword) = &self.keyword {
            filters = filters.with_keyword(keyword.as_str());
        }
        if let Some(page) = self.page {
            filters = filters.with_page(page);
        }
        if let Some(page_size) = self.page_size {
            filters = filters.with_page_size(page_size);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_query_string() {
        let args = PageArgs {
            keyword: Some("portal".to_string()),
            page: Some(3),
            page_size: None,
            query: Some("keyword=billing&currentPage=2&pageSize=20".to_string()),
        };

        let filters = args.to_filters(5);

        assert_eq!(filters.keyword.as_deref(), Some("portal"));
        assert_eq!(filters.current_page, 3);
        assert_eq!(filters.page_size, 20);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = PageArgs {
            keyword: None,
            page: None,
            page_size: None,
            query: None,
        };

        assert_eq!(args.to_filters(10), ListFilters::new(10));
    }

    #[test]
    fn test_parse_nested_command() {
        let cli = Cli::try_parse_from([
            "flowsync",
            "-o",
            "json",
            "organizations",
            "list",
            "--type",
            "CUSTOMER",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Organizations(_)));
    }
}
