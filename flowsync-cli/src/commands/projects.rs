//! Projects commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use flowsync_core::{Project, DEFAULT_PROJECT_PAGE_SIZE};

use super::load_board;
use crate::cli::PageArgs;
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, status_badge, TableDisplay};

/// Project board commands
#[derive(Debug, Args)]
pub struct ProjectsCommands {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsSubcommand {
    /// List projects
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by status (CONTRACT, IN_PROGRESS, COMPLETED, MAINTENANCE, PAUSED, DELETED)
        #[arg(short, long)]
        status: Option<String>,
    },
}

/// Execute project commands
pub async fn execute(ctx: &Context, cmd: ProjectsCommands) -> Result<()> {
    match cmd.command {
        ProjectsSubcommand::List { page, status } => list(ctx, page, status).await,
    }
}

impl TableDisplay for Project {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            Cell::new(status_badge(self.status.label())),
            Cell::new(self.customer_name.as_deref().unwrap_or("-")),
            Cell::new(self.developer_name.as_deref().unwrap_or("-")),
            Cell::new(self.start_at.as_deref().unwrap_or("-")),
            Cell::new(self.close_at.as_deref().unwrap_or("-")),
        ]
    }

    fn display_single(&self) {
        print_section("Project");
        print_field("ID", &self.id.to_string());
        print_field("Name", &self.name);
        print_field("Status", &status_badge(self.status.label()));
        print_optional_field("Customer", self.customer_name.as_deref());
        print_optional_field("Developer", self.developer_name.as_deref());
        print_optional_field("Start", self.start_at.as_deref());
        print_optional_field("Close", self.close_at.as_deref());
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}", self.id, self.name, self.status.as_str());
    }
}

async fn list(ctx: &Context, page: PageArgs, status: Option<String>) -> Result<()> {
    let mut filters = page.to_filters(DEFAULT_PROJECT_PAGE_SIZE);
    if let Some(status) = status {
        filters = filters.with_status(status);
    }

    let board = ctx.queries()?.projects(filters);
    let state = load_board(ctx, &board, "projects").await?;

    ctx.output.write_page(
        state.items(),
        state.pagination.as_ref(),
        &["ID", "Name", "Status", "Customer", "Developer", "Start", "Close"],
    )
}
