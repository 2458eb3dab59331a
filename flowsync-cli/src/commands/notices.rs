//! Notices commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use flowsync_core::{Notice, DEFAULT_PAGE_SIZE};

use super::{confirm, load_board, run_command};
use crate::cli::PageArgs;
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, TableDisplay};

/// Notice commands
#[derive(Debug, Args)]
pub struct NoticesCommands {
    #[command(subcommand)]
    pub command: NoticesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum NoticesSubcommand {
    /// List notices
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show deleted notices
        #[arg(long)]
        deleted: bool,
    },

    /// Delete a notice
    Delete {
        /// Notice ID
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute notice commands
pub async fn execute(ctx: &Context, cmd: NoticesCommands) -> Result<()> {
    match cmd.command {
        NoticesSubcommand::List {
            page,
            category,
            deleted,
        } => list(ctx, page, category, deleted).await,
        NoticesSubcommand::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

impl TableDisplay for Notice {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.category),
            Cell::new(&self.title),
            Cell::new(self.priority.as_deref().unwrap_or("-")),
            Cell::new(self.reg_at.as_deref().unwrap_or("-")),
        ]
    }

    fn display_single(&self) {
        print_section("Notice");
        print_field("ID", &self.id.to_string());
        print_field("Title", &self.title);
        print_field("Category", &self.category);
        print_optional_field("Priority", self.priority.as_deref());
        print_optional_field("Posted", self.reg_at.as_deref());
        print_optional_field("Content", self.content.as_deref());
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}", self.id, self.category, self.title);
    }
}

async fn list(
    ctx: &Context,
    page: PageArgs,
    category: Option<String>,
    deleted: bool,
) -> Result<()> {
    let mut filters = page.to_filters(DEFAULT_PAGE_SIZE);
    if let Some(category) = category {
        filters = filters.with_category(category);
    }
    if deleted {
        filters = filters.with_is_deleted("true");
    }

    let board = ctx.queries()?.notices(filters);
    let state = load_board(ctx, &board, "notices").await?;

    ctx.output.write_page(
        state.items(),
        state.pagination.as_ref(),
        &["ID", "Category", "Title", "Priority", "Posted"],
    )
}

async fn delete(ctx: &Context, id: u64, yes: bool) -> Result<()> {
    if !confirm(ctx, &format!("Delete notice {}?", id), yes)? {
        return Ok(());
    }

    let command = ctx.queries()?.delete_notice();
    run_command(ctx, &command, id, &format!("Deleted notice: {}", id)).await?;
    Ok(())
}
