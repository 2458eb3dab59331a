//! Organizations commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use flowsync_core::{Organization, DEFAULT_PAGE_SIZE};

use super::{confirm, load_board, run_command};
use crate::cli::PageArgs;
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, status_badge, TableDisplay};

/// Organization commands
#[derive(Debug, Args)]
pub struct OrganizationsCommands {
    #[command(subcommand)]
    pub command: OrganizationsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum OrganizationsSubcommand {
    /// List organizations
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by type (CUSTOMER, DEVELOPER)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Filter by status (ACTIVE, INACTIVE)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Flip an organization between active and inactive
    ToggleStatus {
        /// Organization ID
        id: u64,
    },

    /// Delete an organization
    Delete {
        /// Organization ID
        id: u64,

        /// Why the organization is being removed
        #[arg(short, long)]
        reason: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute organization commands
pub async fn execute(ctx: &Context, cmd: OrganizationsCommands) -> Result<()> {
    match cmd.command {
        OrganizationsSubcommand::List { page, kind, status } => {
            list(ctx, page, kind, status).await
        }
        OrganizationsSubcommand::ToggleStatus { id } => toggle_status(ctx, id).await,
        OrganizationsSubcommand::Delete { id, reason, yes } => delete(ctx, id, reason, yes).await,
    }
}

impl TableDisplay for Organization {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(self.kind.label()),
            Cell::new(&self.name),
            Cell::new(self.br_number.as_deref().unwrap_or("-")),
            Cell::new(self.phone_number.as_deref().unwrap_or("-")),
            Cell::new(status_badge(self.status.label())),
        ]
    }

    fn display_single(&self) {
        print_section("Organization");
        print_field("ID", &self.id.to_string());
        print_field("Name", &self.name);
        print_field("Type", self.kind.label());
        print_field("Status", &status_badge(self.status.label()));
        print_optional_field("Business number", self.br_number.as_deref());
        print_optional_field("Phone", self.phone_number.as_deref());

        let address = self.full_address();
        if !address.is_empty() {
            print_field("Address", &address);
        }
    }

    fn display_compact(&self) {
        println!(
            "{}\t{}\t{}\t{}",
            self.id,
            self.kind.label(),
            self.name,
            self.status.label()
        );
    }
}

async fn list(
    ctx: &Context,
    page: PageArgs,
    kind: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let mut filters = page.to_filters(DEFAULT_PAGE_SIZE);
    if let Some(kind) = kind {
        filters = filters.with_kind(kind);
    }
    if let Some(status) = status {
        filters = filters.with_status(status);
    }

    let board = ctx.queries()?.organizations(filters);
    let state = load_board(ctx, &board, "organizations").await?;

    ctx.output.write_page(
        state.items(),
        state.pagination.as_ref(),
        &["ID", "Type", "Name", "Business No.", "Phone", "Status"],
    )
}

async fn toggle_status(ctx: &Context, id: u64) -> Result<()> {
    let command = ctx.queries()?.toggle_organization_status();
    let response = run_command(
        ctx,
        &command,
        id,
        &format!("Changed status of organization: {}", id),
    )
    .await?;

    if let Some(organization) = response.into_data() {
        ctx.output.write(&organization)?;
    }
    Ok(())
}

async fn delete(ctx: &Context, id: u64, reason: String, yes: bool) -> Result<()> {
    if !confirm(ctx, &format!("Delete organization {}?", id), yes)? {
        return Ok(());
    }

    let command = ctx.queries()?.delete_organization();
    run_command(
        ctx,
        &command,
        (id, reason),
        &format!("Deleted organization: {}", id),
    )
    .await?;
    Ok(())
}
