//! Members commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;
use flowsync_core::{Member, DEFAULT_PAGE_SIZE};

use super::{confirm, load_board, run_command};
use crate::cli::PageArgs;
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, status_badge, TableDisplay};

/// Member commands
#[derive(Debug, Args)]
pub struct MembersCommands {
    #[command(subcommand)]
    pub command: MembersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum MembersSubcommand {
    /// List members, optionally only those of one organization
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by role (ADMIN, MEMBER)
        #[arg(short, long)]
        role: Option<String>,

        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,

        /// Only members of this organization
        #[arg(long)]
        organization: Option<u64>,
    },

    /// Withdraw a member
    Delete {
        /// Member ID
        id: u64,

        /// Why the member is being withdrawn
        #[arg(short, long)]
        reason: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute member commands
pub async fn execute(ctx: &Context, cmd: MembersCommands) -> Result<()> {
    match cmd.command {
        MembersSubcommand::List {
            page,
            role,
            status,
            organization,
        } => list(ctx, page, role, status, organization).await,
        MembersSubcommand::Delete { id, reason, yes } => delete(ctx, id, reason, yes).await,
    }
}

impl TableDisplay for Member {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            Cell::new(&self.email),
            Cell::new(self.role.label()),
            Cell::new(self.organization_name.as_deref().unwrap_or("-")),
            Cell::new(self.job_title.as_deref().unwrap_or("-")),
            Cell::new(
                self.status
                    .map(|s| status_badge(s.label()))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }

    fn display_single(&self) {
        print_section("Member");
        print_field("ID", &self.id.to_string());
        print_field("Name", &self.name);
        print_field("Email", &self.email);
        print_field("Role", self.role.label());
        print_optional_field("Organization", self.organization_name.as_deref());
        print_optional_field("Phone", self.phone_num.as_deref());
        print_optional_field("Job", self.job_role.as_deref());
        print_optional_field("Title", self.job_title.as_deref());
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}\t{}", self.id, self.name, self.email, self.role.label());
    }
}

async fn list(
    ctx: &Context,
    page: PageArgs,
    role: Option<String>,
    status: Option<String>,
    organization: Option<u64>,
) -> Result<()> {
    let mut filters = page.to_filters(DEFAULT_PAGE_SIZE);
    if let Some(role) = role {
        filters = filters.with_role(role);
    }
    if let Some(status) = status {
        filters = filters.with_status(status);
    }

    let queries = ctx.queries()?;
    let state = match organization {
        Some(organization_id) => {
            let board = queries.organization_members(organization_id, filters);
            load_board(ctx, &board, "organization members").await?
        }
        None => {
            let board = queries.members(filters);
            load_board(ctx, &board, "members").await?
        }
    };

    ctx.output.write_page(
        state.items(),
        state.pagination.as_ref(),
        &["ID", "Name", "Email", "Role", "Organization", "Title", "Status"],
    )
}

async fn delete(ctx: &Context, id: u64, reason: String, yes: bool) -> Result<()> {
    if !confirm(ctx, &format!("Withdraw member {}?", id), yes)? {
        return Ok(());
    }

    let command = ctx.queries()?.delete_member();
    run_command(ctx, &command, (id, reason), &format!("Withdrew member: {}", id)).await?;
    Ok(())
}
