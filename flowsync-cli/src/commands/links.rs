//! Link commands

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use comfy_table::Cell;
use flowsync_core::Link;
use flowsync_query::LinkEditor;
use flowsync_sdk::{normalize_url, ReachabilityProbe};
use serde::Serialize;
use std::sync::Arc;

use crate::context::{Context, Reported};
use crate::output::{print_field, print_section, ConsoleSink, TableDisplay};

/// Link commands
#[derive(Debug, Args)]
pub struct LinksCommands {
    #[command(subcommand)]
    pub command: LinksSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum LinksSubcommand {
    /// Check whether links exist before attaching them
    Check {
        /// Links to check; `https://` is assumed when no scheme is given
        #[arg(required = true)]
        urls: Vec<String>,

        /// Only accept a 2xx status instead of any response
        #[arg(long)]
        strict: bool,
    },

    /// Validate one named link and print it ready to attach
    Add {
        /// Display name of the link
        #[arg(short, long, default_value = "")]
        name: String,

        /// Link target
        #[arg(short, long, default_value = "")]
        url: String,

        /// Only accept a 2xx status instead of any response
        #[arg(long)]
        strict: bool,
    },
}

/// Execute link commands
pub async fn execute(ctx: &Context, cmd: LinksCommands) -> Result<()> {
    match cmd.command {
        LinksSubcommand::Check { urls, strict } => check(ctx, urls, strict).await,
        LinksSubcommand::Add { name, url, strict } => add(ctx, name, url, strict).await,
    }
}

/// Outcome of probing one link.
#[derive(Debug, Serialize)]
struct LinkCheck {
    url: String,
    normalized: String,
    exists: bool,
}

impl TableDisplay for LinkCheck {
    fn to_row(&self) -> Vec<Cell> {
        let verdict = if self.exists {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        vec![
            Cell::new(&self.url),
            Cell::new(&self.normalized),
            Cell::new(verdict),
        ]
    }

    fn display_single(&self) {
        print_section("Link");
        print_field("URL", &self.url);
        print_field("Checked", &self.normalized);
        print_field("Exists", if self.exists { "yes" } else { "no" });
    }

    fn display_compact(&self) {
        println!("{}\t{}", self.url, self.exists);
    }
}

impl TableDisplay for Link {
    fn to_row(&self) -> Vec<Cell> {
        vec![Cell::new(&self.name), Cell::new(&self.url)]
    }

    fn display_single(&self) {
        print_section("Link");
        print_field("Name", &self.name);
        print_field("URL", &self.url);
    }

    fn display_compact(&self) {
        println!("{}\t{}", self.name, self.url);
    }
}

async fn check(ctx: &Context, urls: Vec<String>, strict: bool) -> Result<()> {
    let probe = ctx.probe(strict)?;
    let spinner = ctx.output.spinner("Checking links...");

    let mut checks = Vec::with_capacity(urls.len());
    for url in urls {
        let exists = probe.exists(&url).await;
        checks.push(LinkCheck {
            normalized: normalize_url(&url),
            url,
            exists,
        });
    }

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    ctx.output
        .write_page(&checks, None, &["URL", "Checked", "Exists"])?;

    let missing = checks.iter().filter(|check| !check.exists).count();
    if missing > 0 {
        let message = format!("{} link(s) could not be reached", missing);
        ctx.output.error(&message);
        return Err(Reported(message).into());
    }
    Ok(())
}

async fn add(ctx: &Context, name: String, url: String, strict: bool) -> Result<()> {
    let probe = ctx.probe(strict)?;
    let mut editor = LinkEditor::new(Arc::new(probe), Arc::new(ConsoleSink));
    editor.set_name(name);
    editor.set_url(url);

    if let Err(err) = editor.add().await {
        return Err(Reported(err.to_string()).into());
    }

    for link in editor.links().as_slice() {
        ctx.output.write(link)?;
    }
    Ok(())
}
