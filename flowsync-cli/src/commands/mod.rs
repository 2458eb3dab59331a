//! Command implementations

pub mod links;
pub mod members;
pub mod notices;
pub mod organizations;
pub mod projects;

use anyhow::{Context as _, Result};
use flowsync_query::{ListQuery, MutationCommand, QueryState};
use flowsync_sdk::ApiResponse;
use serde::de::DeserializeOwned;

use crate::context::{Context, Reported};

/// Fetch one page of a board, failing once the error has been shown.
pub async fn load_board<T, P>(
    ctx: &Context,
    board: &ListQuery<T, P>,
    what: &str,
) -> Result<QueryState<T>>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    P: Clone + PartialEq + Send + Sync + 'static,
{
    let spinner = ctx.output.spinner(&format!("Fetching {}...", what));
    board.refetch().await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    let state = board.state();
    match state.error {
        Some(error) => Err(Reported(error).into()),
        None => Ok(state),
    }
}

/// Run a mutation, failing once the error has been shown.
///
/// When the server sent no message of its own, `done` is printed instead.
pub async fn run_command<A, R>(
    ctx: &Context,
    command: &MutationCommand<A, R>,
    args: A,
    done: &str,
) -> Result<ApiResponse<R>>
where
    A: Send + 'static,
    R: Send + 'static,
{
    let spinner = ctx.output.spinner("Sending request...");
    let response = command.invoke(args).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    match response {
        Some(response) => {
            if response.message().is_none() {
                ctx.output.success(done);
            }
            Ok(response)
        }
        None => {
            let error = command.state().error.unwrap_or_default();
            Err(Reported(error).into())
        }
    }
}

/// Ask before a destructive action unless `--yes` was given.
pub fn confirm(ctx: &Context, prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to get confirmation (pass --yes to skip)")?;

    if !confirmed {
        ctx.output.info("Cancelled");
    }
    Ok(confirmed)
}
