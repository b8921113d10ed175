//! Command dispatch.

pub mod config_cmd;
pub mod products;

use stockdeck_core::ProductStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. Config and completions are
/// handled earlier in `main` -- everything here needs a store.
pub async fn dispatch(
    command: Command,
    store: &ProductStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Fetch => products::fetch(store, global).await,
        Command::List(args) => products::list(store, args, global).await,
        Command::Add(args) => products::add(store, args, global).await,
        Command::Update(args) => products::update(store, args, global).await,
        Command::Delete(args) => products::delete(store, args, global).await,
        Command::Categories => {
            products::categories(store, global);
            Ok(())
        }
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before store construction")
        }
    }
}

pub mod util {
    use std::io::IsTerminal;

    use crate::error::CliError;

    /// Ask for confirmation unless `--yes` was passed.
    ///
    /// Errors rather than blocking when stdin is not a terminal.
    pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
        if yes {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            return Err(CliError::NonInteractiveRequiresYes {
                action: prompt.to_owned(),
            });
        }

        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        Ok(confirmed)
    }
}
