//! Edit command - interactive editor loop.
//!
//! The decrypted YAML opens in `$EDITOR`. A result that fails to parse or
//! validate is shown with its error and can be re-edited; nothing is written
//! until it passes.

use dialoguer::{Confirm, Editor};
use tracing::debug;

use crate::cli::output;
use crate::core::config::Configuration;
use crate::core::store::StoreOptions;
use crate::error::{Error, Result};

pub fn execute(options: &StoreOptions) -> Result<()> {
    let store = super::open(options)?;
    let original = super::read_text(&store)?;
    let mut draft = original.clone();

    loop {
        let Some(edited) = Editor::new().extension(".yaml").edit(&draft)? else {
            output::dimmed("edit aborted, nothing saved");
            return Ok(());
        };

        if edited == original {
            output::dimmed("no changes");
            return Ok(());
        }

        match review(&edited) {
            None => {
                store.write(edited.as_bytes())?;
                output::success(&format!("saved {}", output::path(store.path())));
                return Ok(());
            }
            Some(problem) => {
                output::error(&problem);
                let retry = Confirm::new()
                    .with_prompt("Edit again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    output::dimmed("changes discarded");
                    return Ok(());
                }
                draft = edited;
            }
        }
    }
}

/// Describe what is wrong with `yaml`, phrased by error kind.
fn review(yaml: &str) -> Option<String> {
    match Configuration::load(yaml.as_bytes()) {
        Ok(_) => None,
        Err(Error::Config(e)) => {
            debug!(error = %e, "edited YAML does not parse");
            Some(format!("fix your YAML: {}", e))
        }
        Err(Error::Validation(e)) => Some(format!("fix this field: {}", e)),
        Err(e) => Some(e.to_string()),
    }
}
