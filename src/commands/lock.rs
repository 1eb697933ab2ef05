use crate::commands::status::print_updated_status;
use crate::core::{
    classify::ErrorKind,
    error::Result,
    output::{print_error, print_info, print_success},
    OperationMode, SvnClient, SvnBridgeError,
};

pub fn execute_lock(client: &SvnClient, paths: Vec<String>, steal: bool) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to lock");
        return Ok(());
    }

    let mode = if steal {
        OperationMode::Force
    } else {
        OperationMode::Normal
    };
    match client.get_lock(&paths, mode) {
        Ok(false) => {
            print_info("Engine inactive; nothing locked");
            Ok(())
        }
        Ok(true) => {
            print_success(&format!("Locked {} path(s)", paths.len()));
            print_updated_status(client, &paths);
            Ok(())
        }
        Err(SvnBridgeError::CommandFailed {
            kind: ErrorKind::LockedByOther,
            stderr,
        }) => {
            print_error(&format!(
                "Another user holds the lock. Use --steal to take it over.\n{}",
                stderr.trim()
            ));
            Err(SvnBridgeError::CommandFailed {
                kind: ErrorKind::LockedByOther,
                stderr,
            })
        }
        Err(e) => Err(e),
    }
}

pub fn execute_unlock(client: &SvnClient, paths: Vec<String>) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to unlock");
        return Ok(());
    }

    let ran = client.release_lock(&paths)?;
    if !ran {
        print_info("Engine inactive; nothing unlocked");
        return Ok(());
    }

    print_success(&format!("Released lock on {} path(s)", paths.len()));
    print_updated_status(client, &paths);
    Ok(())
}
