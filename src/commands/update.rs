use crate::commands::status::print_updated_status;
use crate::core::{
    classify::ErrorKind,
    error::Result,
    output::{print_info, print_success},
    SvnClient, SvnBridgeError,
};

pub fn execute_update(client: &SvnClient, paths: Vec<String>) -> Result<()> {
    match run_update(client, &paths) {
        Ok(ran) => {
            report(ran, &paths);
            if ran {
                print_updated_status(client, &paths);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Update with one automatic cleanup retry when the working copy is locked.
fn run_update(client: &SvnClient, paths: &[String]) -> Result<bool> {
    match client.update(paths) {
        Err(SvnBridgeError::CommandFailed {
            kind: ErrorKind::LocalCopyLocked,
            ..
        }) => {
            print_info("Working copy locked; running cleanup and retrying");
            client.cleanup()?;
            client.update(paths)
        }
        other => other,
    }
}

fn report(ran: bool, paths: &[String]) {
    if !ran {
        print_info("Engine inactive; nothing updated");
    } else if paths.is_empty() {
        print_success("Nothing to update");
    } else {
        print_success(&format!("Updated {} path(s)", paths.len()));
    }
}
