use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_revert(client: &SvnClient, paths: Vec<String>) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to revert");
        return Ok(());
    }

    let ran = client.revert(&paths)?;
    if !ran {
        print_info("Engine inactive; nothing reverted");
        return Ok(());
    }

    print_success(&format!("Reverted {} path(s)", paths.len()));
    print_updated_status(client, &paths);
    Ok(())
}
