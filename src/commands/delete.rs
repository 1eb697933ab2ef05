use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    OperationMode, SvnClient,
};

pub fn execute_delete(client: &SvnClient, paths: Vec<String>, force: bool) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to delete");
        return Ok(());
    }

    let mode = if force {
        OperationMode::Force
    } else {
        OperationMode::Normal
    };
    let ran = client.delete(&paths, mode)?;
    if !ran {
        print_info("Engine inactive; nothing deleted");
        return Ok(());
    }

    print_success(&format!(
        "Scheduled {} path(s) for deletion",
        paths.len()
    ));
    print_updated_status(client, &paths);
    Ok(())
}
