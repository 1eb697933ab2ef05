use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_commit(
    client: &SvnClient,
    paths: Vec<String>,
    message: Option<String>,
) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to commit");
        return Ok(());
    }

    let ran = client.commit(&paths, message.as_deref())?;
    if !ran {
        print_info("Engine inactive; nothing committed");
        return Ok(());
    }

    print_success(&format!("Committed {} path(s)", paths.len()));
    print_updated_status(client, &paths);
    Ok(())
}
