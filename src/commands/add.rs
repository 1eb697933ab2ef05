use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_add(client: &SvnClient, paths: Vec<String>) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to add");
        return Ok(());
    }

    let ran = client.add(&paths)?;
    if !ran {
        print_info("Engine inactive; nothing added");
        return Ok(());
    }

    print_success(&format!(
        "Scheduled {} path(s) for addition",
        paths.len()
    ));
    print_updated_status(client, &paths);
    Ok(())
}
