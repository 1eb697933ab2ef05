use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    ResolvePolicy, SvnClient,
};

pub fn execute_resolve(client: &SvnClient, paths: Vec<String>, policy: ResolvePolicy) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; nothing to resolve");
        return Ok(());
    }
    if policy == ResolvePolicy::Ignore {
        print_info("Leaving conflicts untouched");
        return Ok(());
    }

    let ran = client.resolve(&paths, policy)?;
    if !ran {
        print_info("Engine inactive; nothing resolved");
        return Ok(());
    }

    print_success(&format!("Resolved {} path(s)", paths.len()));
    print_updated_status(client, &paths);
    Ok(())
}
