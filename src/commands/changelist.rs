use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_changelist(
    client: &SvnClient,
    name: Option<String>,
    remove: bool,
    paths: Vec<String>,
) -> Result<()> {
    if paths.is_empty() {
        print_info("No paths given; changelists unchanged");
        return Ok(());
    }

    let ran = if remove {
        client.remove_from_changelist(&paths)?
    } else {
        // clap enforces that a name is present when --remove is absent
        let name = name.as_deref().unwrap_or_default();
        client.add_to_changelist(&paths, name)?
    };

    if !ran {
        print_info("Engine inactive; changelists unchanged");
        return Ok(());
    }

    if remove {
        print_success(&format!(
            "Removed {} path(s) from their changelist",
            paths.len()
        ));
    } else {
        print_success(&format!(
            "Moved {} path(s) into changelist '{}'",
            paths.len(),
            name.as_deref().unwrap_or_default()
        ));
    }
    print_updated_status(client, &paths);
    Ok(())
}
