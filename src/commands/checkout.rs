use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_checkout(client: &SvnClient, url: String, directory: String) -> Result<()> {
    print_info(&format!("Checking out {url}"));

    let ran = client.checkout(&url, &directory)?;
    if !ran {
        print_info("Engine inactive; nothing checked out");
        return Ok(());
    }

    print_success(&format!("Checked out into '{directory}'"));
    Ok(())
}
