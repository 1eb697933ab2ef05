use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_cleanup(client: &SvnClient) -> Result<()> {
    let ran = client.cleanup()?;
    if !ran {
        print_info("Engine inactive; nothing cleaned up");
        return Ok(());
    }

    print_success("Working copy cleaned up");
    Ok(())
}
