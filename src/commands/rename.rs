use crate::commands::status::print_updated_status;
use crate::core::{
    error::Result,
    output::{print_info, print_success},
    SvnClient,
};

pub fn execute_move(client: &SvnClient, from: String, to: String) -> Result<()> {
    let ran = client.move_asset(&from, &to)?;
    if !ran {
        print_info("Engine inactive; nothing moved");
        return Ok(());
    }

    print_success(&format!("Moved '{from}' to '{to}'"));
    print_updated_status(client, &[from, to]);
    Ok(())
}
