use crate::core::{
    error::Result,
    output::{format_status_line, print_info},
    SvnClient,
};
use std::io::BufRead;
use std::sync::Arc;

/// Run the engine interactively, printing every status-completed event.
///
/// With paths given, those paths are re-requested after each completed
/// merge so changes keep appearing; without paths a single full-tree
/// refresh seeds the cache and the loop resolves whatever collaborators
/// enqueue. Returns when the user presses Enter.
pub fn execute_watch(client: Arc<SvnClient>, paths: Vec<String>) -> Result<()> {
    let watched = paths.clone();
    // Weak, so the listener registered inside the client does not keep the
    // client alive past teardown.
    let observer = Arc::downgrade(&client);
    client.on_status_completed(move |entries| {
        for entry in entries {
            println!("{}", format_status_line(entry));
        }
        if watched.is_empty() {
            return;
        }
        if let Some(client) = observer.upgrade() {
            client.request_status(&watched);
        }
    });
    client.on_progress(|line| log::debug!("svn: {line}"));

    if paths.is_empty() {
        client.refresh_all(false)?;
    } else {
        client.request_status(&paths);
    }

    print_info("Watching for status updates. Press Enter to stop.");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    client.stop();
    Ok(())
}
