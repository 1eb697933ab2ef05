use crate::core::{
    error::Result,
    output::{print_info, print_section_header, print_status_entries},
    snapshot::{load_snapshot, save_snapshot, StatusSnapshot},
    status::StatusEntry,
    SvnClient, SvnBridgeError,
};

pub fn execute_status(client: &SvnClient, paths: Vec<String>, remote: bool) -> Result<()> {
    let entries = if paths.is_empty() {
        match client.refresh_all(remote) {
            Ok(_) => collect_all(client),
            Err(e) => return show_stale_snapshot_or_fail(client, e),
        }
    } else {
        if remote {
            client.set_status_request_rule(&paths, true);
        }
        client.request_status(&paths);
        client.refresh_once();
        paths.iter().map(|p| client.get_asset_status(p)).collect()
    };

    print_section_header("Working copy status");
    print_status_entries(&entries);

    let snapshot = StatusSnapshot::new(client.working_copy().to_path_buf(), entries);
    if let Err(e) = save_snapshot(&snapshot) {
        // Display already happened; a broken cache dir only costs the
        // snapshot for next time.
        log::warn!("snapshot save failed (status command will continue): {e}");
    }

    Ok(())
}

/// Every cached entry, ordered by path for stable output.
fn collect_all(client: &SvnClient) -> Vec<StatusEntry> {
    let mut paths = client.get_filtered_assets(|_| true);
    paths.sort();
    paths.iter().map(|p| client.get_asset_status(p)).collect()
}

/// On a refresh failure, fall back to the last persisted snapshot when one
/// exists so the user still sees something.
fn show_stale_snapshot_or_fail(client: &SvnClient, error: SvnBridgeError) -> Result<()> {
    match load_snapshot(client.working_copy()) {
        Ok(snapshot) => {
            log::warn!("status refresh failed, showing stale snapshot: {error}");
            print_info(&format!(
                "Could not reach the repository ({error}); showing status captured {}",
                snapshot.captured_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            print_status_entries(&snapshot.entries);
            Ok(())
        }
        Err(_) => Err(error),
    }
}

/// Re-resolve and print status for paths an operation just touched.
///
/// Used by the mutating commands after success, so the terminal reflects
/// the post-operation state without waiting for a background cycle.
pub fn print_updated_status(client: &SvnClient, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    client.refresh_once();
    print_section_header("Updated status");
    let entries: Vec<StatusEntry> = paths.iter().map(|p| client.get_asset_status(p)).collect();
    print_status_entries(&entries);
}
