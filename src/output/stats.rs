//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, GlobalState};

/// Print statistics for one timeline or conversation walk.
pub fn print_walk_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", state.account_name)).bold()
    );
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    if state.other_count > 0 {
        println!("  Other:    {}", state.other_count);
    }
    println!("  On disk:  {} (already downloaded)", state.already_present);
    println!("  Skipped:  {} (no content)", state.skipped);
    println!("  Total:    {} downloaded", state.total_downloaded());
}

/// Print global statistics across all walks.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Walks completed: {}", state.walks_completed);
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    if state.other_count > 0 {
        println!("  Other:    {}", state.other_count);
    }
    println!("  On disk:  {} (already downloaded)", state.already_present);
    println!("  Skipped:  {} (no content)", state.skipped);
    println!("  Total:    {} downloaded", state.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
