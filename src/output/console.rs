//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Fansly Archiver                                   ║
║     Incremental media archiver for subscriptions      ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(download_dir: &str, quick_fetch: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Directory:   {}", download_dir);
    println!(
        "  Quick fetch: {}",
        if quick_fetch { "enabled" } else { "disabled" }
    );
    println!();
}
