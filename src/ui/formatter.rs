//! Pure formatting functions for run output.
//!
//! Every line goes through `console::style`, which drops the colors when the
//! stream is not a terminal (as in most CI log collectors).

use crate::warnings::RunWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print an informational notice.
pub fn display_notice(message: &str) {
    println!("{} {}", style("ℹ").cyan(), message);
}

/// Display a run warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_warning(warning: &RunWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the messages being classified.
///
/// Shows up to 10 messages, each cut to 60 characters. If more exist,
/// displays the count of remaining messages.
pub fn display_messages(messages: &[String]) {
    println!("\n{}", style("Classifying messages").bold());

    for (i, message) in messages.iter().take(10).enumerate() {
        let first_line = message.lines().next().unwrap_or_default();
        let short_msg: String = first_line.chars().take(60).collect();
        println!("  {}. {}", i + 1, short_msg);
    }

    if messages.len() > 10 {
        println!("  ... and {} more messages", messages.len() - 10);
    }
}

/// Display the version change decided for this run.
pub fn display_version_change(current: &str, new_version: &str, kind: &str) {
    println!("\n{} ({})", style("Version Change:").bold(), kind);
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(new_version).green());
}
