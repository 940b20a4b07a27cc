//! Output formatting utilities

use console::{style, Style};

use tagship_core::types::{PublishReport, RepositoryState};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for tags and branches
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Style for paths and URLs
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Print the repository state block
pub fn repository_state(state: &RepositoryState) {
    let branch = match &state.current_branch {
        Some(branch) => tag_style().apply_to(branch).to_string(),
        None => style("(detached)").dim().to_string(),
    };
    println!("{}", key_value("Branch", &branch));

    let status = if state.is_clean() {
        style("clean").green()
    } else {
        style("dirty").red()
    };
    println!("{}", key_value("Status", &status.to_string()));
    if state.has_uncommitted_changes {
        println!("{}", key_value("Uncommitted", "yes"));
    }
    if state.has_untracked_files {
        println!("{}", key_value("Untracked", "yes"));
    }
    println!(
        "{}",
        key_value("HEAD", state.head_commit_hash.as_deref().unwrap_or("none"))
    );
}

/// Print a publish report
pub fn publish_report(report: &PublishReport) {
    println!("{}", header("Release"));
    println!(
        "{}",
        key_value("Version", &version_style().apply_to(&report.version).to_string())
    );
    println!(
        "{}",
        key_value("Tag", &tag_style().apply_to(&report.tag).to_string())
    );
    println!("{}", key_value("Commit", &report.commit));
    if let Some(url) = &report.release_url {
        println!("{}", key_value("URL", &path_style().apply_to(url).to_string()));
    }

    if !report.uploaded.is_empty() {
        println!();
        println!("{}", header("Assets"));
        for asset in &report.uploaded {
            println!(
                "  {} {} bytes  sha256:{}",
                path_style().apply_to(&asset.name),
                asset.size,
                style(&asset.sha256).dim()
            );
        }
    }
}
