//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Role, RouteRequirement};
use crate::portal::{Navigation, RouteAccess, RouteEntry};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Human-readable access rule of a route
pub fn format_access(access: &RouteAccess) -> String {
    match access {
        RouteAccess::Open => "open".to_string(),
        RouteAccess::Public => "guests only".to_string(),
        RouteAccess::Protected(requirement) => format!("protected ({})", format_roles(requirement)),
    }
}

fn format_roles(requirement: &RouteRequirement) -> String {
    if requirement.allowed_roles.is_empty() {
        return "any role".to_string();
    }
    requirement
        .allowed_roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the route table
pub fn print_route_table(entries: &[RouteEntry]) {
    if entries.is_empty() {
        info("No routes configured");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Access").fg(Color::Cyan),
        ]);

    for entry in entries {
        let color = match entry.access {
            RouteAccess::Open => Color::Green,
            RouteAccess::Public => Color::Yellow,
            RouteAccess::Protected(_) => Color::Red,
        };
        table.add_row(vec![
            Cell::new(entry.pattern.as_str()),
            Cell::new(format_access(&entry.access)).fg(color),
        ]);
    }

    println!("{table}");
}

/// Print the outcome of a navigation
pub fn print_navigation(path: &str, navigation: &Navigation) {
    match navigation {
        Navigation::Render { pattern, params } => {
            success(&format!("{} renders (route {})", path, pattern));
            for (name, value) in params {
                println!("  {} = {}", name.bold(), value);
            }
        }
        Navigation::Replace { to } => {
            warn(&format!("{} redirects to {}", path, to.bold()));
        }
    }
}
