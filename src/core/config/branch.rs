//! Branch overrides for preview deployments.
//!
//! Prefixes the application name and every app subdomain with a branch
//! label so a preview stack never collides with production.

use super::model::Application;

/// Longest DNS label.
const MAX_LABEL: usize = 63;

/// Reduce a branch name to a DNS label: lowercase `[a-z0-9-]`, other runs
/// collapsed to one `-`, no leading or trailing `-`.
pub fn sanitize_branch(raw: &str) -> String {
    let mut label = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            label.push(c);
        } else if !label.ends_with('-') {
            label.push('-');
        }
    }

    let label = label.trim_matches('-');
    let truncated: String = label.chars().take(MAX_LABEL).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Return a copy of `app` rewritten for `branch`.
///
/// The name becomes `<branch>-<name>` unless it is blank; each app
/// subdomain becomes `<branch>-<subdomain>`, or just `<branch>` for the bare
/// domain. A branch that sanitizes to nothing leaves the tree unchanged.
pub fn apply_branch_override(app: &Application, branch: &str) -> Application {
    let branch = sanitize_branch(branch);
    let mut out = app.clone();
    if branch.is_empty() {
        return out;
    }

    if !app.name.trim().is_empty() {
        out.name = format!("{}-{}", branch, app.name);
    }
    for service in out.app.values_mut() {
        let subdomain = service.subdomain.trim();
        service.subdomain = if subdomain.is_empty() || subdomain == "@" {
            branch.clone()
        } else {
            format!("{}-{}", branch, subdomain)
        };
    }
    out
}
