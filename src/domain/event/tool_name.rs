//! Best-effort tool labels for wrapped commands

/// Derive a tool label from a command line.
///
/// Uses the program's file name without a `.exe` suffix, except for
/// `python -m <module>` where the module name is more useful.
pub fn infer_from_command<S: AsRef<str>>(argv: &[S]) -> Option<String> {
    let program = argv.first()?.as_ref();
    let base = program
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(program)
        .trim();

    let base = match base.len().checked_sub(4) {
        Some(cut) if base.is_char_boundary(cut) && base[cut..].eq_ignore_ascii_case(".exe") => {
            &base[..cut]
        }
        _ => base,
    };
    if base.is_empty() {
        return None;
    }

    if base.to_lowercase().starts_with("python") {
        let module = argv
            .iter()
            .position(|arg| arg.as_ref() == "-m")
            .and_then(|i| argv.get(i + 1))
            .map(|m| m.as_ref().trim())
            .filter(|m| !m.is_empty());
        if let Some(module) = module {
            return Some(module.to_string());
        }
    }

    Some(base.to_string())
}

/// Fallback label for a watched process whose name cannot be found
pub fn pid_label(pid: u32) -> String {
    format!("pid-{}", pid)
}
