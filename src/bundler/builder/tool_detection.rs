//! External tool detection.
//!
//! Resolves the compiler and linker programs against `PATH` before they are
//! spawned, so failures name the binary that was actually looked up.

use std::path::{Path, PathBuf};

/// Resolves a program name to a full path when it can be found on `PATH`.
///
/// Paths containing a directory component are used as given. Unresolvable
/// names are returned unchanged and left for the spawn to report.
pub fn resolve_tool(program: &Path) -> PathBuf {
    if program.components().count() > 1 {
        return program.to_path_buf();
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            path
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program.display(), e);
            program.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_are_kept() {
        let path = Path::new("/opt/toolchain/bin/swiftc");
        assert_eq!(resolve_tool(path), path);
    }

    #[test]
    fn unknown_names_pass_through() {
        let name = Path::new("no-such-linker-9b2e");
        assert_eq!(resolve_tool(name), name);
    }

    #[cfg(unix)]
    #[test]
    fn shell_resolves_to_absolute_path() {
        assert!(resolve_tool(Path::new("sh")).is_absolute());
    }
}
