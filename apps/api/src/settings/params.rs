use tracing::{debug, info};

use crate::generation::prompts::DEFAULT_PARAMS;
use crate::settings::{write_if_absent, Workspace};

/// Non-empty trimmed lines of params.txt in file order.
/// Missing or unreadable files give an empty list.
pub fn load(workspace: &Workspace) -> Vec<String> {
    let path = workspace.params_path();
    match std::fs::read_to_string(&path) {
        Ok(raw) => parse_params(&raw),
        Err(e) => {
            debug!("Parameters unavailable at {} ({e})", path.display());
            Vec::new()
        }
    }
}

fn parse_params(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Writes the three built-in parameters if params.txt does not exist.
pub fn ensure_default(workspace: &Workspace) -> std::io::Result<()> {
    let path = workspace.params_path();
    if write_if_absent(&path, &DEFAULT_PARAMS.join("\n"))? {
        info!("Created default parameters at {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_blank_lines_and_trims() {
        let parsed = parse_params("  --ar 4:5 \n\n   \n--tile\r\n--ar 1:1");
        assert_eq!(parsed, vec!["--ar 4:5", "--tile", "--ar 1:1"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&Workspace::new(dir.path())).is_empty());
    }

    #[test]
    fn test_ensure_default_writes_three_presets() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());

        ensure_default(&workspace).unwrap();
        assert_eq!(load(&workspace), vec!["--ar 16:9 --p", "--ar 21:9", "--ar 2:3"]);
    }

    #[test]
    fn test_ensure_default_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());
        std::fs::write(workspace.params_path(), "--niji 6\n").unwrap();

        ensure_default(&workspace).unwrap();
        ensure_default(&workspace).unwrap();

        assert_eq!(
            std::fs::read_to_string(workspace.params_path()).unwrap(),
            "--niji 6\n"
        );
    }
}
