//! Shared helper functions for CLI commands.

use std::path::Path;

use tokio::io::AsyncReadExt;

/// Truncate a string to `max` characters, appending "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read a whole input file, or stdin for `None` / `-`.
pub async fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(tokio::fs::read_to_string(p).await.map_err(|e| {
            anyhow::anyhow!("Failed to read input file '{}': {}", p.display(), e)
        })?),
        _ => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a lon...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
