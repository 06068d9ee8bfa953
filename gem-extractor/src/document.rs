use gemharvest_core::{format_date, CoreError, Submission};
use std::path::{Path, PathBuf};
use tracing::debug;

const DELETED_AUTHOR: &str = "[deleted]";
const MAX_STEM_LEN: usize = 50;

/// Reduces a title to a filename stem: ASCII letters, digits and spaces
/// survive, spaces become underscores, the rest is dropped, and the
/// result is cut to 50 characters. May be empty for titles with no
/// usable characters.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_STEM_LEN)
        .collect()
}

/// Renders the Markdown document for a matched submission.
pub fn render_gem(submission: &Submission) -> String {
    let author = submission.author.as_deref().unwrap_or(DELETED_AUTHOR);
    format!(
        "# {}\n\n**Author**: u/{}\n**Date**: {}\n**URL**: {}\n\n## Description\n\n{}\n",
        submission.title,
        author,
        format_date(submission.created_utc),
        submission.url,
        submission.selftext
    )
}

/// Writes gem documents into a fixed output directory, one `.md` file
/// per submission, keyed by the sanitized title. Colliding stems
/// overwrite; writes are whole-document and not atomic.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    output_dir: PathBuf,
}

impl DocumentWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn write_gem(&self, submission: &Submission) -> Result<PathBuf, CoreError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let stem = sanitize_title(&submission.title);
        let path = self.output_dir.join(format!("{stem}.md"));
        tokio::fs::write(&path, render_gem(submission)).await?;
        debug!("Wrote gem document: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str, selftext: &str) -> Submission {
        Submission {
            id: "t3_test".to_string(),
            title: title.to_string(),
            selftext: selftext.to_string(),
            author: Some("alice".to_string()),
            created_utc: 1768478400, // 2026-01-15 12:00:00 UTC
            url: "https://x/1".to_string(),
        }
    }

    #[test]
    fn test_sanitize_alphabet_and_length() {
        let cases = [
            "My Gem Prompt!!",
            "émoji 🚀 title",
            "a/b\\c:d*e?f\"g<h>i|j",
            &"long word ".repeat(20),
            "",
        ];
        for title in cases {
            let stem = sanitize_title(title);
            assert!(stem.len() <= 50, "stem too long for {title:?}");
            assert!(
                stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "bad character in stem for {title:?}"
            );
        }
    }

    #[test]
    fn test_sanitize_replaces_spaces() {
        assert_eq!(sanitize_title("My Gem Prompt!!"), "My_Gem_Prompt");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let cases = ["My Gem Prompt!!", "émoji 🚀 title", &"x y".repeat(40)];
        for title in cases {
            let once = sanitize_title(title);
            assert_eq!(sanitize_title(&once), once);
        }
    }

    #[test]
    fn test_sanitize_empty_stem() {
        assert_eq!(sanitize_title("🚀🚀🚀"), "");
    }

    #[test]
    fn test_render_layout() {
        let rendered = render_gem(&submission("My Gem Prompt!!", "Use this for coding"));
        assert!(rendered.starts_with("# My Gem Prompt!!\n\n"));
        assert!(rendered.contains("**Author**: u/alice\n"));
        assert!(rendered.contains("**Date**: 2026-01-15\n"));
        assert!(rendered.contains("**URL**: https://x/1\n"));
        assert!(rendered.ends_with("## Description\n\nUse this for coding\n"));
    }

    #[test]
    fn test_render_deleted_author() {
        let mut sub = submission("Shared gem", "body");
        sub.author = None;
        assert!(render_gem(&sub).contains("**Author**: u/[deleted]\n"));
    }

    #[test]
    fn test_render_empty_selftext() {
        let rendered = render_gem(&submission("just prompt", ""));
        assert!(rendered.ends_with("## Description\n\n\n"));
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DocumentWriter::new(dir.path().join("gems"));

        let path = writer
            .write_gem(&submission("My Gem Prompt!!", "Use this for coding"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("gems").join("My_Gem_Prompt.md"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# My Gem Prompt!!"));
    }

    #[tokio::test]
    async fn test_colliding_stems_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DocumentWriter::new(dir.path());

        writer
            .write_gem(&submission("Gem one!", "first body"))
            .await
            .unwrap();
        let path = writer
            .write_gem(&submission("Gem one?", "second body"))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("second body"));
        assert!(!contents.contains("first body"));
    }
}
