//! Redirect page rendering and writing
//!
//! Every page carries the `go-import` marker read by the go tool plus three
//! browser redirects (meta refresh, canonical link, script) and a clickable
//! fallback link, all pointing at the repository's web page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::domain::{PageData, VCS};

/// File written into every page directory
pub const INDEX_FILE: &str = "index.html";

const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to mkdir {}", .0.display())]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to write {}", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

/// Render the redirect page for `data`.
pub fn render_page(data: &PageData) -> String {
    let name = escape_html(&data.import_name);
    let repo_url = escape_html(&data.repo_url);
    let site_url = escape_html(&data.site_url);
    let script_url = js_string(&data.site_url);
    let vcs = VCS;

    format!(
        r#"<html>
<head>
<meta name="go-import" content="{name} {vcs} {repo_url}">
<meta http-equiv="refresh" content="0; url={site_url}" />
<link rel="canonical" href="{site_url}" />
<script>
	window.location.replace({script_url});
</script>
</head>
<body>
	<h1>Redirecting to <a href="{site_url}">{site_url}</a></h1>
</body>
</html>
"#
    )
}

/// Directory that receives the page for `import_path`.
///
/// The vanity domain is dropped from the front of the import path, so both
/// `proj/sub` and `example.com/proj/sub` land in `<output>/proj/sub`.
pub fn page_dir(output: &Path, vanity: &str, import_path: &str) -> PathBuf {
    let mut rel = import_path;
    if !vanity.is_empty() {
        if let Some(rest) = rel.strip_prefix(vanity) {
            if rest.is_empty() || rest.starts_with('/') {
                rel = rest;
            }
        }
    }

    rel.split('/').filter(|part| !part.is_empty()).fold(output.to_path_buf(), |dir, part| dir.join(part))
}

/// Write the page for `data` into `dir`, creating missing directories.
///
/// The page goes to a temporary sibling first and is renamed into place, so
/// `index.html` is either complete or untouched.
pub fn write_page(dir: &Path, data: &PageData) -> Result<PathBuf, PageError> {
    fs::create_dir_all(dir).map_err(|e| PageError::CreateDir(dir.to_path_buf(), e))?;

    let path = dir.join(INDEX_FILE);
    let temp = dir.join(format!("{INDEX_FILE}{TEMP_SUFFIX}"));
    info!("Writing {}", path.display());

    let write_err = |e| PageError::Write(path.clone(), e);
    fs::write(&temp, render_page(data)).map_err(write_err)?;
    if let Err(e) = fs::rename(&temp, &path) {
        let _ = fs::remove_file(&temp);
        return Err(write_err(e));
    }

    Ok(path)
}

/// Escape text for HTML element content and double-quoted attributes.
///
/// `/` and `:` pass through untouched; the go tool matches the marker's
/// content byte for byte.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Quote text as a JavaScript string literal that is safe inside `<script>`.
fn js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    fn proj_page() -> PageData {
        PageData {
            import_name: "proj".to_string(),
            repo_url: "https://github.com/user/proj.git".to_string(),
            site_url: "https://github.com/user/proj".to_string(),
        }
    }

    #[test]
    fn renders_fixed_template() {
        let expected = r#"<html>
<head>
<meta name="go-import" content="proj git https://github.com/user/proj.git">
<meta http-equiv="refresh" content="0; url=https://github.com/user/proj" />
<link rel="canonical" href="https://github.com/user/proj" />
<script>
	window.location.replace("https://github.com/user/proj");
</script>
</head>
<body>
	<h1>Redirecting to <a href="https://github.com/user/proj">https://github.com/user/proj</a></h1>
</body>
</html>
"#;
        assert_eq!(render_page(&proj_page()), expected.to_string());
    }

    #[test]
    fn values_are_escaped() {
        let data = PageData {
            import_name: "a\"b".to_string(),
            repo_url: "https://host/o/r?x=1&y=<2>".to_string(),
            site_url: "https://host/o/r\"</script>".to_string(),
        };
        let page = render_page(&data);
        assert!(page.contains(r#"content="a&#34;b git https://host/o/r?x=1&amp;y=&lt;2&gt;""#));
        assert!(page.contains(r#"replace("https://host/o/r\"\u003c/script\u003e")"#));
        assert_eq!(page.matches("</script>").count(), 1);
    }

    #[test]
    fn page_dir_drops_vanity_prefix() {
        let out = Path::new("/out");
        assert_eq!(page_dir(out, "example.com", "example.com/proj/sub"), out.join("proj").join("sub"));
        assert_eq!(page_dir(out, "example.com", "proj/sub"), out.join("proj").join("sub"));
        assert_eq!(page_dir(out, "example.com", "example.com"), out.to_path_buf());
        assert_eq!(page_dir(out, "example.co", "example.com/proj"), out.join("example.com").join("proj"));
        assert_eq!(page_dir(out, "", "proj"), out.join("proj"));
    }

    #[test]
    fn write_page_creates_directories_and_overwrites() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("proj/sub/pkg");

        let path = write_page(&dir, &proj_page()).expect("first write");
        assert_eq!(path, dir.join(INDEX_FILE));
        let first = fs::read_to_string(&path).expect("read page");

        write_page(&dir, &proj_page()).expect("second write");
        let second = fs::read_to_string(&path).expect("read page");
        assert_eq!(first, second);
        assert!(!dir.join("index.html.tmp").exists());
    }

    #[test]
    fn write_page_reports_blocked_directory() {
        let temp = TempDir::new().expect("temp dir");
        let blocker = temp.path().join("proj");
        fs::write(&blocker, "not a dir").expect("write blocker");

        let err = write_page(&blocker.join("sub"), &proj_page()).unwrap_err();
        assert!(matches!(err, PageError::CreateDir(..)));
    }
}
