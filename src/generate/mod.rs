//! Generator: drives enumeration, remote resolution, package discovery and
//! page writing for every repository under the input root.
//!
//! Failures are contained at the repository and page boundary: they are
//! logged, counted in the [`GenerateSummary`], and the run moves on. Only an
//! unreadable input root stops the run.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

use crate::domain::{Config, GenerateSummary, PageData};
use crate::remote::resolve_repository;
use crate::render::{page_dir, write_page};
use crate::scan::{discover_subpackages, enumerate_repositories, DiscoverOptions};
use crate::utils::{join_import_path, to_import_path};

pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate pages for every repository under the input root.
    pub fn run(&self) -> Result<GenerateSummary> {
        let repos = enumerate_repositories(&self.config.input_dir)?;
        let mut summary = GenerateSummary::default();

        for repo_path in &repos {
            summary.repositories_seen += 1;
            if let Err(err) = self.handle_repository(repo_path, &mut summary) {
                summary.repositories_failed += 1;
                error!("{err:#}");
            }
        }

        if summary.is_clean() {
            info!(
                "Wrote {} pages for {} repositories",
                summary.pages_written, summary.repositories_seen
            );
        } else {
            warn!(
                "Wrote {} pages for {} repositories; {} repositories and {} pages failed",
                summary.pages_written,
                summary.repositories_seen,
                summary.repositories_failed,
                summary.pages_failed
            );
        }

        Ok(summary)
    }

    fn handle_repository(&self, repo_path: &Path, summary: &mut GenerateSummary) -> Result<()> {
        let import_name = self.import_name(repo_path);
        let record = resolve_repository(repo_path, &import_name, &self.config.remote)?;
        let data = record.page_data(self.marker_name(&record.import_name));

        self.write(&record.import_name, &data, summary);

        let options = DiscoverOptions {
            include_vendor: self.config.include_vendor,
            include_test_only: self.config.include_test_only,
        };
        let packages = discover_subpackages(repo_path, options)
            .with_context(|| format!("failed to discover packages of {}", record.import_name))?;

        for dir in packages.subpackages() {
            let import_path = join_import_path(&record.import_name, &to_import_path(dir));
            self.write(&import_path, &data, summary);
        }

        Ok(())
    }

    fn write(&self, import_path: &str, data: &PageData, summary: &mut GenerateSummary) {
        let dir = page_dir(&self.config.output_dir, &self.config.vanity, import_path);
        match write_page(&dir, data) {
            Ok(_) => summary.pages_written += 1,
            Err(err) => {
                summary.pages_failed += 1;
                error!("{:#}", anyhow::Error::new(err).context(format!("page for {import_path}")));
            }
        }
    }

    /// Repository path relative to the input root, as an import path.
    fn import_name(&self, repo_path: &Path) -> String {
        let rel = repo_path
            .strip_prefix(&self.config.input_dir)
            .ok()
            .or_else(|| repo_path.file_name().map(Path::new))
            .unwrap_or(repo_path);
        to_import_path(rel)
    }

    /// Name announced in the `go-import` marker.
    fn marker_name(&self, import_name: &str) -> String {
        let vanity = self.config.vanity.trim_end_matches('/');
        let already_qualified = import_name == vanity
            || import_name.strip_prefix(vanity).is_some_and(|rest| rest.starts_with('/'));

        if self.config.qualify_import_paths && !vanity.is_empty() && !already_qualified {
            join_import_path(vanity, import_name)
        } else {
            import_name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Input and output roots side by side in a temp dir.
    fn generator_in(temp: &TempDir) -> Generator {
        Generator::new(Config {
            vanity: "example.com".to_string(),
            input_dir: temp.path().join("input"),
            output_dir: temp.path().join("out"),
            ..Config::default()
        })
    }

    fn repo(temp: &TempDir, name: &str, files: &[&str]) -> PathBuf {
        let path = temp.path().join("input").join(name);
        let repo = git2::Repository::init(&path).expect("init repo");
        repo.remote("origin", &format!("git@github.com:user/{name}.git")).expect("add remote");
        for file in files {
            let file_path = path.join(file);
            fs::create_dir_all(file_path.parent().expect("parent")).expect("mkdir");
            fs::write(&file_path, "package x\n").expect("write source");
        }
        path
    }

    fn example_generator(qualify: bool) -> Generator {
        Generator::new(Config {
            vanity: "example.com".to_string(),
            input_dir: PathBuf::from("/src/example.com"),
            output_dir: PathBuf::from("/out"),
            qualify_import_paths: qualify,
            ..Config::default()
        })
    }

    #[test]
    fn import_name_is_relative_to_input_root() {
        let generator = example_generator(false);
        assert_eq!(generator.import_name(Path::new("/src/example.com/proj")), "proj");
        assert_eq!(generator.import_name(Path::new("/elsewhere/proj")), "proj");
    }

    #[test]
    fn marker_name_qualification() {
        assert_eq!(example_generator(false).marker_name("proj"), "proj");
        assert_eq!(example_generator(true).marker_name("proj"), "example.com/proj");
        assert_eq!(example_generator(true).marker_name("example.com/proj"), "example.com/proj");
        assert_eq!(example_generator(true).marker_name("example.community"), "example.com/example.community");
    }

    #[test]
    fn unreadable_root_fails_the_run() {
        let temp = TempDir::new().expect("temp dir");
        let generator = Generator::new(Config {
            vanity: "example.com".to_string(),
            input_dir: temp.path().join("missing"),
            output_dir: temp.path().join("out"),
            ..Config::default()
        });
        assert!(generator.run().is_err());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn failed_page_is_counted_and_siblings_written() {
        let temp = TempDir::new().expect("temp dir");
        repo(&temp, "proj", &["main.go", "sub/pkg/a.go", "zz/b.go"]);
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("proj")).expect("mkdir out/proj");
        fs::write(out.join("proj/sub"), "in the way\n").expect("write blocker");

        let summary = generator_in(&temp).run().expect("run");
        assert_eq!(summary.repositories_seen, 1);
        assert_eq!(summary.repositories_failed, 0);
        assert_eq!(summary.pages_written, 2);
        assert_eq!(summary.pages_failed, 1);
        assert!(out.join("proj/index.html").exists());
        assert!(out.join("proj/zz/index.html").exists());
    }

    #[cfg(unix)]
    #[test]
    fn unwalkable_repository_keeps_root_page_and_run_continues() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("temp dir");
        let alpha = repo(&temp, "alpha", &["main.go", "locked/inner.go", "ok/ok.go"]);
        repo(&temp, "beta", &["main.go", "sub/s.go"]);

        let locked = alpha.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod 000");
        if fs::read_dir(&locked).is_ok() {
            // Permission bits do not bind this user (root).
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod 755");
            return;
        }

        let result = generator_in(&temp).run();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod 755");
        let summary = result.expect("run");

        let out = temp.path().join("out");
        assert_eq!(summary.repositories_seen, 2);
        assert_eq!(summary.repositories_failed, 1);
        assert!(out.join("alpha/index.html").exists());
        assert!(!out.join("alpha/ok").exists());
        assert!(!out.join("alpha/locked").exists());
        assert!(out.join("beta/index.html").exists());
        assert!(out.join("beta/sub/index.html").exists());
    }
}
