//! Finds executables on the search path the way the platform's shell would.

use std::path::{Path, PathBuf};

use getset::Getters;

use crate::{
    system::{Environment, FileSystem},
    utils::{PATHEXT_ENV_VAR, PATH_ENV_VAR},
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The platform rules used to turn a command name into candidate files.
///
/// This is plain data so it can be detected once and swapped out in tests.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct SearchPolicy {
    /// Separator between directories in the search path variable.
    path_separator: char,

    /// Executable extensions to probe after the bare name, e.g. `.EXE`. `None` on platforms that
    /// don't resolve executables by extension.
    executable_extensions: Option<Vec<String>>,
}

/// Locates executables by probing each search directory for each candidate filename.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct ExecutableLocator {
    /// Directories searched, in order.
    search_dirs: Vec<PathBuf>,

    /// The rules used to build candidate filenames.
    policy: SearchPolicy,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SearchPolicy {
    /// Rules for platforms that run files by name alone.
    pub fn unix() -> Self {
        Self {
            path_separator: ':',
            executable_extensions: None,
        }
    }

    /// Rules for Windows, where `pathext` is the value of `PATHEXT` (e.g. `.COM;.EXE;.BAT`).
    ///
    /// Without `PATHEXT` only the bare name is probed.
    pub fn windows(pathext: Option<&str>) -> Self {
        let executable_extensions = pathext.map(|pathext| {
            pathext
                .split(';')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect()
        });

        Self {
            path_separator: ';',
            executable_extensions,
        }
    }

    /// Picks the rules for the platform we were compiled for.
    pub fn detect(env: &dyn Environment) -> Self {
        if cfg!(windows) {
            Self::windows(env.var(PATHEXT_ENV_VAR).as_deref())
        } else {
            Self::unix()
        }
    }

    /// The filenames to try for `name`, in probing order.
    ///
    /// The bare name always comes first; the extension variants only matter if it isn't found.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(name)];
        if let Some(extensions) = &self.executable_extensions {
            candidates.extend(
                extensions
                    .iter()
                    .map(|ext| Path::new(name).with_extension(ext.trim_start_matches('.'))),
            );
        }

        candidates
    }

    /// Splits a search path value into its directories, skipping empty entries.
    pub fn split_search_path(&self, search_path: &str) -> Vec<PathBuf> {
        search_path
            .split(self.path_separator)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

impl ExecutableLocator {
    /// Creates a locator over explicit directories.
    pub fn new(
        search_dirs: impl IntoIterator<Item = impl Into<PathBuf>>,
        policy: SearchPolicy,
    ) -> Self {
        Self {
            search_dirs: search_dirs.into_iter().map(Into::into).collect(),
            policy,
        }
    }

    /// Creates a locator from the `PATH` (and on Windows `PATHEXT`) of `env`.
    pub fn from_env(env: &dyn Environment) -> Self {
        let policy = SearchPolicy::detect(env);
        let search_dirs = env
            .var(PATH_ENV_VAR)
            .map(|path| policy.split_search_path(&path))
            .unwrap_or_default();

        Self {
            search_dirs,
            policy,
        }
    }

    /// Returns the first `dir/candidate` that exists as a file, or `None`.
    pub async fn locate(&self, name: &str, fs: &dyn FileSystem) -> Option<PathBuf> {
        let candidates = self.policy.candidates(name);
        for dir in &self.search_dirs {
            for candidate in &candidates {
                let path = dir.join(candidate);
                if fs.is_file(&path).await {
                    tracing::trace!("located {} at {}", name, path.display());
                    return Some(path);
                }
            }
        }

        tracing::trace!("{} not found in {} search dirs", name, self.search_dirs.len());
        None
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, io};

    use super::*;

    struct FakeFs(HashSet<PathBuf>);

    #[async_trait::async_trait]
    impl FileSystem for FakeFs {
        async fn is_file(&self, path: &Path) -> bool {
            self.0.contains(path)
        }

        async fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Err(io::ErrorKind::NotFound.into())
        }
    }

    fn fake_fs(files: &[&str]) -> FakeFs {
        FakeFs(files.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn test_search_policy_candidates() {
        assert_eq!(
            SearchPolicy::unix().candidates("docker-credential-desktop"),
            vec![PathBuf::from("docker-credential-desktop")]
        );

        assert_eq!(
            SearchPolicy::windows(Some(".COM;.EXE;;.BAT")).candidates("docker-credential-desktop"),
            vec![
                PathBuf::from("docker-credential-desktop"),
                PathBuf::from("docker-credential-desktop.COM"),
                PathBuf::from("docker-credential-desktop.EXE"),
                PathBuf::from("docker-credential-desktop.BAT"),
            ]
        );

        assert_eq!(
            SearchPolicy::windows(None).candidates("docker-credential-wincred"),
            vec![PathBuf::from("docker-credential-wincred")]
        );
    }

    #[test]
    fn test_search_policy_split_search_path() {
        assert_eq!(
            SearchPolicy::unix().split_search_path("/usr/local/bin::/usr/bin"),
            vec![PathBuf::from("/usr/local/bin"), PathBuf::from("/usr/bin")]
        );
        assert_eq!(
            SearchPolicy::windows(None).split_search_path(r"C:\bin;D:\tools"),
            vec![PathBuf::from(r"C:\bin"), PathBuf::from(r"D:\tools")]
        );
    }

    #[tokio::test]
    async fn test_executable_locator_respects_directory_order() {
        let locator = ExecutableLocator::new(["/opt/bin", "/usr/bin"], SearchPolicy::unix());
        let fs = fake_fs(&["/usr/bin/docker-credential-pass", "/opt/bin/docker-credential-pass"]);

        assert_eq!(
            locator.locate("docker-credential-pass", &fs).await,
            Some(PathBuf::from("/opt/bin/docker-credential-pass"))
        );
    }

    #[tokio::test]
    async fn test_executable_locator_prefers_bare_name_within_directory() {
        let locator = ExecutableLocator::new(["/a", "/b"], SearchPolicy::windows(Some(".EXE")));

        let fs = fake_fs(&["/a/helper.EXE", "/a/helper"]);
        assert_eq!(locator.locate("helper", &fs).await, Some(PathBuf::from("/a/helper")));

        // An extension variant in an earlier directory beats a bare name in a later one.
        let fs = fake_fs(&["/a/helper.EXE", "/b/helper"]);
        assert_eq!(locator.locate("helper", &fs).await, Some(PathBuf::from("/a/helper.EXE")));
    }

    #[tokio::test]
    async fn test_executable_locator_not_found() {
        let locator = ExecutableLocator::new(["/a", "/b"], SearchPolicy::unix());
        assert_eq!(locator.locate("helper", &fake_fs(&["/c/helper"])).await, None);

        let empty = ExecutableLocator::new(Vec::<PathBuf>::new(), SearchPolicy::unix());
        assert_eq!(empty.locate("helper", &fake_fs(&["/a/helper"])).await, None);
    }
}
