//! Search-path lookup and shell command execution.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::ThemeError;

/// Size of each read from a child's stdout.
const CHUNK_SIZE: usize = 1024;

/// Captured output and exit status of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// `None` when capturing stdout failed after the process started.
    pub stdout: Option<String>,
    /// `None` when the process was killed by a signal or could not be reaped.
    pub code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Drives external commands on behalf of the command-based theme sources.
pub trait CommandRunner {
    fn locate(&self, name: &str) -> Option<PathBuf>;
    fn run(&self, command_line: &str) -> Result<CommandResult, ThemeError>;
}

/// Runs commands against the real host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl CommandRunner for SystemShell {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        locate_executable(name)
    }

    fn run(&self, command_line: &str) -> Result<CommandResult, ThemeError> {
        run_command(command_line)
    }
}

/// Find `name` on the process search path.
pub fn locate_executable(name: &str) -> Option<PathBuf> {
    let search_path = std::env::var_os("PATH");
    locate_executable_in(name, search_path.as_deref())
}

/// Find `name` using an explicit search path value.
///
/// An unset or empty search path only considers `name` itself, relative to
/// the current directory. Otherwise every segment is tried in order and the
/// first regular file the current user may execute wins. The result is
/// always absolute.
pub fn locate_executable_in(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let search_path = search_path
        .filter(|path| !path.is_empty())
        .map_or_else(|| cwd.as_os_str().to_os_string(), OsStr::to_os_string);

    match which::which_in(name, Some(&search_path), &cwd) {
        Ok(found) => std::path::absolute(found).ok(),
        Err(error) => {
            debug!(name, %error, "executable not found");
            None
        }
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

/// Run `command_line` through the shell and capture its stdout.
///
/// Blocks until the child exits. Only a failure to create the process is an
/// error; anything that goes wrong afterwards leaves `stdout` empty and keeps
/// whatever exit status could still be collected.
pub fn run_command(command_line: &str) -> Result<CommandResult, ThemeError> {
    debug!(command = command_line, "running command");
    let mut child = shell_command(command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ThemeError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    // The pipe is dropped at the end of this block so a child still writing
    // cannot keep `wait` from returning.
    let captured = match child.stdout.take() {
        Some(mut stdout) => read_chunked(&mut stdout)
            .map_err(|error| warn!(command = command_line, %error, "failed reading stdout"))
            .ok(),
        None => None,
    };

    let code = match child.wait() {
        Ok(status) => status.code(),
        Err(error) => {
            warn!(command = command_line, %error, "failed waiting for command");
            None
        }
    };
    debug!(command = command_line, ?code, "command finished");

    Ok(CommandResult {
        stdout: captured.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
        code,
    })
}

fn read_chunked(reader: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut captured = Vec::new();
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(captured),
            Ok(read) => captured.extend_from_slice(&chunk[..read]),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_chunked_reassembles_multiple_chunks() {
        let text = "0123456789".repeat(CHUNK_SIZE / 4);
        let mut reader = io::Cursor::new(text.clone().into_bytes());
        let captured = read_chunked(&mut reader).unwrap();
        assert_eq!(String::from_utf8(captured).unwrap(), text);
    }

    #[test]
    fn success_requires_zero_exit() {
        let ok = CommandResult {
            stdout: Some(String::new()),
            code: Some(0),
        };
        let failed = CommandResult {
            stdout: Some(String::new()),
            code: Some(1),
        };
        let signalled = CommandResult {
            stdout: None,
            code: None,
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signalled.success());
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::path::Path;
        use std::os::unix::fs::PermissionsExt;

        fn join_search_path(directories: &[&Path]) -> std::ffi::OsString {
            std::env::join_paths(directories).unwrap()
        }

        fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
            path
        }

        #[test]
        fn locate_returns_first_matching_segment() {
            let first = tempfile::tempdir().unwrap();
            let second = tempfile::tempdir().unwrap();
            let third = tempfile::tempdir().unwrap();
            let expected = write_file(second.path(), "sample-tool", 0o755);
            write_file(third.path(), "sample-tool", 0o755);

            let search = join_search_path(&[first.path(), second.path(), third.path()]);
            let found = locate_executable_in("sample-tool", Some(search.as_os_str())).unwrap();
            assert_eq!(found, expected);
            assert!(found.is_absolute());
        }

        #[test]
        fn locate_checks_the_last_segment() {
            let first = tempfile::tempdir().unwrap();
            let last = tempfile::tempdir().unwrap();
            let expected = write_file(last.path(), "sample-tool", 0o755);

            let search = join_search_path(&[first.path(), last.path()]);
            assert_eq!(
                locate_executable_in("sample-tool", Some(search.as_os_str())),
                Some(expected)
            );
        }

        #[test]
        fn locate_skips_non_executable_files_and_directories() {
            let plain = tempfile::tempdir().unwrap();
            let nested = tempfile::tempdir().unwrap();
            let good = tempfile::tempdir().unwrap();
            write_file(plain.path(), "sample-tool", 0o644);
            fs::create_dir(nested.path().join("sample-tool")).unwrap();
            let expected = write_file(good.path(), "sample-tool", 0o700);

            let search = join_search_path(&[plain.path(), nested.path(), good.path()]);
            assert_eq!(
                locate_executable_in("sample-tool", Some(search.as_os_str())),
                Some(expected)
            );
        }

        #[test]
        fn locate_passes_over_an_earlier_candidate_that_cannot_run() {
            let blocked = tempfile::tempdir().unwrap();
            let runnable = tempfile::tempdir().unwrap();
            write_file(blocked.path(), "gsettings", 0o644);
            let expected = write_file(runnable.path(), "gsettings", 0o755);

            let search = join_search_path(&[blocked.path(), runnable.path()]);
            assert_eq!(
                locate_executable_in("gsettings", Some(search.as_os_str())),
                Some(expected)
            );

            let only_blocked = join_search_path(&[blocked.path()]);
            assert_eq!(
                locate_executable_in("gsettings", Some(only_blocked.as_os_str())),
                None
            );
        }

        #[test]
        fn locate_returns_none_when_nothing_matches() {
            let dir = tempfile::tempdir().unwrap();
            let search = join_search_path(&[dir.path()]);
            assert_eq!(locate_executable_in("sample-tool", Some(search.as_os_str())), None);
        }

        #[test]
        fn empty_search_path_only_checks_the_bare_name() {
            assert_eq!(
                locate_executable_in("surely-not-a-real-tool-name", Some(OsStr::new(""))),
                None
            );
            assert_eq!(locate_executable_in("surely-not-a-real-tool-name", None), None);

            let dir = tempfile::tempdir().unwrap();
            let tool = write_file(dir.path(), "sample-tool", 0o755);
            let name = tool.to_str().unwrap();
            assert_eq!(locate_executable_in(name, Some(OsStr::new(""))), Some(tool));

            let blocked = write_file(dir.path(), "blocked-tool", 0o644);
            let name = blocked.to_str().unwrap();
            assert_eq!(locate_executable_in(name, None), None);
        }

        #[test]
        fn run_command_reassembles_output_longer_than_a_chunk() {
            let script = "i=0; while [ $i -lt 200 ]; do \
                          printf 'line %03d of the reassembly check\\n' $i; \
                          i=$((i+1)); done";
            let expected: String = (0..200)
                .map(|i| format!("line {i:03} of the reassembly check\n"))
                .collect();
            assert!(expected.len() > CHUNK_SIZE);

            let result = run_command(script).unwrap();
            assert!(result.success());
            assert_eq!(result.stdout.as_deref(), Some(expected.as_str()));
        }

        #[test]
        fn run_command_reports_exit_status() {
            let result = run_command("printf partial; exit 3").unwrap();
            assert_eq!(result.code, Some(3));
            assert!(!result.success());
            assert_eq!(result.stdout.as_deref(), Some("partial"));
        }

        #[test]
        fn run_command_ignores_stderr() {
            let result = run_command("echo oops >&2; echo fine").unwrap();
            assert!(result.success());
            assert_eq!(result.stdout.as_deref(), Some("fine\n"));
        }

        #[test]
        fn system_shell_delegates() {
            let result = SystemShell.run("echo delegated").unwrap();
            assert_eq!(result.stdout.as_deref(), Some("delegated\n"));
            assert!(SystemShell.locate("sh").is_some());
        }
    }
}
