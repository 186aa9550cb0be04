use std::ffi::OsStr;
use std::io;
use std::process::{Command, Output};

/// Trait for running external commands, allowing for mocking in tests.
///
/// Returns the raw `io::Result` from process spawning so callers can tell
/// a failure to launch apart from a launched process that exited non-zero.
/// Arguments are `OsStr` so file paths reach the tool byte-for-byte, even
/// when they are not valid UTF-8.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion and capture its output
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<Output>;
}

/// Real command runner using std::process::Command
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Mock command runner for testing
#[cfg(test)]
pub struct MockCommandRunner {
    /// Pre-configured outcomes, consumed in order per matching program
    outcomes: std::sync::Mutex<Vec<(String, MockRunOutcome)>>,
    /// Arguments of each invocation, in call order
    calls: std::sync::Mutex<Vec<Vec<std::ffi::OsString>>>,
}

/// Scripted result for a single mock invocation
#[cfg(test)]
#[derive(Clone, Debug)]
pub enum MockRunOutcome {
    /// Simulate the program being absent from PATH
    SpawnFailure,
    /// Simulate a process that ran to completion
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

#[cfg(test)]
impl MockRunOutcome {
    pub fn success(stdout: &str) -> Self {
        MockRunOutcome::Completed {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: &str) -> Self {
        MockRunOutcome::Completed {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[cfg(test)]
impl MockCommandRunner {
    pub fn new() -> Self {
        Self {
            outcomes: std::sync::Mutex::new(Vec::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_outcome(program: &str, outcome: MockRunOutcome) -> Self {
        Self {
            outcomes: std::sync::Mutex::new(vec![(program.to_string(), outcome)]),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Arguments the most recent invocation was given
    pub fn last_call_args(&self) -> Option<Vec<std::ffi::OsString>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<Output> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|arg| arg.to_os_string()).collect());

        let mut outcomes = self.outcomes.lock().unwrap();

        if let Some(position) = outcomes.iter().position(|(p, _)| p == program) {
            let (_, outcome) = outcomes.remove(position);
            return match outcome {
                MockRunOutcome::SpawnFailure => Err(io::Error::from(io::ErrorKind::NotFound)),
                MockRunOutcome::Completed {
                    exit_code,
                    stdout,
                    stderr,
                } => Ok(Output {
                    status: create_exit_status(exit_code),
                    stdout: stdout.into_bytes(),
                    stderr: stderr.into_bytes(),
                }),
            };
        }

        // Default: successful empty output
        Ok(Output {
            status: create_exit_status(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }
}

#[cfg(test)]
fn create_exit_status(code: i32) -> std::process::ExitStatus {
    // Workaround since ExitStatus can't be constructed directly
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // from_raw takes a wait() status word; the exit code lives in the high byte
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }
}
