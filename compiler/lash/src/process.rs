use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;

use lash_eval::host::{ExecOutput, ExecRequest, ProcessRunner, StreamMode};

use crate::errors;

/// Runs programs with `std::process`, blocking until they exit.
///
/// Kept streams are read on scoped threads so a child filling one pipe can
/// never stall on the other. Forwarded streams are written straight to the
/// host's stderr, leaving stdout to the shell's own output.
#[derive(Default)]
pub struct ThreadedProcessRunner;

fn stdio(mode: StreamMode) -> Stdio {
    match mode {
        StreamMode::Ignore => Stdio::null(),
        StreamMode::Keep => Stdio::piped(),
        StreamMode::Forward => Stdio::from(io::stderr()),
    }
}

fn drain(pipe: Option<impl Read>) -> io::Result<Option<String>> {
    let Some(mut pipe) = pipe else {
        return Ok(None);
    };
    let mut bytes = Vec::new();
    pipe.read_to_end(&mut bytes)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

impl ProcessRunner for ThreadedProcessRunner {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput, String> {
        tracing::debug!(program = %request.program, args = ?request.args, "spawning");
        let mut child = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .env_clear()
            .envs(request.env.iter().map(|(name, value)| (name, value)))
            .stdin(Stdio::inherit())
            .stdout(stdio(request.out))
            .stderr(stdio(request.err))
            .spawn()
            .map_err(|err| errors::spawn_failed(&request.program, &err))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr) = thread::scope(|scope| {
            let out = scope.spawn(move || drain(stdout));
            let err = scope.spawn(move || drain(stderr));
            (out.join(), err.join())
        });
        let read_failed = |_| format!("Reading the output of {} failed", request.program);
        let stdout = stdout.map_err(read_failed)?.map_err(|err| err.to_string())?;
        let stderr = stderr.map_err(read_failed)?.map_err(|err| err.to_string())?;

        let status = child.wait().map_err(|err| err.to_string())?;
        let code = status.code().ok_or_else(errors::signal_exit)?;
        tracing::debug!(program = %request.program, code, "exited");
        Ok(ExecOutput {
            stdout,
            stderr,
            code,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn request(script: &str, out: StreamMode, err: StreamMode) -> ExecRequest {
        ExecRequest {
            program: "/bin/sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            env: vec![("GREETING".to_string(), "hello".to_string())],
            cwd: std::env::temp_dir(),
            out,
            err,
        }
    }

    #[test]
    fn kept_streams_are_collected() {
        let output = ThreadedProcessRunner
            .run(&request(
                "echo $GREETING; echo oops >&2; exit 4",
                StreamMode::Keep,
                StreamMode::Keep,
            ))
            .unwrap();
        assert_eq!(
            output,
            ExecOutput {
                stdout: Some("hello\n".to_string()),
                stderr: Some("oops\n".to_string()),
                code: 4,
            }
        );
    }

    #[test]
    fn ignored_streams_are_absent() {
        let output = ThreadedProcessRunner
            .run(&request("echo hi", StreamMode::Ignore, StreamMode::Forward))
            .unwrap();
        assert_eq!(output.stdout, None);
        assert_eq!(output.stderr, None);
        assert_eq!(output.code, 0);
    }

    #[test]
    fn killed_processes_fail() {
        let err = ThreadedProcessRunner
            .run(&request("kill -9 $$", StreamMode::Ignore, StreamMode::Ignore))
            .unwrap_err();
        assert_eq!(err, "Execution of shell command failed.");
    }

    #[test]
    fn missing_programs_fail_to_spawn() {
        let mut missing = request("", StreamMode::Keep, StreamMode::Keep);
        missing.program = "/no/such/program".to_string();
        let err = ThreadedProcessRunner.run(&missing).unwrap_err();
        assert!(err.starts_with("Cannot run /no/such/program"));
    }
}
