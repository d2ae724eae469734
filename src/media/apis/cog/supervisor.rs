use std::{io, process::Stdio};

use tokio::process::{Child, Command};

/// Starts the inference server as a child of the worker.
///
/// The child is killed when the returned handle is dropped, so the server
/// never outlives the worker.
pub fn spawn_server(command_line: &str) -> io::Result<Child> {
    let mut parts = command_line.split_whitespace();

    let Some(program) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "inference server command is empty",
        ));
    };

    let child = Command::new(program)
        .args(parts)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    tracing::info!(
        "started inference server `{}` (pid {:?})",
        command_line,
        child.id()
    );

    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawns_and_reports_exit() {
        let mut child = spawn_server("sh -c true").unwrap();

        let status = child.wait().await.unwrap();

        assert!(status.success());
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let result = spawn_server("   ");

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn unknown_program_fails_to_start() {
        assert!(spawn_server("inference-server-that-does-not-exist --port 5000").is_err());
    }
}
