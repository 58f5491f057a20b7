mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Mock, Server, ServerGuard};
    use predicates::str::contains;

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "urlsieve";

    /// The mocks are returned so they stay registered for the whole test
    async fn server_with_fixtures() -> (ServerGuard, Vec<Mock>) {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for (path, status, content_type) in [
            ("/ok", 200, Some("text/html")),
            ("/redirect", 302, None),
            ("/image", 200, Some("image/png")),
            ("/error", 500, None),
            ("/bad-status", 404, None),
        ] {
            let mut mock = server.mock("HEAD", path).with_status(status);
            if let Some(content_type) = content_type {
                mock = mock.with_header("content-type", content_type);
            }
            mocks.push(mock.create_async().await);
        }
        (server, mocks)
    }

    fn stdout_lines(output: &std::process::Output) -> Vec<String> {
        let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_output__when_no_paths_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().success().stdout(contains("Usage:"));
        Ok(())
    }

    #[test]
    fn test_output__when_timeout_is_invalid() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--timeout").arg("banana").arg("file.txt");

        cmd.assert().failure().stderr(contains("invalid value"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__only_valid_urls_are_printed() -> TestResult {
        let (server, _mocks) = server_with_fixtures().await;
        let base = server.url();
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            format!("{base}/ok,{base}/image, {base}/error ,{base}/bad-status,{base}/redirect")
                .as_bytes(),
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("-t").arg("5s").arg(file.path());
        let output = cmd.output()?;

        assert!(output.status.success());
        assert_eq!(
            stdout_lines(&output),
            vec![format!("{base}/ok"), format!("{base}/redirect")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_output__streaming_path_gives_same_urls() -> TestResult {
        let (server, _mocks) = server_with_fixtures().await;
        let base = server.url();
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(format!("{base}/ok,{base}/image\n{base}/error,{base}/ok\n").as_bytes())?;

        let mut in_memory = Command::cargo_bin(NAME)?;
        in_memory.arg("--no-config").arg(file.path());
        let mut streaming = Command::cargo_bin(NAME)?;
        streaming
            .arg("--no-config")
            .arg("--memory-threshold")
            .arg("1")
            .arg(file.path());

        let expected = vec![format!("{base}/ok"), format!("{base}/ok")];
        assert_eq!(stdout_lines(&in_memory.output()?), expected);
        assert_eq!(stdout_lines(&streaming.output()?), expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_output__directories_are_walked_recursively() -> TestResult {
        let (server, _mocks) = server_with_fixtures().await;
        let base = server.url();
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join("a/b"))?;
        std::fs::create_dir_all(dir.path().join("empty"))?;
        std::fs::write(dir.path().join("top.txt"), format!("{base}/ok"))?;
        std::fs::write(
            dir.path().join("a/b/deep.csv"),
            format!("{base}/redirect,{base}/error"),
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("--concurrency").arg("2").arg(dir.path());
        let output = cmd.output()?;

        assert!(output.status.success());
        assert_eq!(
            stdout_lines(&output),
            vec![format!("{base}/ok"), format!("{base}/redirect")]
        );
        Ok(())
    }

    #[test]
    fn test_output__missing_path_is_reported_but_not_fatal() -> TestResult {
        let dir = tempfile::tempdir()?;
        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg(dir.path().join("does-not-exist"))
            .arg(&empty);

        cmd.assert()
            .success()
            .stdout("")
            .stderr(contains("Error walking path"));
        Ok(())
    }

    #[test]
    fn test_output__quiet_suppresses_diagnostics() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--quiet")
            .arg(dir.path().join("does-not-exist"));

        cmd.assert().success().stdout("").stderr("");
        Ok(())
    }

    #[test]
    fn test_output__invalid_config_file_fails() -> TestResult {
        let mut config = tempfile::NamedTempFile::new()?;
        config.write_all(b"timeout = \"banana\"")?;
        let dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(config.path()).arg(dir.path());

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__config_file_is_applied() -> TestResult {
        let (server, _mocks) = server_with_fixtures().await;
        let base = server.url();
        let mut config = tempfile::NamedTempFile::new()?;
        config.write_all(b"timeout = \"3s\"\nconcurrency = 1\nmemory_threshold = 1\n")?;
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(format!("{base}/ok\n{base}/bad-status").as_bytes())?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(config.path()).arg(file.path());
        let output = cmd.output()?;

        assert!(output.status.success());
        assert_eq!(stdout_lines(&output), vec![format!("{base}/ok")]);
        Ok(())
    }
}
