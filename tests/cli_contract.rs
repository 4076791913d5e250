#![cfg(feature = "cli")]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const REGISTRY_FILE: &str = "kafka-topics.txt";

type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// A throwaway project directory with a pinned `brokerkit.toml`.
#[derive(Debug)]
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> TestResult<Self> {
        Self::with_config("")
    }

    fn with_config(contents: &str) -> TestResult<Self> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("brokerkit.toml"), contents)?;
        Ok(Self { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> TestResult<Output> {
        let output = Command::new(env!("CARGO_BIN_EXE_brokerkit"))
            .args(args)
            .current_dir(self.path())
            .env_remove("BROKERKIT_CONFIG")
            .env_remove("RUST_LOG")
            .output()?;
        Ok(output)
    }

    fn registry(&self) -> TestResult<String> {
        Ok(fs::read_to_string(self.path().join(REGISTRY_FILE))?)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn topics_merge_across_invocations() -> TestResult {
    let project = Project::new()?;

    let first = project.run(&["kafka:topics", "orders,payments"])?;
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(project.registry()?, "orders\npayments");

    let second = project.run(&["kafka:topics", "payments,refunds"])?;
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    assert_eq!(project.registry()?, "orders\npayments\nrefunds");
    assert!(stdout(&second).contains("refunds"));

    let repeat = project.run(&["kafka:topics", "orders"])?;
    assert!(repeat.status.success());
    assert!(stdout(&repeat).contains("already registered"));
    assert_eq!(project.registry()?, "orders\npayments\nrefunds");
    Ok(())
}

#[test]
fn topics_drop_empty_entries() -> TestResult {
    let project = Project::new()?;

    let output = project.run(&["kafka:topics", "x, , y"])?;
    assert!(output.status.success());
    assert_eq!(project.registry()?, "x\ny");

    let empty = project.run(&["kafka:topics", " , "])?;
    assert_eq!(empty.status.code(), Some(64));
    assert_eq!(project.registry()?, "x\ny");
    Ok(())
}

#[test]
fn verbose_logs_are_plain_text_when_piped() -> TestResult {
    let project = Project::new()?;

    let output = project.run(&["-v", "kafka:topics", "orders"])?;

    assert!(output.status.success());
    let errors = stderr(&output);
    assert!(errors.contains("loading configuration"), "stderr: {errors}");
    assert!(!errors.contains('\x1b'), "stderr: {errors:?}");
    Ok(())
}

#[test]
fn migrate_requires_registry() -> TestResult {
    let project = Project::new()?;

    let output = project.run(&["kafka:migrate"])?;

    assert_eq!(output.status.code(), Some(66));
    assert!(stderr(&output).contains("No topic registry found"));
    Ok(())
}

#[test]
fn producer_is_generated_once_without_force() -> TestResult {
    let project = Project::new()?;

    let created = project.run(&["kafka:producer", "order created", "orders"])?;
    assert!(created.status.success(), "stderr: {}", stderr(&created));
    let path = project
        .path()
        .join("src/kafka/producers/order_created_producer.rs");
    assert!(fs::read_to_string(&path)?.contains("OrderCreatedProducer"));

    let again = project.run(&["kafka:producer", "order created", "orders"])?;
    assert_eq!(again.status.code(), Some(73));

    let forced = project.run(&["kafka:producer", "order created", "orders", "--force"])?;
    assert!(forced.status.success());
    Ok(())
}

#[test]
fn make_token_patches_env_file() -> TestResult {
    let project = Project::new()?;
    fs::write(project.path().join(".env"), "KAFKA_AUTH_TOKEN=stale\nPORT=3333\n")?;

    let output = project.run(&["make:token"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let token = fs::read_to_string(project.path().join(".brokerkit/token"))?;
    assert_eq!(token.len(), 64);
    assert_eq!(
        fs::read_to_string(project.path().join(".env"))?,
        format!("KAFKA_AUTH_TOKEN={token}\nPORT=3333\n")
    );
    Ok(())
}

#[cfg(unix)]
mod fake_runtime {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Shell stand-in for `docker` that logs its arguments and keeps container state in a file.
    struct FakeRuntime {
        project: Project,
        log: PathBuf,
        _scripts: TempDir,
    }

    impl FakeRuntime {
        fn new(failing_topic: &str) -> TestResult<Self> {
            let dir = TempDir::new()?;
            let log = dir.path().join("calls.log");
            let state = dir.path().join("state.json");
            let script = dir.path().join("fake-docker");
            fs::write(
                &script,
                format!(
                    r#"#!/bin/sh
echo "$*" >> '{log}'
case "$1" in
  ps)
    if [ -f '{state}' ]; then cat '{state}'; fi
    ;;
  create)
    echo '{{"Names":"kafka-server","State":"created"}}' > '{state}'
    ;;
  start)
    echo '{{"Names":"kafka-server","State":"running"}}' > '{state}'
    ;;
  exec)
    if [ "$6" = '{failing_topic}' ]; then echo "topic rejected" >&2; exit 1; fi
    ;;
esac
"#,
                    log = log.display(),
                    state = state.display(),
                ),
            )?;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;

            let project = Project::with_config(&format!(
                "[container]\nruntime = '{}'\n",
                script.display()
            ))?;
            Ok(Self {
                project,
                log,
                _scripts: dir,
            })
        }

        fn calls(&self, verb: &str) -> TestResult<Vec<String>> {
            let log = fs::read_to_string(&self.log).unwrap_or_default();
            Ok(log
                .lines()
                .filter(|line| line.split_whitespace().next() == Some(verb))
                .map(str::to_string)
                .collect())
        }
    }

    #[test]
    fn create_is_idempotent() -> TestResult {
        let runtime = FakeRuntime::new("")?;

        let first = runtime.project.run(&["kafka:create"])?;
        assert!(first.status.success(), "stderr: {}", stderr(&first));
        let creates = runtime.calls("create")?;
        assert_eq!(creates.len(), 1);
        assert!(creates[0].contains("-p 9092:9092"));
        assert!(creates[0].contains("-e ALLOW_PLAINTEXT_LISTENER=yes"));

        let second = runtime.project.run(&["kafka:create"])?;
        assert!(second.status.success());
        assert!(stdout(&second).contains("already exists"));
        assert_eq!(runtime.calls("create")?.len(), 1);
        Ok(())
    }

    #[test]
    fn start_requires_existing_container() -> TestResult {
        let runtime = FakeRuntime::new("")?;

        let output = runtime.project.run(&["kafka:start"])?;

        assert_eq!(output.status.code(), Some(69));
        assert!(stderr(&output).contains("does not exist"));
        assert!(runtime.calls("start")?.is_empty());
        assert!(runtime.calls("create")?.is_empty());
        Ok(())
    }

    #[test]
    fn start_is_idempotent() -> TestResult {
        let runtime = FakeRuntime::new("")?;
        assert!(runtime.project.run(&["kafka:create"])?.status.success());

        let first = runtime.project.run(&["kafka:start"])?;
        assert!(first.status.success(), "stderr: {}", stderr(&first));
        let second = runtime.project.run(&["kafka:start"])?;
        assert!(second.status.success());
        assert!(stdout(&second).contains("already running"));

        assert_eq!(runtime.calls("start")?.len(), 1);
        Ok(())
    }

    #[test]
    fn migrate_halts_at_first_failure() -> TestResult {
        let runtime = FakeRuntime::new("orders")?;
        assert!(
            runtime
                .project
                .run(&["kafka:topics", "orders,payments"])?
                .status
                .success()
        );

        let output = runtime.project.run(&["kafka:migrate"])?;

        assert_eq!(output.status.code(), Some(69));
        let execs = runtime.calls("exec")?;
        assert_eq!(execs.len(), 1);
        assert!(execs[0].contains("--topic orders"));
        assert!(execs[0].contains("--bootstrap-server localhost:9092"));
        let errors = stderr(&output);
        assert_eq!(errors.matches("topic rejected").count(), 1, "stderr: {errors}");
        assert!(errors.starts_with("Error: Migration halted at topic `orders`"));
        Ok(())
    }

    #[test]
    fn migrate_creates_every_topic() -> TestResult {
        let runtime = FakeRuntime::new("")?;
        assert!(
            runtime
                .project
                .run(&["kafka:topics", "orders,payments,refunds"])?
                .status
                .success()
        );

        let output = runtime.project.run(&["kafka:migrate"])?;

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let topics: Vec<String> = runtime
            .calls("exec")?
            .iter()
            .filter_map(|line| line.split_whitespace().nth(5).map(str::to_string))
            .collect();
        assert_eq!(topics, vec!["orders", "payments", "refunds"]);
        Ok(())
    }
}
