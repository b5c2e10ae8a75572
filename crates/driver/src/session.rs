//! Session management - spawning and talking to the Playwright sidecar
//!
//! A `Session` owns one Node process running the embedded driver script,
//! which keeps one browser context alive for the whole test case. Commands
//! are serialized through a single transport, so within a session every
//! operation executes in the order it was invoked.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command as TokioCommand};
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::error::{DriverError, DriverResult};
use crate::locator::Locator;
use crate::protocol::{Assertion, Command, Request, Response, Viewport};

/// The sidecar script, staged into a temp dir at launch.
const DRIVER_SCRIPT: &str = include_str!("runtime/driver.js");

/// Extra headroom on top of the sidecar-side deadline, so the sidecar gets
/// to report its own timeout diff before the Rust side gives up.
const DEADLINE_SLACK: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }

    /// Parse an engine name, falling back to chromium.
    pub fn from_name(name: &str) -> Self {
        match name {
            "firefox" => Browser::Firefox,
            "webkit" => Browser::Webkit,
            _ => Browser::Chromium,
        }
    }
}

/// Configuration for launching a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub browser: Browser,
    pub headless: bool,
    pub viewport: Viewport,

    /// Bound on a single action command (fill, click, ...).
    pub action_timeout: Duration,

    /// Poll window for assertions; matches the engine's expect default.
    pub expect_timeout: Duration,

    pub navigation_timeout: Duration,

    pub launch_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            viewport: Viewport::default(),
            action_timeout: Duration::from_secs(10),
            expect_timeout: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(30),
            launch_timeout: Duration::from_secs(60),
        }
    }
}

struct Transport {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

struct SessionInner {
    transport: tokio::sync::Mutex<Transport>,
    child: tokio::sync::Mutex<Child>,
    next_id: AtomicU64,
    closed: AtomicBool,
    config: SessionConfig,
    // Keeps the staged driver script alive for the sidecar's lifetime.
    _workdir: tempfile::TempDir,
}

/// One browsing context bound to a sidecar process. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Spawn the sidecar and launch the browser.
    pub async fn launch(config: SessionConfig) -> DriverResult<Self> {
        let workdir = tempfile::tempdir()?;
        let script_path = workdir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_SCRIPT)?;

        debug!(script = %script_path.display(), browser = config.browser.as_str(), "spawning driver sidecar");

        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DriverError::RuntimeNotFound
                } else {
                    DriverError::Io(e)
                }
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DriverError::Protocol("sidecar stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DriverError::Protocol("sidecar stdout unavailable".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(stderr));
        }

        let session = Session {
            inner: Arc::new(SessionInner {
                transport: tokio::sync::Mutex::new(Transport {
                    stdin,
                    stdout: BufReader::new(stdout),
                }),
                child: tokio::sync::Mutex::new(child),
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
                config,
                _workdir: workdir,
            }),
        };

        let launch = launch_command(&session.inner.config);
        session.request(launch, "browser launch").await?;
        info!(browser = session.inner.config.browser.as_str(), "browser session ready");

        Ok(session)
    }

    /// Whether the session can still accept commands.
    pub fn is_open(&self) -> bool {
        !self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// The page opened at launch.
    pub fn page(&self) -> Page {
        Page { session: self.clone(), id: 0 }
    }

    /// Open another tab in the same browsing context. Tabs share the
    /// application's persisted store but nothing orders their operations
    /// except explicit polling assertions.
    pub async fn open_page(&self) -> DriverResult<Page> {
        let value = self.request(Command::NewPage, "new page").await?;
        let id = value
            .as_u64()
            .ok_or_else(|| DriverError::Protocol(format!("bad new_page response: {value}")))?;
        Ok(Page { session: self.clone(), id: id as u32 })
    }

    /// Shut the browser down and reap the sidecar.
    pub async fn close(&self) -> DriverResult<()> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Ok(());
        }
        // Best effort: the sidecar closes the browser and exits on `close`.
        let _ = self.request(Command::Close, "session close").await;
        self.inner.closed.store(true, Ordering::SeqCst);

        let mut child = self.inner.child.lock().await;

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id() {
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            }
        }

        if tokio::time::timeout(Duration::from_secs(5), child.wait())
            .await
            .is_err()
        {
            warn!("sidecar did not exit; killing");
            let _ = child.kill().await;
        }

        Ok(())
    }

    pub(crate) async fn request(&self, command: Command, context: &str) -> DriverResult<Value> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(DriverError::InvalidSession("session already closed"));
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let deadline = deadline_for(&command, &self.inner.config);
        let line = serde_json::to_string(&Request { id, command })?;

        let mut guard = self.inner.transport.lock().await;
        let transport = &mut *guard;

        let roundtrip = async move {
            transport.stdin.write_all(line.as_bytes()).await?;
            transport.stdin.write_all(b"\n").await?;
            transport.stdin.flush().await?;

            loop {
                let mut buf = String::new();
                let n = transport.stdout.read_line(&mut buf).await?;
                if n == 0 {
                    return Err(DriverError::Protocol(
                        "sidecar closed its stdout".to_string(),
                    ));
                }
                let raw = buf.trim();
                if raw.is_empty() {
                    continue;
                }
                let resp: Response = serde_json::from_str(raw)?;
                if resp.id != id {
                    // Response to an earlier call that timed out on our side.
                    debug!(got = resp.id, want = id, "skipping stale sidecar response");
                    continue;
                }
                return Ok(resp);
            }
        };

        match tokio::time::timeout(deadline, roundtrip).await {
            Ok(Ok(resp)) => resp.into_result(context),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DriverError::Protocol(format!(
                "no response from sidecar within {} ms for {context}",
                deadline.as_millis()
            ))),
        }
    }
}

fn launch_command(config: &SessionConfig) -> Command {
    Command::Launch {
        browser: config.browser.as_str().to_string(),
        headless: config.headless,
        viewport: config.viewport,
        action_timeout_ms: config.action_timeout.as_millis() as u64,
        navigation_timeout_ms: config.navigation_timeout.as_millis() as u64,
    }
}

fn deadline_for(command: &Command, config: &SessionConfig) -> Duration {
    match command {
        Command::Launch { .. } => config.launch_timeout,
        Command::Navigate { .. } | Command::GoBack { .. } => {
            config.navigation_timeout + DEADLINE_SLACK
        }
        Command::Expect { timeout_ms, .. } | Command::WaitForCondition { timeout_ms, .. } => {
            Duration::from_millis(*timeout_ms) + DEADLINE_SLACK
        }
        Command::Close => Duration::from_secs(10),
        _ => config.action_timeout + DEADLINE_SLACK,
    }
}

async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(target: "refresh_driver::sidecar", "{line}");
    }
}

/// One tab of a session's browsing context. This is the concrete [`Driver`].
#[derive(Clone)]
pub struct Page {
    session: Session,
    id: u32,
}

impl Page {
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn expect_ms(&self) -> u64 {
        self.session.inner.config.expect_timeout.as_millis() as u64
    }

    async fn expect(&self, target: Option<&Locator>, assert: Assertion) -> DriverResult<()> {
        let context = target
            .map(|t| t.to_string())
            .unwrap_or_else(|| format!("page {}", self.id));
        self.session
            .request(
                Command::Expect {
                    page: self.id,
                    target: target.cloned(),
                    assert,
                    timeout_ms: self.expect_ms(),
                },
                &context,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Driver for Page {
    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.session
            .request(Command::Navigate { page: self.id, url: url.to_string() }, url)
            .await?;
        Ok(())
    }

    async fn go_back(&self) -> DriverResult<()> {
        self.session
            .request(Command::GoBack { page: self.id }, "history back")
            .await?;
        Ok(())
    }

    async fn fill(&self, target: &Locator, value: &str) -> DriverResult<()> {
        self.session
            .request(
                Command::Fill {
                    page: self.id,
                    target: target.clone(),
                    value: value.to_string(),
                },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn press(&self, target: &Locator, key: &str) -> DriverResult<()> {
        self.session
            .request(
                Command::Press { page: self.id, target: target.clone(), key: key.to_string() },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn click(&self, target: &Locator) -> DriverResult<()> {
        self.session
            .request(
                Command::Click { page: self.id, target: target.clone() },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn dblclick(&self, target: &Locator) -> DriverResult<()> {
        self.session
            .request(
                Command::DblClick { page: self.id, target: target.clone() },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn check(&self, target: &Locator) -> DriverResult<()> {
        self.session
            .request(
                Command::Check { page: self.id, target: target.clone() },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn uncheck(&self, target: &Locator) -> DriverResult<()> {
        self.session
            .request(
                Command::Uncheck { page: self.id, target: target.clone() },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn dispatch_event(&self, target: &Locator, event: &str) -> DriverResult<()> {
        self.session
            .request(
                Command::DispatchEvent {
                    page: self.id,
                    target: target.clone(),
                    event: event.to_string(),
                },
                &target.to_string(),
            )
            .await?;
        Ok(())
    }

    async fn expect_visible(&self, target: &Locator) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Visible).await
    }

    async fn expect_hidden(&self, target: &Locator) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Hidden).await
    }

    async fn expect_text(&self, target: &Locator, expected: &[String]) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Text { expected: expected.to_vec() })
            .await
    }

    async fn expect_text_contains(&self, target: &Locator, needle: &str) -> DriverResult<()> {
        self.expect(Some(target), Assertion::TextContains { needle: needle.to_string() })
            .await
    }

    async fn expect_count(&self, target: &Locator, expected: usize) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Count { expected }).await
    }

    async fn expect_class(&self, target: &Locator, class: &str, present: bool) -> DriverResult<()> {
        self.expect(
            Some(target),
            Assertion::Class { name: class.to_string(), present },
        )
        .await
    }

    async fn expect_checked(&self, target: &Locator, expected: bool) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Checked { expected }).await
    }

    async fn expect_value(&self, target: &Locator, expected: &str) -> DriverResult<()> {
        self.expect(Some(target), Assertion::Value { expected: expected.to_string() })
            .await
    }

    async fn expect_title_contains(&self, needle: &str) -> DriverResult<()> {
        self.expect(None, Assertion::TitleContains { needle: needle.to_string() })
            .await
    }

    async fn wait_for_condition(
        &self,
        script: &str,
        arg: Value,
        timeout: Duration,
    ) -> DriverResult<()> {
        self.session
            .request(
                Command::WaitForCondition {
                    page: self.id,
                    script: script.to_string(),
                    arg,
                    timeout_ms: timeout.as_millis() as u64,
                },
                "page-side condition",
            )
            .await?;
        Ok(())
    }

    async fn eval(&self, script: &str) -> DriverResult<Value> {
        self.session
            .request(
                Command::Evaluate { page: self.id, script: script.to_string() },
                "evaluate",
            )
            .await
    }
}
