//! Small string and timing utilities used alongside the client.
//!
//! The timing helpers run on tokio and must be used from within a runtime.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Shortens `s` to at most `length` chars, ending with `ending` when cut.
pub fn truncate(s: &str, length: usize, ending: &str) -> String {
    if s.chars().count() <= length {
        return s.to_string();
    }
    let keep = length.saturating_sub(ending.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ending);
    out
}

/// Upper-cases the first char and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Loose `local@domain.tld` check: no whitespace, one `@`, and a dot inside
/// the domain with text on both sides.
pub fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.contains('@') && !part.contains(char::is_whitespace);
    if !clean(local) || !clean(domain) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `"{prefix}-{unix millis}-{9 random base36 chars}"`.
pub fn generate_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut bits = Uuid::new_v4().as_u128();
    let suffix: String = (0..9)
        .map(|_| {
            let c = BASE36[(bits % 36) as usize] as char;
            bits /= 36;
            c
        })
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}

pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Runs only the most recent action, once `wait` passes without another call.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: None }
    }

    /// Schedules `action`, cancelling any action still waiting.
    pub fn call<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action();
        });
        if let Some(previous) = self.pending.replace(handle) {
            previous.abort();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Accepts at most one call per `limit`.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    /// Runs `action` unless the previous accepted call was less than `limit`
    /// ago. Returns whether it ran.
    pub fn try_run<F: FnOnce()>(&mut self, action: F) -> bool {
        let now = Instant::now();
        if self.last.is_some_and(|last| now.duration_since(last) < self.limit) {
            return false;
        }
        self.last = Some(now);
        action();
        true
    }
}
