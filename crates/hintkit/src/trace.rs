//! Correlation ids for hint requests.
//!
//! Every [`Tutor::produce_hint`](crate::Tutor::produce_hint) call runs inside a
//! span tagged with a [`RequestId`], so the gate decision, the completion call
//! and any failure can be tied together in the logs.
//!
//! Ids read `rq-<process>-<seq>`. The process part is fixed at first use
//! (start time and pid), so ids from two server runs never collide; the
//! sequence numbers the requests of one run in arrival order.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

static PROCESS_TAG: OnceLock<String> = OnceLock::new();
static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn process_tag() -> &'static str {
    PROCESS_TAG.get_or_init(|| {
        let started = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        format!("{started:x}{:04x}", std::process::id() & 0xffff)
    })
}

/// Id of one hint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId {
    seq: u64,
    text: String,
}

impl RequestId {
    /// Mint the next id for this process.
    pub fn next() -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self {
            seq,
            text: format!("rq-{}-{seq:06}", process_tag()),
        }
    }

    /// Position of this request among those served by this process.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let a = RequestId::next();
        let b = RequestId::next();
        assert_ne!(a, b);
        assert!(b.seq() > a.seq());
    }

    #[test]
    fn ids_share_the_process_tag() {
        let a = RequestId::next();
        let b = RequestId::next();
        let prefix = format!("rq-{}-", process_tag());
        assert!(a.as_str().starts_with(&prefix));
        assert!(b.to_string().starts_with(&prefix));
        assert!(a.as_str().ends_with(&format!("{:06}", a.seq())));
    }
}
