use std::time::Duration;

use tokio::{sync::watch, time::Instant};

/// Caller side of a cancellation pair.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);
impl CancelHandle {
	pub fn cancel(&self) {
		self.0.send_replace(true);
	}
}

/// Observer side of a cancellation pair. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);
impl CancelSignal {
	pub fn is_cancelled(&self) -> bool {
		*self.0.borrow()
	}
}

pub fn cancellation() -> (CancelHandle, CancelSignal) {
	let (tx, rx) = watch::channel(false);

	(CancelHandle(tx), CancelSignal(rx))
}

/// Per-call cancellation and deadline for a search.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
	pub cancel: Option<CancelSignal>,
	pub deadline: Option<Instant>,
}
impl SearchControl {
	pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
		self.cancel = Some(signal);

		self
	}

	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);

		self
	}

	pub fn with_timeout(self, timeout: Duration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.as_ref().map(CancelSignal::is_cancelled).unwrap_or(false)
	}

	pub fn deadline_passed(&self) -> bool {
		self.deadline.map(|deadline| Instant::now() >= deadline).unwrap_or(false)
	}
}
