/// User-visible state of one fetch action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
	#[default]
	Idle,
	Loading,
	Success,
	Failed(String),
}

impl FetchStatus {
	pub fn is_loading(&self) -> bool {
		matches!(self, FetchStatus::Loading)
	}

	pub fn error(&self) -> Option<&str> {
		match self {
			FetchStatus::Failed(msg) => Some(msg),
			_ => None,
		}
	}
}

/// Generation stamp handed out when a fetch starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets so that only the most recently
/// started request of an action may apply its response.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
	generation: u64,
	status: FetchStatus,
}

impl RequestTracker {
	/// Start a new request, superseding any in flight.
	pub fn begin(&mut self) -> Ticket {
		self.generation += 1;
		self.status = FetchStatus::Loading;
		Ticket(self.generation)
	}

	pub fn is_current(&self, ticket: Ticket) -> bool {
		ticket.0 == self.generation
	}

	/// Record the outcome. Returns `false` (and changes nothing) for stale tickets.
	pub fn finish<T, E: ToString>(&mut self, ticket: Ticket, outcome: &Result<T, E>) -> bool {
		if !self.is_current(ticket) {
			return false;
		}
		self.status = match outcome {
			Ok(_) => FetchStatus::Success,
			Err(e) => FetchStatus::Failed(e.to_string()),
		};
		true
	}

	pub fn status(&self) -> &FetchStatus {
		&self.status
	}
}
