/// Prefix of identifiers issued to dropped nodes.
pub const DROP_ID_PREFIX: &str = "dndnode_";

/// Hands out `dndnode_N` identifiers. Each canvas owns one, so two mounted
/// canvases never collide.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
	issued: u32,
}

impl IdGenerator {
	/// Generator whose first id is `dndnode_1`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues the next id.
	pub fn next_id(&mut self) -> String {
		self.issued += 1;
		format!("{DROP_ID_PREFIX}{}", self.issued)
	}

	/// Id issued before the most recent one, or `None` if at most one was issued.
	pub fn previous_id(&self) -> Option<String> {
		(self.issued > 1).then(|| format!("{DROP_ID_PREFIX}{}", self.issued - 1))
	}
}
