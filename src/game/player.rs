use std::fmt;

/// One of the two seats at the table. Cells and statuses store the seat; the
/// identity registered for it lives in the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Position of this seat in a two-element player array
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

/// Immutable identity token for a participant, usually a colour name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(label: impl Into<String>) -> Self {
        Identity(label.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identities are compared case-insensitively when registering players,
    /// so "Red" and "red" cannot sit at the same table.
    pub fn same_as(&self, other: &Identity) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(label: &str) -> Self {
        Identity::new(label)
    }
}

impl From<String> for Identity {
    fn from(label: String) -> Self {
        Identity::new(label)
    }
}
