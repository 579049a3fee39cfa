use std::fmt;
use uuid::Uuid;

/// Fitness score. Higher is better.
pub type Fitness = f64;

/// Globally unique identity of an individual, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndividualId(Uuid);

impl IndividualId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Five character prefix, enough to tell individuals apart in log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..5].to_string()
    }
}

impl Default for IndividualId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for IndividualId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = IndividualId::new();
        let b = IndividualId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_id_is_prefix() {
        let id = IndividualId::new();
        let short = id.short();
        assert_eq!(short.len(), 5);
        assert!(id.as_uuid().simple().to_string().starts_with(&short));
    }
}
