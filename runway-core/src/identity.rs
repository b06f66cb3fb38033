use rand::Rng;

use crate::user::UserId;
use crate::{LedgerError, LedgerResult};

/// Source of candidate user IDs. The ledger retries on collisions, so
/// implementations need not track which IDs are already taken.
pub trait UserIdGenerator: Send {
    fn generate(&mut self) -> UserId;

    /// Number of distinct IDs this generator can ever produce.
    fn id_space(&self) -> u64;
}

fn validate_range(min: u32, max: u32) -> LedgerResult<()> {
    if min > max {
        return Err(LedgerError::InvalidIdRange { min, max });
    }
    Ok(())
}

/// Uniformly random numeric IDs in `min..=max`.
#[derive(Debug, Clone)]
pub struct RandomUserIds {
    min: u32,
    max: u32,
}

impl RandomUserIds {
    pub const DEFAULT_MIN: u32 = 10;
    pub const DEFAULT_MAX: u32 = 99;

    pub fn new(min: u32, max: u32) -> LedgerResult<Self> {
        validate_range(min, max)?;
        Ok(Self { min, max })
    }
}

impl Default for RandomUserIds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl UserIdGenerator for RandomUserIds {
    fn generate(&mut self) -> UserId {
        let n = rand::thread_rng().gen_range(self.min..=self.max);
        UserId::new(n.to_string())
    }

    fn id_space(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }
}

/// Hands out `min, min+1, ..., max` and then wraps around.
#[derive(Debug, Clone)]
pub struct SequentialUserIds {
    min: u32,
    max: u32,
    next: u32,
}

impl SequentialUserIds {
    pub fn new(min: u32, max: u32) -> LedgerResult<Self> {
        validate_range(min, max)?;
        Ok(Self { min, max, next: min })
    }
}

impl UserIdGenerator for SequentialUserIds {
    fn generate(&mut self) -> UserId {
        let id = self.next;
        self.next = if id >= self.max { self.min } else { id + 1 };
        UserId::new(id.to_string())
    }

    fn id_space(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_stay_in_range() {
        let mut ids = RandomUserIds::default();
        for _ in 0..500 {
            let n: u32 = ids.generate().as_str().parse().unwrap();
            assert!((10..=99).contains(&n));
        }
        assert_eq!(ids.id_space(), 90);
    }

    #[test]
    fn test_sequential_ids_wrap() {
        let mut ids = SequentialUserIds::new(1, 3).unwrap();
        let drawn: Vec<String> = (0..4).map(|_| ids.generate().to_string()).collect();
        assert_eq!(drawn, vec!["1", "2", "3", "1"]);
        assert_eq!(ids.id_space(), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            RandomUserIds::new(50, 10),
            Err(LedgerError::InvalidIdRange { min: 50, max: 10 })
        ));
        assert!(SequentialUserIds::new(5, 4).is_err());
    }
}
