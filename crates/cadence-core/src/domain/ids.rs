//! Strongly-typed identifiers.
//!
//! ULID ベースの ID + phantom type パターン。`InstanceId` と `TimerId` は
//! 実行時には同じ 128-bit ですが、型としては混同できません。
//! 生成は `IdGenerator` ポート経由で行います。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for one ID kind; supplies the `Display` prefix.
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic ID type. The marker `T` costs nothing at runtime (PhantomData)
/// and everything at compile time: handles of different kinds cannot be
/// swapped for one another.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker for admitted task instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Instance {}

impl IdMarker for Instance {
    fn prefix() -> &'static str {
        "instance-"
    }
}

/// Marker for software timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timer {}

impl IdMarker for Timer {
    fn prefix() -> &'static str {
        "timer-"
    }
}

/// Identifier of one admitted instance (opaque handle name).
pub type InstanceId = Id<Instance>;

/// Identifier of one started timer.
pub type TimerId = Id<Timer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_their_prefix() {
        let instance = InstanceId::from_ulid(Ulid::new());
        let timer = TimerId::from_ulid(Ulid::new());

        assert!(instance.to_string().starts_with("instance-"));
        assert!(timer.to_string().starts_with("timer-"));

        // The whole point: the two kinds cannot be mixed.
        // let _: InstanceId = timer; // <- does not compile
    }

    #[test]
    fn phantom_marker_is_free() {
        use std::mem::size_of;
        assert_eq!(size_of::<InstanceId>(), size_of::<Ulid>());
        assert_eq!(size_of::<TimerId>(), size_of::<Ulid>());
    }

    #[test]
    fn ids_survive_serde() {
        let id = InstanceId::from_ulid(Ulid::new());
        let json = serde_json::to_string(&id).unwrap();
        let back: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
