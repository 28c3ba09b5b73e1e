use super::WgbTreeMap;
use crate::error::WgbError;
use crate::raw::{Capacity, RawWgbTree};

/// Tuning for a [`WgbTreeMap`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WgbConfig {
    /// Number of hash buckets in the root's White and Black children. Each deeper
    /// bucket layer uses the next prime above its parent's count.
    pub first_capacity: usize,
}

impl WgbConfig {
    /// Checks that the configuration describes a usable tree.
    ///
    /// # Errors
    ///
    /// Returns [`WgbError::DivideByZero`] if `first_capacity` is zero.
    pub fn validate(&self) -> Result<(), WgbError> {
        self.capacity().map(|_| ())
    }

    pub(crate) fn capacity(&self) -> Result<Capacity, WgbError> {
        Capacity::new(self.first_capacity)
    }
}

impl Default for WgbConfig {
    fn default() -> Self {
        Self {
            first_capacity: Capacity::FIRST.get(),
        }
    }
}

impl<K, V> WgbTreeMap<K, V> {
    /// Creates an empty map with the given configuration.
    ///
    /// This is an extension to the [`QueryableMap`](crate::QueryableMap) API.
    ///
    /// # Errors
    ///
    /// Returns [`WgbError::DivideByZero`] if `config.first_capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::{WgbConfig, WgbError, WgbTreeMap};
    ///
    /// let map: WgbTreeMap<i32, i32> = WgbTreeMap::with_config(WgbConfig { first_capacity: 5 })?;
    /// assert_eq!(map.config().first_capacity, 5);
    ///
    /// let broken = WgbTreeMap::<i32, i32>::with_config(WgbConfig { first_capacity: 0 });
    /// assert_eq!(broken.err(), Some(WgbError::DivideByZero));
    /// # Ok::<(), WgbError>(())
    /// ```
    pub fn with_config(config: WgbConfig) -> Result<Self, WgbError> {
        Ok(Self::from_raw(RawWgbTree::new(config.capacity()?)))
    }

    /// Creates an empty map whose root children use `first_capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`WgbError::DivideByZero`] if `first_capacity` is zero.
    pub fn with_first_capacity(first_capacity: usize) -> Result<Self, WgbError> {
        Self::with_config(WgbConfig { first_capacity })
    }

    /// The configuration this map was created with.
    #[must_use]
    pub fn config(&self) -> WgbConfig {
        WgbConfig {
            first_capacity: self.raw.lock().first_capacity().get(),
        }
    }
}
