use super::WgbTreeMap;

/// Identifier reported by [`WgbTreeMap::name`].
const NAME: &str = "white_grey_black";

impl<K, V> WgbTreeMap<K, V> {
    /// Number of levels in the tree, counting Grey, White and Black layers alike.
    /// An empty map has depth 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map: WgbTreeMap<u32, ()> = (0..1000).map(|k| (k, ())).collect();
    /// assert!(map.depth() <= 2 * 10 + 2);
    /// ```
    pub fn depth(&self) -> usize {
        self.raw.lock().depth()
    }

    /// Number of nodes. Every node holds exactly one entry.
    pub fn node_count(&self) -> usize {
        self.raw.lock().node_count()
    }

    /// Number of allocated but unused child slots.
    pub fn empty_node_count(&self) -> usize {
        self.raw.lock().empty_node_count()
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.raw.lock().len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.raw.lock().is_empty()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        NAME
    }
}
