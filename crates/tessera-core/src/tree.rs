mod json;

mod kind;
pub use kind::NodeKind;

mod number;
pub use number::Number;

use indexmap::IndexMap;

/// The dynamically-typed intermediate representation objects serialize to.
///
/// Maps keep insertion order and lists keep positional order, so a tree
/// written out and read back presents its entries in the same order.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum TreeNode {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<TreeNode>),
    Map(IndexMap<String, TreeNode>),
}

impl TreeNode {
    pub const fn null() -> TreeNode {
        TreeNode::Null
    }

    /// Returns an empty map node.
    pub fn map() -> TreeNode {
        TreeNode::Map(IndexMap::new())
    }

    /// Returns an empty list node.
    pub fn list() -> TreeNode {
        TreeNode::List(Vec::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Null => NodeKind::Null,
            TreeNode::Bool(_) => NodeKind::Bool,
            TreeNode::Number(_) => NodeKind::Number,
            TreeNode::String(_) => NodeKind::String,
            TreeNode::List(_) => NodeKind::List,
            TreeNode::Map(_) => NodeKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeNode::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, TreeNode::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TreeNode::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TreeNode::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TreeNode::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TreeNode::Map(_))
    }

    /// Looks up `key` in a map node. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        match self {
            TreeNode::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TreeNode> {
        match self {
            TreeNode::Map(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Returns the element at `index` of a list node. Returns `None` for
    /// other kinds and out-of-range indices.
    pub fn at(&self, index: usize) -> Option<&TreeNode> {
        match self {
            TreeNode::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Iterates the keys of a map node in insertion order. Other kinds yield
    /// nothing.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_map()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Iterates the key/value pairs of a map node in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeNode)> + '_ {
        self.as_map()
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Iterates the elements of a list node.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.as_list().into_iter().flatten()
    }

    /// Number of entries of a map or elements of a list; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            TreeNode::List(items) => items.len(),
            TreeNode::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an entry into a map node, replacing and returning any previous
    /// value under `key`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a map.
    #[track_caller]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TreeNode>) -> Option<TreeNode> {
        match self {
            TreeNode::Map(map) => map.insert(key.into(), value.into()),
            _ => panic!("insert on a {} node", self.kind()),
        }
    }

    /// Appends an element to a list node.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a list.
    #[track_caller]
    pub fn push(&mut self, value: impl Into<TreeNode>) {
        match self {
            TreeNode::List(items) => items.push(value.into()),
            _ => panic!("push on a {} node", self.kind()),
        }
    }

    /// Stores `value` at position `index` of a list node, padding any gap with
    /// `Null`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a list.
    #[track_caller]
    pub fn set_at(&mut self, index: usize, value: impl Into<TreeNode>) {
        match self {
            TreeNode::List(items) => {
                if items.len() <= index {
                    items.resize(index + 1, TreeNode::Null);
                }
                items[index] = value.into();
            }
            _ => panic!("set_at on a {} node", self.kind()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            TreeNode::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match *self {
            TreeNode::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the node as an `i64` if it is a number representable without
    /// loss, integral floats included.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number()?.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_number()?.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeNode::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, TreeNode>> {
        match self {
            TreeNode::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn take(&mut self) -> TreeNode {
        std::mem::take(self)
    }
}

impl From<bool> for TreeNode {
    fn from(value: bool) -> Self {
        TreeNode::Bool(value)
    }
}

impl From<Number> for TreeNode {
    fn from(value: Number) -> Self {
        TreeNode::Number(value)
    }
}

macro_rules! impl_from_number {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for TreeNode {
                fn from(value: $ty) -> Self {
                    TreeNode::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<String> for TreeNode {
    fn from(value: String) -> Self {
        TreeNode::String(value)
    }
}

impl From<&str> for TreeNode {
    fn from(value: &str) -> Self {
        TreeNode::String(value.to_string())
    }
}

impl From<Vec<TreeNode>> for TreeNode {
    fn from(value: Vec<TreeNode>) -> Self {
        TreeNode::List(value)
    }
}

impl From<IndexMap<String, TreeNode>> for TreeNode {
    fn from(value: IndexMap<String, TreeNode>) -> Self {
        TreeNode::Map(value)
    }
}

impl<T: Into<TreeNode>> From<Option<T>> for TreeNode {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => TreeNode::Null,
        }
    }
}

impl FromIterator<TreeNode> for TreeNode {
    fn from_iter<I: IntoIterator<Item = TreeNode>>(iter: I) -> Self {
        TreeNode::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, TreeNode)> for TreeNode {
    fn from_iter<I: IntoIterator<Item = (K, TreeNode)>>(iter: I) -> Self {
        TreeNode::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_at_pads_with_null() {
        let mut node = TreeNode::list();
        node.set_at(2, "c");
        node.set_at(0, "a");

        assert_eq!(node.len(), 3);
        assert_eq!(node.at(0), Some(&TreeNode::from("a")));
        assert!(node.at(1).unwrap().is_null());
        assert_eq!(node.at(2).and_then(TreeNode::as_str), Some("c"));
    }

    #[test]
    fn scalar_len_is_zero() {
        assert_eq!(TreeNode::from(5).len(), 0);
        assert!(TreeNode::Null.is_empty());
    }

    #[test]
    #[should_panic(expected = "insert on a list node")]
    fn insert_on_list_panics() {
        TreeNode::list().insert("a", 1);
    }
}
