//! 节点定义
//!
//! 节点只是一个整数 ID。ID 带符号，超级源点按约定使用 -1。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        Self(i64::from(id))
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(i64::from(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_conversions() {
        assert_eq!(NodeId::from(3i32), NodeId::new(3));
        assert_eq!(NodeId::from(-1i64).as_i64(), -1);
        assert_eq!(NodeId::from(7u32).to_string(), "7");
    }

    #[test]
    fn test_node_id_ordering() {
        let mut ids = vec![NodeId::new(4), NodeId::new(-1), NodeId::new(0)];
        ids.sort();
        assert_eq!(ids, vec![NodeId::new(-1), NodeId::new(0), NodeId::new(4)]);
    }
}
