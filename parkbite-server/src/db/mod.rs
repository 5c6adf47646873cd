//! 数据存储层
//!
//! 纯内存存储，进程退出即丢失。每类实体一张 `DashMap` 表，
//! 读写都经过 [`repository`] 中的各实体 Repository。
//! 并发写入为最后写入者胜出，不做乐观锁。

pub mod repository;
pub mod seed;

use std::sync::Arc;

use dashmap::DashMap;
use shared::models::{
    MenuCategory, MenuItem, Notification, Order, OrderItem, Restaurant, TechPark, User,
};

/// 内存表集合
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub tech_parks: DashMap<String, TechPark>,
    pub restaurants: DashMap<String, Restaurant>,
    pub categories: DashMap<String, MenuCategory>,
    pub menu_items: DashMap<String, MenuItem>,
    pub users: DashMap<String, User>,
    pub orders: DashMap<String, Order>,
    /// 订单明细，按订单 ID 分组
    pub order_items: DashMap<String, Vec<OrderItem>>,
    pub notifications: DashMap<String, Notification>,
}

/// 内存存储 (Arc 共享，克隆成本极低)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tables(&self) -> &Tables {
        &self.tables
    }
}
