//! 通知服务
//!
//! 每次被接受的订单状态流转恰好生成一条通知：写入下单用户的收件箱，
//! 同时在消息总线上发布 `OrderStatusChanged`。

use shared::message::{BusMessage, OrderStatusChangedPayload};
use shared::models::{Notification, Order};
use shared::order::OrderStatus;
use shared::util::{new_id, now_millis};

use crate::db::MemoryStore;
use crate::db::repository::{NotificationRepository, RepoError};
use crate::message::MessageBus;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    bus: MessageBus,
}

impl NotificationService {
    pub fn new(store: MemoryStore, bus: MessageBus) -> Self {
        Self {
            repo: NotificationRepository::new(store),
            bus,
        }
    }

    /// 订单状态变更通知 (order 为变更后的订单)
    pub async fn notify_status_change(
        &self,
        order: &Order,
        from: OrderStatus,
    ) -> AppResult<Notification> {
        let (title, message) = order
            .status
            .notification(&order.order_number, order.estimated_time.as_deref());

        let notification = self
            .repo
            .insert(Notification {
                id: new_id(),
                user_id: order.user_id.clone(),
                order_id: order.id.clone(),
                order_number: order.order_number.clone(),
                status: order.status,
                title: title.clone(),
                message: message.clone(),
                read: false,
                created_at: now_millis(),
            })
            .await?;

        let payload = OrderStatusChangedPayload {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            user_id: order.user_id.clone(),
            restaurant_id: order.restaurant_id.clone(),
            from,
            to: order.status,
            estimated_time: order.estimated_time.clone(),
            title,
            message,
        };
        match BusMessage::order_status_changed(&payload) {
            Ok(msg) => {
                self.bus.publish(msg);
            }
            Err(e) => tracing::error!(error = %e, order_id = %order.id, "Failed to encode status change"),
        }

        Ok(notification)
    }

    /// 用户的通知列表 (最新在前)
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        Ok(self.repo.find_by_user(user_id).await?)
    }

    /// 某订单的通知 (按时间顺序)
    pub async fn for_order(&self, order_id: &str) -> AppResult<Vec<Notification>> {
        Ok(self.repo.find_by_order(order_id).await?)
    }

    /// 标记单条已读
    pub async fn mark_read(&self, user_id: &str, id: &str) -> AppResult<Notification> {
        self.repo.mark_read(user_id, id).await.map_err(|e| match e {
            RepoError::NotFound(_) => AppError::missing(ErrorCode::NotificationNotFound, id),
            other => other.into(),
        })
    }

    /// 全部标记已读，返回剩余未读数 (恒为 0)
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<usize> {
        let changed = self.repo.mark_all_read(user_id).await?;
        tracing::debug!(user_id = %user_id, changed, "Notifications marked read");
        Ok(self.repo.unread_count(user_id).await?)
    }

    pub async fn unread_count(&self, user_id: &str) -> AppResult<usize> {
        Ok(self.repo.unread_count(user_id).await?)
    }
}
