//! Notification Repository

use shared::models::Notification;

use super::{RepoError, RepoResult};
use crate::db::MemoryStore;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    store: MemoryStore,
}

impl NotificationRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub async fn insert(&self, notification: Notification) -> RepoResult<Notification> {
        self.store
            .tables()
            .notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    /// Notifications of a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Notification>> {
        let mut list: Vec<Notification> = self
            .store
            .tables()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .map(|n| n.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(list)
    }

    /// Notifications about one order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<Notification>> {
        let mut list: Vec<Notification> = self
            .store
            .tables()
            .notifications
            .iter()
            .filter(|n| n.order_id == order_id)
            .map(|n| n.value().clone())
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// Mark one notification read; other users' notifications are reported as not found
    pub async fn mark_read(&self, user_id: &str, id: &str) -> RepoResult<Notification> {
        let mut notification = self
            .store
            .tables()
            .notifications
            .get_mut(id)
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| RepoError::NotFound(format!("Notification {}", id)))?;
        notification.read = true;
        Ok(notification.clone())
    }

    /// Mark all of a user's notifications read, returns how many changed
    pub async fn mark_all_read(&self, user_id: &str) -> RepoResult<usize> {
        let mut changed = 0;
        for mut n in self.store.tables().notifications.iter_mut() {
            if n.user_id == user_id && !n.read {
                n.read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub async fn unread_count(&self, user_id: &str) -> RepoResult<usize> {
        Ok(self
            .store
            .tables()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderStatus;

    fn notification(id: &str, user: &str, at: i64) -> Notification {
        Notification {
            id: id.to_string(),
            user_id: user.to_string(),
            order_id: "o1".to_string(),
            order_number: "ORD-2025-0001".to_string(),
            status: OrderStatus::Confirmed,
            title: "Confirmed".to_string(),
            message: "Order ORD-2025-0001 confirmed".to_string(),
            read: false,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn test_inbox_is_per_user() {
        let repo = NotificationRepository::new(MemoryStore::new());
        repo.insert(notification("n1", "u1", 1)).await.unwrap();
        repo.insert(notification("n2", "u1", 2)).await.unwrap();
        repo.insert(notification("n3", "u2", 3)).await.unwrap();

        let list = repo.find_by_user("u1").await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "n2");

        // u2 cannot read u1's notification
        assert!(matches!(
            repo.mark_read("u2", "n1").await,
            Err(RepoError::NotFound(_))
        ));

        let n = repo.mark_read("u1", "n1").await.unwrap();
        assert!(n.read);
        assert_eq!(repo.unread_count("u1").await.unwrap(), 1);

        assert_eq!(repo.mark_all_read("u1").await.unwrap(), 1);
        assert_eq!(repo.unread_count("u1").await.unwrap(), 0);
        assert_eq!(repo.unread_count("u2").await.unwrap(), 1);
    }
}
