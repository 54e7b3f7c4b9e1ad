use crate::models::Employee;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// Repository Trait
///
/// The backing store for employee records. Handlers only see this trait, so tests can
/// substitute a mock and a database-backed store can be dropped in later.
#[async_trait]
pub trait Repository: Send + Sync {
    // All stored employees, in insertion order.
    async fn list_employees(&self) -> Vec<Employee>;

    async fn get_employee(&self, id: i64) -> Option<Employee>;

    // Stores a batch and returns it with ids assigned. Duplicate codes are accepted.
    async fn create_employees(&self, employees: Vec<Employee>) -> Vec<Employee>;
}

/// RepositoryState
///
/// The concrete type used to share the store across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// InMemoryRepository
///
/// Process-local store. Ids are assigned sequentially from 1; any id on an incoming
/// record is replaced.
pub struct InMemoryRepository {
    employees: RwLock<Vec<Employee>>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_employees(&self) -> Vec<Employee> {
        self.employees.read().await.clone()
    }

    async fn get_employee(&self, id: i64) -> Option<Employee> {
        self.employees
            .read()
            .await
            .iter()
            .find(|employee| employee.id == Some(id))
            .cloned()
    }

    async fn create_employees(&self, employees: Vec<Employee>) -> Vec<Employee> {
        let mut store = self.employees.write().await;

        let created: Vec<Employee> = employees
            .into_iter()
            .map(|employee| Employee {
                id: Some(self.next_id.fetch_add(1, Ordering::Relaxed)),
                ..employee
            })
            .collect();

        store.extend(created.iter().cloned());
        created
    }
}
