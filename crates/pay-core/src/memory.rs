//! # In-Memory Adapters
//!
//! Process-local implementations of the session and customer ports.
//! Useful for tests and for running the service without a database.

use crate::customer::{CustomerRecord, User, UserId};
use crate::error::{PaymentError, PaymentResult};
use crate::ports::{CustomerStore, SessionFactory, SessionProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Customer records kept in a map keyed by user id
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    records: RwLock<HashMap<UserId, CustomerRecord>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed an existing record
    pub fn with_record(self, record: CustomerRecord) -> Self {
        if let Ok(mut records) = self.records.write() {
            records.insert(record.id.clone(), record);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, user_id: &UserId) -> Option<CustomerRecord> {
        self.records.read().ok()?.get(user_id).cloned()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find(&self, user_id: &UserId) -> PaymentResult<Option<CustomerRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| PaymentError::Internal("customer store lock poisoned".to_string()))?;
        Ok(records.get(user_id).cloned())
    }

    async fn upsert(&self, record: &CustomerRecord) -> PaymentResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PaymentError::Internal("customer store lock poisoned".to_string()))?;
        records
            .entry(record.id.clone())
            .or_insert_with(|| record.clone());
        Ok(())
    }
}

/// A session that always resolves to the same answer
#[derive(Debug, Clone)]
pub struct StaticSession {
    user: Option<User>,
}

impl StaticSession {
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn get_user(&self) -> PaymentResult<Option<User>> {
        Ok(self.user.clone())
    }
}

/// Access token → user table
#[derive(Debug, Clone, Default)]
pub struct InMemorySessions {
    users: Arc<HashMap<String, User>>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a token for a user
    pub fn with_user(mut self, access_token: impl Into<String>, user: User) -> Self {
        Arc::make_mut(&mut self.users).insert(access_token.into(), user);
        self
    }
}

impl SessionFactory for InMemorySessions {
    fn session(&self, access_token: Option<&str>) -> Box<dyn SessionProvider> {
        let user = access_token.and_then(|token| self.users.get(token).cloned());
        Box::new(StaticSession { user })
    }
}
