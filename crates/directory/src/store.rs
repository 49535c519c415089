//! Record store abstractions + in-memory implementations.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use staffdir_core::{DomainError, DomainResult, EmployeeId, Entity};

use crate::{Employee, EmployeePatch, UserAccount};

/// Storage for registered accounts.
pub trait UserStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<UserAccount>;
    /// Fails with `Conflict` when the email is already taken.
    fn insert(&self, user: UserAccount) -> DomainResult<UserAccount>;
}

/// Storage for employee records.
pub trait EmployeeStore: Send + Sync {
    fn insert(&self, employee: Employee) -> DomainResult<Employee>;
    fn get(&self, id: &EmployeeId) -> Option<Employee>;
    /// All records, oldest first.
    fn list(&self) -> Vec<Employee>;
    fn find_by_designation_or_department(
        &self,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> Vec<Employee>;
    /// Returns the updated record, or `None` if `id` is unknown.
    fn update(&self, id: &EmployeeId, patch: &EmployeePatch) -> Option<Employee>;
    /// Returns the removed record, or `None` if `id` is unknown.
    fn delete(&self, id: &EmployeeId) -> Option<Employee>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        (**self).find_by_email(email)
    }

    fn insert(&self, user: UserAccount) -> DomainResult<UserAccount> {
        (**self).insert(user)
    }
}

impl<S> EmployeeStore for Arc<S>
where
    S: EmployeeStore + ?Sized,
{
    fn insert(&self, employee: Employee) -> DomainResult<Employee> {
        (**self).insert(employee)
    }

    fn get(&self, id: &EmployeeId) -> Option<Employee> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Employee> {
        (**self).list()
    }

    fn find_by_designation_or_department(
        &self,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> Vec<Employee> {
        (**self).find_by_designation_or_department(designation, department)
    }

    fn update(&self, id: &EmployeeId, patch: &EmployeePatch) -> Option<Employee> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &EmployeeId) -> Option<Employee> {
        (**self).delete(id)
    }
}

/// Insertion-ordered, id-keyed table shared by the in-memory stores.
///
/// A poisoned lock is recovered rather than propagated: every mutation below
/// is a single map operation, so the data is never left half-written.
#[derive(Debug)]
pub struct RecordTable<V: Entity> {
    inner: RwLock<TableState<V>>,
}

#[derive(Debug)]
struct TableState<V: Entity> {
    next_seq: u64,
    rows: HashMap<V::Id, (u64, V)>,
}

impl<V: Entity + Clone> RecordTable<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableState {
                next_seq: 0,
                rows: HashMap::new(),
            }),
        }
    }

    /// Insert `value` unless `reject` finds a clash among existing rows.
    pub fn insert_unless<F>(&self, value: V, reject: F) -> DomainResult<V>
    where
        F: Fn(&V) -> Option<String>,
    {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state.rows.contains_key(value.id()) {
            return Err(DomainError::conflict(format!("duplicate id {:?}", value.id())));
        }
        if let Some(reason) = state.rows.values().find_map(|(_, v)| reject(v)) {
            return Err(DomainError::conflict(reason));
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.insert(value.id().clone(), (seq, value.clone()));
        Ok(value)
    }

    pub fn get(&self, id: &V::Id) -> Option<V> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.rows.get(id).map(|(_, v)| v.clone())
    }

    /// Rows passing `keep`, in insertion order.
    pub fn scan<F>(&self, keep: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut rows: Vec<&(u64, V)> = state.rows.values().filter(|(_, v)| keep(v)).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn modify<F>(&self, id: &V::Id, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let (_, row) = state.rows.get_mut(id)?;
        f(row);
        Some(row.clone())
    }

    pub fn remove(&self, id: &V::Id) -> Option<V> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.rows.remove(id).map(|(_, v)| v)
    }
}

impl<V: Entity + Clone> Default for RecordTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory account store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RecordTable<UserAccount>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        self.table.scan(|u| u.email == email).into_iter().next()
    }

    fn insert(&self, user: UserAccount) -> DomainResult<UserAccount> {
        self.table.insert_unless(user.clone(), |existing| {
            (existing.email == user.email).then(|| format!("email {} already registered", user.email))
        })
    }
}

/// In-memory employee store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    table: RecordTable<Employee>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn insert(&self, employee: Employee) -> DomainResult<Employee> {
        self.table.insert_unless(employee, |_| None)
    }

    fn get(&self, id: &EmployeeId) -> Option<Employee> {
        self.table.get(id)
    }

    fn list(&self) -> Vec<Employee> {
        self.table.scan(|_| true)
    }

    fn find_by_designation_or_department(
        &self,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> Vec<Employee> {
        self.table
            .scan(|e| e.matches_designation_or_department(designation, department))
    }

    fn update(&self, id: &EmployeeId, patch: &EmployeePatch) -> Option<Employee> {
        self.table.modify(id, |e| e.apply_patch(patch))
    }

    fn delete(&self, id: &EmployeeId) -> Option<Employee> {
        self.table.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use staffdir_core::UserId;

    use super::*;
    use crate::NewEmployee;

    fn employee(first: &str, designation: &str, department: &str) -> Employee {
        Employee::create(
            EmployeeId::new(),
            NewEmployee {
                first_name: Some(first.into()),
                designation: Some(designation.into()),
                department: Some(department.into()),
                ..NewEmployee::default()
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn account(email: &str) -> UserAccount {
        UserAccount {
            id: UserId::new(),
            username: "someone".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryEmployeeStore::new();
        for name in ["a", "b", "c", "d"] {
            store.insert(employee(name, "Dev", "Eng")).unwrap();
        }
        let names: Vec<_> = store
            .list()
            .into_iter()
            .map(|e| e.first_name.unwrap())
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn update_and_delete_report_unknown_ids() {
        let store = InMemoryEmployeeStore::new();
        let missing = EmployeeId::new();
        assert!(store.update(&missing, &EmployeePatch::default()).is_none());
        assert!(store.delete(&missing).is_none());
    }

    #[test]
    fn update_returns_new_version_and_delete_removes() {
        let store = InMemoryEmployeeStore::new();
        let e = store.insert(employee("a", "Dev", "Eng")).unwrap();

        let updated = store
            .update(
                &e.id,
                &EmployeePatch {
                    department: Some(Some("Ops".into())),
                    ..EmployeePatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.department.as_deref(), Some("Ops"));
        assert_eq!(store.get(&e.id), Some(updated.clone()));

        assert_eq!(store.delete(&e.id), Some(updated));
        assert!(store.get(&e.id).is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn designation_or_department_filter() {
        let store = InMemoryEmployeeStore::new();
        store.insert(employee("a", "Dev", "Eng")).unwrap();
        store.insert(employee("b", "Manager", "Eng")).unwrap();
        store.insert(employee("c", "Manager", "Sales")).unwrap();

        assert_eq!(store.find_by_designation_or_department(Some("Dev"), None).len(), 1);
        assert_eq!(store.find_by_designation_or_department(None, Some("Eng")).len(), 2);
        assert_eq!(
            store
                .find_by_designation_or_department(Some("Dev"), Some("Sales"))
                .len(),
            2
        );
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let store = InMemoryUserStore::new();
        store.insert(account("a@example.com")).unwrap();
        assert!(matches!(
            store.insert(account("a@example.com")),
            Err(DomainError::Conflict(_))
        ));
        assert!(store.find_by_email("a@example.com").is_some());
        assert!(store.find_by_email("b@example.com").is_none());
    }
}
