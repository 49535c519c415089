//! Operation layer: maps named directory operations onto the stores.
//!
//! `signup`/`login` establish identity and mint a token. Every other
//! operation is protected: it runs the credential gate on the caller's
//! context first and aborts with `DirectoryError::Auth` on rejection.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use staffdir_auth::{
    CredentialGate, DEFAULT_BCRYPT_COST, IdentityClaims, PrincipalId, RequestContext,
    SigningSecret, TokenIssuer, hash_password, verify_password,
};
use staffdir_core::{DomainError, EmployeeId, UserId};

use crate::{
    DirectoryError, Employee, EmployeePatch, EmployeeStore, NewEmployee, UserAccount, UserStore,
};

pub struct DirectoryService {
    users: Arc<dyn UserStore>,
    employees: Arc<dyn EmployeeStore>,
    issuer: TokenIssuer,
    gate: CredentialGate,
    bcrypt_cost: u32,
}

impl DirectoryService {
    /// Issuer and gate are both built from `secret`, so they always agree.
    pub fn new(
        secret: Arc<SigningSecret>,
        users: Arc<dyn UserStore>,
        employees: Arc<dyn EmployeeStore>,
    ) -> Self {
        Self {
            users,
            employees,
            issuer: TokenIssuer::new(secret.clone()),
            gate: CredentialGate::new(secret),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn gate(&self) -> &CredentialGate {
        &self.gate
    }

    // ─────────────────────────────────────────────────────────────────────
    // Identity-establishing operations
    // ─────────────────────────────────────────────────────────────────────

    /// Register a new account and return a token for it.
    pub fn signup(&self, username: &str, email: &str, password: &str) -> Result<String, DirectoryError> {
        require_non_blank("username", username)?;
        require_non_blank("email", email)?;
        require_non_blank("password", password)?;

        if self.users.find_by_email(email).is_some() {
            return Err(DirectoryError::EmailTaken);
        }

        let account = UserAccount {
            id: UserId::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password, self.bcrypt_cost)?,
            created_at: Utc::now(),
        };

        // A concurrent signup may have taken the email since the check above.
        let account = self.users.insert(account).map_err(|e| match e {
            DomainError::Conflict(_) => DirectoryError::EmailTaken,
            other => DirectoryError::Domain(other),
        })?;

        info!(user_id = %account.id, "user signed up");
        self.issue_for(&account)
    }

    /// Check credentials and return a fresh token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, DirectoryError> {
        let account = self
            .users
            .find_by_email(email)
            .ok_or(DirectoryError::UserNotFound)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(DirectoryError::IncorrectPassword);
        }

        info!(user_id = %account.id, "user logged in");
        self.issue_for(&account)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Protected operations
    // ─────────────────────────────────────────────────────────────────────

    /// The identity the gate resolves for `ctx`.
    pub fn whoami(&self, ctx: &mut RequestContext) -> Result<IdentityClaims, DirectoryError> {
        self.admit(ctx)
    }

    pub fn get_employees(&self, ctx: &mut RequestContext) -> Result<Vec<Employee>, DirectoryError> {
        self.admit(ctx)?;
        Ok(self.employees.list())
    }

    pub fn search_employee(
        &self,
        ctx: &mut RequestContext,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, DirectoryError> {
        self.admit(ctx)?;
        Ok(self.employees.get(id))
    }

    /// Employees whose designation or department equals the given filter.
    ///
    /// At least one filter must be supplied.
    pub fn search_by_designation_or_department(
        &self,
        ctx: &mut RequestContext,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> Result<Vec<Employee>, DirectoryError> {
        self.admit(ctx)?;
        if designation.is_none() && department.is_none() {
            return Err(DomainError::validation("designation or department is required").into());
        }
        Ok(self
            .employees
            .find_by_designation_or_department(designation, department))
    }

    pub fn add_employee(
        &self,
        ctx: &mut RequestContext,
        input: NewEmployee,
    ) -> Result<Employee, DirectoryError> {
        let caller = self.admit(ctx)?;
        let employee = Employee::create(EmployeeId::new(), input, Utc::now())?;
        let employee = self.employees.insert(employee)?;
        debug!(principal = %caller.sub, employee_id = %employee.id, "employee added");
        Ok(employee)
    }

    pub fn update_employee(
        &self,
        ctx: &mut RequestContext,
        id: &EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Option<Employee>, DirectoryError> {
        let caller = self.admit(ctx)?;
        patch.validate()?;
        let updated = self.employees.update(id, &patch);
        debug!(principal = %caller.sub, employee_id = %id, found = updated.is_some(), "employee update");
        Ok(updated)
    }

    pub fn delete_employee(
        &self,
        ctx: &mut RequestContext,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, DirectoryError> {
        let caller = self.admit(ctx)?;
        let removed = self.employees.delete(id);
        debug!(principal = %caller.sub, employee_id = %id, found = removed.is_some(), "employee delete");
        Ok(removed)
    }

    fn admit(&self, ctx: &mut RequestContext) -> Result<IdentityClaims, DirectoryError> {
        Ok(self.gate.authorize(ctx)?)
    }

    fn issue_for(&self, account: &UserAccount) -> Result<String, DirectoryError> {
        let principal = PrincipalId::new(account.id.to_string())?;
        Ok(self.issuer.issue(&principal)?)
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use staffdir_auth::{AuthError, MissingCredential};

    use super::*;
    use crate::{InMemoryEmployeeStore, InMemoryUserStore};

    const TEST_COST: u32 = 4;

    fn service_with(secret: &str) -> DirectoryService {
        DirectoryService::new(
            Arc::new(SigningSecret::new(secret).unwrap()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryEmployeeStore::new()),
        )
        .with_bcrypt_cost(TEST_COST)
    }

    fn service() -> DirectoryService {
        service_with("directory-test-secret")
    }

    fn bearer(token: &str) -> RequestContext {
        RequestContext::with_authorization(format!("Bearer {token}"))
    }

    fn signed_in(svc: &DirectoryService) -> RequestContext {
        let token = svc.signup("alice", "alice@example.com", "pw").unwrap();
        bearer(&token)
    }

    fn ada() -> NewEmployee {
        NewEmployee {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            designation: Some("Engineer".into()),
            department: Some("R&D".into()),
            salary: Some(100.0),
            ..NewEmployee::default()
        }
    }

    #[test]
    fn signup_then_login_yield_tokens_for_same_principal() {
        let svc = service();
        let signup_token = svc.signup("alice", "alice@example.com", "pw").unwrap();
        let login_token = svc.login("alice@example.com", "pw").unwrap();

        let a = svc.whoami(&mut bearer(&signup_token)).unwrap();
        let b = svc.whoami(&mut bearer(&login_token)).unwrap();
        assert_eq!(a.sub, b.sub);
    }

    #[test]
    fn duplicate_signup_is_rejected() {
        let svc = service();
        svc.signup("alice", "alice@example.com", "pw").unwrap();
        let err = svc.signup("alice2", "alice@example.com", "pw2").unwrap_err();
        assert_eq!(err, DirectoryError::EmailTaken);
        assert_eq!(err.to_string(), "Email is already registered.");
    }

    #[test]
    fn blank_signup_fields_are_rejected() {
        let svc = service();
        assert!(matches!(
            svc.signup("  ", "a@example.com", "pw"),
            Err(DirectoryError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn login_failures_are_classified() {
        let svc = service();
        svc.signup("alice", "alice@example.com", "pw").unwrap();

        assert_eq!(
            svc.login("bob@example.com", "pw"),
            Err(DirectoryError::UserNotFound)
        );
        assert_eq!(
            svc.login("alice@example.com", "nope"),
            Err(DirectoryError::IncorrectPassword)
        );
    }

    #[test]
    fn protected_operations_require_a_credential() {
        let svc = service();
        let mut ctx = RequestContext::new(Default::default());
        assert_eq!(
            svc.get_employees(&mut ctx),
            Err(DirectoryError::Auth(AuthError::MissingCredential(
                MissingCredential::Header
            )))
        );

        let mut ctx = RequestContext::without_metadata();
        assert_eq!(
            svc.add_employee(&mut ctx, ada()),
            Err(DirectoryError::Auth(AuthError::MalformedRequest))
        );
    }

    #[test]
    fn token_from_another_deployment_is_rejected() {
        let other = service_with("some-other-secret");
        let token = other.signup("eve", "eve@example.com", "pw").unwrap();

        let svc = service();
        assert_eq!(
            svc.get_employees(&mut bearer(&token)),
            Err(DirectoryError::Auth(AuthError::InvalidOrExpiredCredential))
        );
    }

    #[test]
    fn rejected_call_leaves_store_untouched() {
        let svc = service();
        let _ = svc.add_employee(&mut RequestContext::with_authorization("Bearer junk"), ada());

        let mut ctx = signed_in(&svc);
        assert!(svc.get_employees(&mut ctx).unwrap().is_empty());
    }

    #[test]
    fn employee_crud_flow() {
        let svc = service();
        let mut ctx = signed_in(&svc);

        let created = svc.add_employee(&mut ctx, ada()).unwrap();
        assert!(ctx.identity().is_some());
        assert_eq!(svc.get_employees(&mut ctx).unwrap(), vec![created.clone()]);
        assert_eq!(
            svc.search_employee(&mut ctx, &created.id).unwrap(),
            Some(created.clone())
        );

        let updated = svc
            .update_employee(
                &mut ctx,
                &created.id,
                EmployeePatch {
                    designation: Some(Some("Lead".into())),
                    ..EmployeePatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.designation.as_deref(), Some("Lead"));

        let found = svc
            .search_by_designation_or_department(&mut ctx, Some("Lead"), None)
            .unwrap();
        assert_eq!(found, vec![updated.clone()]);

        assert_eq!(
            svc.delete_employee(&mut ctx, &created.id).unwrap(),
            Some(updated)
        );
        assert_eq!(svc.search_employee(&mut ctx, &created.id).unwrap(), None);
        assert_eq!(svc.delete_employee(&mut ctx, &created.id).unwrap(), None);
    }

    #[test]
    fn search_without_filters_is_a_validation_error() {
        let svc = service();
        let mut ctx = signed_in(&svc);
        assert!(matches!(
            svc.search_by_designation_or_department(&mut ctx, None, None),
            Err(DirectoryError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn invalid_patch_is_rejected_before_store() {
        let svc = service();
        let mut ctx = signed_in(&svc);
        let created = svc.add_employee(&mut ctx, ada()).unwrap();

        let res = svc.update_employee(
            &mut ctx,
            &created.id,
            EmployeePatch {
                salary: Some(Some(-5.0)),
                ..EmployeePatch::default()
            },
        );
        assert!(matches!(res, Err(DirectoryError::Domain(DomainError::Validation(_)))));
        assert_eq!(
            svc.search_employee(&mut ctx, &created.id).unwrap().unwrap().salary,
            Some(100.0)
        );
    }
}
