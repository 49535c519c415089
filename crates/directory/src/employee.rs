use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use staffdir_core::{DomainError, DomainResult, EmployeeId, Entity};

/// Employee record.
///
/// Every descriptive field is optional; only `id` and `created_at` are always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Employee {
    /// Materialize a new record from validated input.
    pub fn create(id: EmployeeId, input: NewEmployee, created_at: DateTime<Utc>) -> DomainResult<Self> {
        validate_salary(input.salary)?;
        Ok(Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            gender: input.gender,
            designation: input.designation,
            salary: input.salary,
            date_of_joining: input.date_of_joining,
            department: input.department,
            employee_photo: input.employee_photo,
            created_at,
        })
    }

    /// Overwrite every field the patch sets; leave the rest untouched.
    pub fn apply_patch(&mut self, patch: &EmployeePatch) {
        overwrite(&mut self.first_name, &patch.first_name);
        overwrite(&mut self.last_name, &patch.last_name);
        overwrite(&mut self.email, &patch.email);
        overwrite(&mut self.gender, &patch.gender);
        overwrite(&mut self.designation, &patch.designation);
        overwrite(&mut self.salary, &patch.salary);
        overwrite(&mut self.date_of_joining, &patch.date_of_joining);
        overwrite(&mut self.department, &patch.department);
        overwrite(&mut self.employee_photo, &patch.employee_photo);
    }

    /// Matches when a supplied filter equals the corresponding field.
    pub fn matches_designation_or_department(
        &self,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> bool {
        let eq = |field: &Option<String>, wanted: Option<&str>| match (field, wanted) {
            (Some(f), Some(w)) => f == w,
            _ => false,
        };
        eq(&self.designation, designation) || eq(&self.department, department)
    }
}

/// Input for `add_employee`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

/// Partial update for `update_employee`.
///
/// Per field: `None` keeps the current value, `Some(None)` clears it and
/// `Some(Some(v))` sets it. In JSON an absent key keeps, `null` clears.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmployeePatch {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub designation: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub date_of_joining: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub employee_photo: Option<Option<String>>,
}

impl EmployeePatch {
    pub fn validate(&self) -> DomainResult<()> {
        validate_salary(self.salary.flatten())
    }
}

/// A key that is present (even as `null`) deserializes to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn overwrite<T: Clone>(slot: &mut Option<T>, value: &Option<Option<T>>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn validate_salary(salary: Option<f64>) -> DomainResult<()> {
    match salary {
        Some(s) if !s.is_finite() || s < 0.0 => Err(DomainError::validation(
            "salary must be a non-negative number",
        )),
        _ => Ok(()),
    }
}
