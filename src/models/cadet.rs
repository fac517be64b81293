use super::gender::Gender;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// A roster member as persisted by the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cadet {
    /// Store-assigned record key. Older local stores never wrote one; see
    /// [`Cadet::ensure_id`].
    #[serde(default)]
    pub id: String,
    /// Display identifier (e.g. `SD/001` or `SW4`).
    pub unique_id: String,
    pub full_name: String,
    pub gender: Gender,
    pub regimental_number: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_roll_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Cadet {
    /// Build a new record from a validated form. `id` and `unique_id` are
    /// decided by the caller (store and identity assigner).
    pub fn from_form(id: String, unique_id: String, form: CadetForm) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            id,
            unique_id,
            full_name: form.full_name.trim().to_string(),
            gender: form.gender,
            regimental_number: form.regimental_number.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            university_roll_number: non_empty(form.university_roll_number),
            department: non_empty(form.department),
            date_of_birth: non_empty(form.date_of_birth),
            father_name: non_empty(form.father_name),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Case-insensitive match on full name or display ID.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.full_name.to_lowercase().contains(&needle)
            || self.unique_id.to_lowercase().contains(&needle)
    }

    /// True when `reference` names this cadet by store id or display ID.
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        let r = reference.trim();
        self.id == r || self.unique_id.eq_ignore_ascii_case(r)
    }

    /// Records without a store id fall back to their display ID, which is
    /// also what legacy present-lists refer to.
    pub fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = self.unique_id.clone();
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Local::now().to_rfc3339();
    }
}

/// Input collected by `add`: the same fields the roster form asks for.
#[derive(Debug, Clone)]
pub struct CadetForm {
    pub full_name: String,
    pub gender: Gender,
    pub regimental_number: String,
    pub phone: String,
    pub email: String,
    pub university_roll_number: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<String>,
    pub father_name: Option<String>,
}

impl CadetForm {
    /// Required-field check, in the order the form reports them.
    pub fn validate(&self) -> AppResult<()> {
        require("Full Name", &self.full_name)?;
        require("Regimental Number", &self.regimental_number)?;
        require("Phone", &self.phone)?;
        require("Email", &self.email)?;
        if let Some(dob) = self.date_of_birth.as_deref() {
            validate_dob(dob)?;
        }
        Ok(())
    }
}

/// Partial update applied by `edit`. `None` leaves a field untouched; an
/// empty string clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct CadetUpdate {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub regimental_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub university_roll_number: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<String>,
    pub father_name: Option<String>,
}

impl CadetUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.gender.is_none()
            && self.regimental_number.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.university_roll_number.is_none()
            && self.department.is_none()
            && self.date_of_birth.is_none()
            && self.father_name.is_none()
    }

    /// Required fields may be changed but never blanked.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(v) = &self.full_name {
            require("Full Name", v)?;
        }
        if let Some(v) = &self.regimental_number {
            require("Regimental Number", v)?;
        }
        if let Some(v) = &self.phone {
            require("Phone", v)?;
        }
        if let Some(v) = &self.email {
            require("Email", v)?;
        }
        if let Some(dob) = self.date_of_birth.as_deref()
            && !dob.trim().is_empty()
        {
            validate_dob(dob)?;
        }
        Ok(())
    }

    pub fn apply_to(self, cadet: &mut Cadet) {
        if let Some(v) = self.full_name {
            cadet.full_name = v.trim().to_string();
        }
        if let Some(v) = self.gender {
            cadet.gender = v;
        }
        if let Some(v) = self.regimental_number {
            cadet.regimental_number = v.trim().to_string();
        }
        if let Some(v) = self.phone {
            cadet.phone = v.trim().to_string();
        }
        if let Some(v) = self.email {
            cadet.email = v.trim().to_string();
        }
        if let Some(v) = self.university_roll_number {
            cadet.university_roll_number = non_empty(Some(v));
        }
        if let Some(v) = self.department {
            cadet.department = non_empty(Some(v));
        }
        if let Some(v) = self.date_of_birth {
            cadet.date_of_birth = non_empty(Some(v));
        }
        if let Some(v) = self.father_name {
            cadet.father_name = non_empty(Some(v));
        }
        cadet.touch();
    }
}

fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

fn validate_dob(dob: &str) -> AppResult<()> {
    crate::utils::date::parse_date(dob.trim())
        .map(|_| ())
        .ok_or_else(|| AppError::InvalidDate(dob.to_string()))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
