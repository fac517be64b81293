use crate::core::identity::{IdScheme, assign_id, issue_id};
use crate::core::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::cadet::{Cadet, CadetForm, CadetUpdate};
use crate::store::{AuditLog, CadetStore, CounterStore};
use std::collections::HashSet;

/// High-level business logic for roster maintenance.
pub struct RosterLogic;

/// Regimental numbers compare trimmed and case-insensitively.
fn reg_key(regimental_number: &str) -> String {
    regimental_number.trim().to_uppercase()
}

impl RosterLogic {
    /// Validate, assign a display ID, reject duplicate regimental numbers and
    /// persist. Nothing is written when any check fails.
    pub fn add<S>(store: &mut S, scheme: IdScheme, form: CadetForm) -> AppResult<Cadet>
    where
        S: CadetStore + CounterStore + AuditLog + ?Sized,
    {
        form.validate()?;

        let key = reg_key(&form.regimental_number);
        if store
            .list_cadets()?
            .iter()
            .any(|c| reg_key(&c.regimental_number) == key)
        {
            return Err(AppError::DuplicateRegimental(
                form.regimental_number.trim().to_string(),
            ));
        }

        let unique_id = issue_id(scheme, store, form.gender, &form.regimental_number)?;
        let cadet = store.insert_cadet(Cadet::from_form(String::new(), unique_id, form))?;

        audit(
            store,
            "add",
            &cadet.unique_id,
            &format!("Cadet {} added", cadet.full_name),
        );
        Ok(cadet)
    }

    /// Apply a partial update to the cadet named by `reference`.
    ///
    /// Under the derived scheme the display ID is recomputed from the
    /// (possibly new) gender and regimental number; sequence IDs are opaque
    /// and never change.
    pub fn edit<S>(
        store: &mut S,
        scheme: IdScheme,
        reference: &str,
        update: CadetUpdate,
    ) -> AppResult<Cadet>
    where
        S: CadetStore + AuditLog + ?Sized,
    {
        if update.is_empty() {
            return Err(AppError::Validation("Nothing to update".into()));
        }
        update.validate()?;

        let roster = store.list_cadets()?;
        let mut cadet = roster
            .iter()
            .find(|c| c.is_referenced_by(reference))
            .cloned()
            .ok_or_else(|| AppError::CadetNotFound(reference.to_string()))?;

        if let Some(new_reg) = update.regimental_number.as_deref() {
            let key = reg_key(new_reg);
            if roster
                .iter()
                .any(|c| c.id != cadet.id && reg_key(&c.regimental_number) == key)
            {
                return Err(AppError::DuplicateRegimental(new_reg.trim().to_string()));
            }
        }

        update.apply_to(&mut cadet);
        if scheme == IdScheme::Derived {
            cadet.unique_id = assign_id(cadet.gender, &cadet.regimental_number);
        }

        store.update_cadet(&cadet)?;
        audit(
            store,
            "edit",
            &cadet.unique_id,
            &format!("Cadet {} updated", cadet.full_name),
        );
        Ok(cadet)
    }

    /// Delete the cadet named by `reference`. Attendance history that
    /// mentions the cadet is kept; issued sequence numbers are not reused.
    pub fn delete<S>(store: &mut S, reference: &str) -> AppResult<Cadet>
    where
        S: CadetStore + AuditLog + ?Sized,
    {
        let cadet = Self::resolve(&*store, reference)?;
        store.delete_cadet(&cadet.id)?;
        audit(
            store,
            "del",
            &cadet.unique_id,
            &format!("Cadet {} deleted", cadet.full_name),
        );
        Ok(cadet)
    }

    /// Find a cadet by store id or display ID.
    pub fn resolve<S>(store: &S, reference: &str) -> AppResult<Cadet>
    where
        S: CadetStore + ?Sized,
    {
        store
            .list_cadets()?
            .into_iter()
            .find(|c| c.is_referenced_by(reference))
            .ok_or_else(|| AppError::CadetNotFound(reference.to_string()))
    }

    /// Roster in store order, optionally filtered by name / display ID.
    pub fn list<S>(store: &S, search: Option<&str>) -> AppResult<Vec<Cadet>>
    where
        S: CadetStore + ?Sized,
    {
        let cadets = store.list_cadets()?;
        Ok(match search {
            Some(term) => cadets.into_iter().filter(|c| c.matches_search(term)).collect(),
            None => cadets,
        })
    }

    /// Cadets that repeat an earlier cadet's regimental number, in roster
    /// order. The first occurrence is the one kept.
    pub fn find_duplicates(cadets: &[Cadet]) -> Vec<Cadet> {
        let mut seen = HashSet::new();
        cadets
            .iter()
            .filter(|c| !seen.insert(reg_key(&c.regimental_number)))
            .cloned()
            .collect()
    }

    /// One-off cleanup for stores written before uniqueness was enforced:
    /// remove every later duplicate.
    pub fn dedupe<S>(store: &mut S) -> AppResult<Vec<Cadet>>
    where
        S: CadetStore + AuditLog + ?Sized,
    {
        let duplicates = Self::find_duplicates(&store.list_cadets()?);
        for c in &duplicates {
            store.delete_cadet(&c.id)?;
        }
        if !duplicates.is_empty() {
            audit(
                store,
                "dedupe",
                "cadets",
                &format!("Removed {} duplicate cadet(s)", duplicates.len()),
            );
        }
        Ok(duplicates)
    }
}
