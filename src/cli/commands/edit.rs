use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::{AppError, AppResult};
use crate::models::cadet::CadetUpdate;
use crate::models::gender::Gender;
use crate::store::open_backend;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        cadet,
        name,
        gender,
        regimental,
        phone,
        email,
        optional,
    } = cmd
    {
        let gender = gender
            .as_deref()
            .map(|g| Gender::from_input(g).ok_or_else(|| AppError::InvalidGender(g.to_string())))
            .transpose()?;

        let update = CadetUpdate {
            full_name: name.clone(),
            gender,
            regimental_number: regimental.clone(),
            phone: phone.clone(),
            email: email.clone(),
            university_roll_number: optional.roll.clone(),
            department: optional.department.clone(),
            date_of_birth: optional.dob.clone(),
            father_name: optional.father.clone(),
        };

        let mut backend = open_backend(cfg)?;
        let updated = RosterLogic::edit(backend.as_mut(), cfg.id_scheme, cadet, update)?;

        success(format!(
            "Cadet {} updated (ID {})",
            updated.full_name, updated.unique_id
        ));
    }
    Ok(())
}
