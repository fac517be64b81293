use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::{AppError, AppResult};
use crate::models::cadet::CadetForm;
use crate::models::gender::Gender;
use crate::store::open_backend;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        gender,
        regimental,
        phone,
        email,
        optional,
    } = cmd
    {
        let gender = Gender::from_input(gender).ok_or_else(|| AppError::InvalidGender(gender.clone()))?;

        let form = CadetForm {
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
        let cadet = RosterLogic::add(backend.as_mut(), cfg.id_scheme, form)?;

        success(format!(
            "Cadet {} added with ID {}",
            cadet.full_name, cadet.unique_id
        ));
    }
    Ok(())
}
