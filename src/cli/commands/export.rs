use crate::cli::parser::{Commands, ExportWhat};
use crate::config::Config;
use crate::core::log::audit;
use crate::core::report::default_period;
use crate::core::view::RosterView;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest, ExportTarget};
use crate::store::open_backend;
use crate::utils::date::{parse_date_arg, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        date,
        from,
        to,
        select,
        format,
        dir,
        force,
    } = cmd
    {
        let today = today();

        let target = match what {
            ExportWhat::Roster => ExportTarget::Roster {
                select: select.clone(),
            },
            ExportWhat::Attendance => ExportTarget::Attendance {
                date: date.as_deref().map(parse_date_arg).transpose()?.unwrap_or(today),
            },
            ExportWhat::Monthly => {
                let (default_from, default_to) = default_period(today);
                ExportTarget::Monthly {
                    from: from.as_deref().map(parse_date_arg).transpose()?.unwrap_or(default_from),
                    to: to.as_deref().map(parse_date_arg).transpose()?.unwrap_or(default_to),
                }
            }
        };

        let request = ExportRequest {
            target,
            format: format.unwrap_or(cfg.default_export_format),
            dir: ExportLogic::resolve_dir(dir.as_deref(), cfg.export_dir.as_deref()),
            force: *force,
        };

        let mut backend = open_backend(cfg)?;
        let snapshot = RosterView::open(backend.as_ref())?.snapshot();
        let path = ExportLogic::export(&snapshot, &request, today)?;

        audit(
            backend.as_mut(),
            "export",
            request.format.as_str(),
            &format!("Exported {}", path.display()),
        );
    }
    Ok(())
}
