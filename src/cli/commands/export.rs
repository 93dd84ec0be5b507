use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::logic::RenderOptions;
use crate::export::{ExportKind, ExportLogic};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        summary,
        filter,
        force,
    } = cmd
    {
        let filter = filter.to_filter()?;
        let kind = if *summary {
            ExportKind::Summary
        } else {
            ExportKind::Detail
        };
        let opts = RenderOptions {
            pdf_row_height: cfg.pdf_row_height,
            title: None,
        };

        let mut pool = DbPool::from_config(cfg)?;
        ExportLogic::export(
            &mut pool,
            &filter,
            kind,
            *format,
            &expand_tilde(file),
            *force,
            &opts,
            cfg.default_user.as_deref(),
        )?;
    }
    Ok(())
}
