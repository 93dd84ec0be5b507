use crate::db::log::load_audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    match regex::Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// ANSI color by event type
fn color_for_event(op: &str) -> Colour {
    match op {
        "create" => Colour::Green,
        "delete" | "hard_delete" => Colour::Red,
        "update" => Colour::Yellow,
        "import" => Colour::Cyan,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool, limit: usize) -> AppResult<()> {
        let entries = load_audit(&pool.conn, limit)?;

        if entries.is_empty() {
            println!("📜 Audit log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let event = color_for_event(&e.event_type).paint(e.event_type.as_str());
                match (e.entity_type.is_empty(), e.entity_id.is_empty()) {
                    (true, _) => event.to_string(),
                    (false, true) => format!("{event} ({})", e.entity_type),
                    (false, false) => format!("{event} ({} #{})", e.entity_type, e.entity_id),
                }
            })
            .collect();

        let label_w = labels
            .iter()
            .map(|l| strip_ansi(l).len())
            .max()
            .unwrap_or(10)
            .min(48);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Audit log (newest first):\n");

        for (e, label) in entries.iter().zip(labels) {
            let padding = " ".repeat(label_w.saturating_sub(strip_ansi(&label).len()));
            let user = if e.user_id.is_empty() {
                "-"
            } else {
                e.user_id.as_str()
            };

            println!(
                "{:>id_w$}: {} | {:<10} | {}{} => {}",
                e.id,
                e.created_at,
                user,
                label,
                padding,
                e.description,
                id_w = id_w
            );
        }

        Ok(())
    }
}
