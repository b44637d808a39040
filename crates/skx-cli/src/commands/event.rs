use skx_core::enums::{EventType, SkillLevel};
use skx_core::repository::EventFilter;
use skx_engine::events::EventDraft;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventCommands;
use crate::commands::shared::parse::{parse_enum, parse_schedule};
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx event`.
pub async fn handle(action: &EventCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        EventCommands::Create {
            host,
            event_type,
            skill,
            level,
            description,
            date,
            time,
            duration,
        } => {
            let draft = EventDraft {
                host_id: host,
                skill_name: skill,
                event_type: parse_enum::<EventType>(event_type, "event type")?,
                level: parse_enum::<SkillLevel>(level, "level")?,
                description,
                scheduled_at: parse_schedule(date, time)?,
                duration_minutes: *duration,
            };
            output(&ctx.engine.create_event(&draft).await?, flags.format)
        }
        EventCommands::Get { id } => output(&ctx.engine.get_event(id).await?, flags.format),
        EventCommands::List {
            event_type,
            level,
            search,
        } => {
            let filter = EventFilter {
                event_type: event_type
                    .as_deref()
                    .map(|raw| parse_enum::<EventType>(raw, "event type"))
                    .transpose()?,
                level: level
                    .as_deref()
                    .map(|raw| parse_enum::<SkillLevel>(raw, "level"))
                    .transpose()?,
                search: search.as_deref(),
            };
            let mut events = ctx.engine.list_events(&filter).await?;
            if let Some(limit) = flags.limit {
                events.truncate(limit as usize);
            }
            output(&events, flags.format)
        }
    }
}
