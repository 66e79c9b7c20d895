// Events, alarms and health come from the Legacy API's stat endpoints.

use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::legacy_models::{HealthSubsystem, LegacyAlarm, LegacyEvent};

use crate::cli::{AlarmsArgs, AlarmsCommand, EventsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Subsystem")]
    subsystem: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct AlarmRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct HealthRow {
    #[tabled(rename = "Subsystem")]
    subsystem: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "Guests")]
    guests: String,
    #[tabled(rename = "Adopted")]
    adopted: String,
    #[tabled(rename = "Disconnected")]
    disconnected: String,
}

fn event_row(e: &LegacyEvent) -> EventRow {
    EventRow {
        time: output::opt(e.datetime.as_deref()),
        key: output::opt(e.key.as_deref()),
        subsystem: output::opt(e.subsystem.as_deref()),
        message: output::opt(e.msg.as_deref()),
    }
}

fn alarm_row(a: &LegacyAlarm) -> AlarmRow {
    AlarmRow {
        id: a.id.clone(),
        time: output::opt(a.datetime.as_deref()),
        key: output::opt(a.key.as_deref()),
        message: output::opt(a.msg.as_deref()),
    }
}

fn health_row(h: &HealthSubsystem, color: bool) -> HealthRow {
    HealthRow {
        subsystem: h.subsystem.clone(),
        status: output::state(h.status.as_deref(), color),
        users: output::opt(h.num_user),
        guests: output::opt(h.num_guest),
        adopted: output::opt(h.num_adopted),
        disconnected: output::opt(h.num_disconnected),
    }
}

pub async fn events(
    client: &Client,
    args: &EventsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let events = client.legacy().list_events(None, args.limit).await?;
    let out = output::render_list(global.output, &events, event_row, |e| e.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn alarms(
    client: &Client,
    args: AlarmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let legacy = client.legacy();
    if let Some(AlarmsCommand::Archive { id }) = args.command {
        legacy.archive_alarm(None, &id).await?;
        output::print_done(&format!("Archived alarm {id}"), global.output, global.quiet);
        return Ok(());
    }

    let alarms = legacy.list_alarms(None, args.archived).await?;
    let out = output::render_list(global.output, &alarms, alarm_row, |a| a.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn health(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let subsystems = client.legacy().get_health(None).await?;
    let out = output::render_list(
        global.output,
        &subsystems,
        |h| health_row(h, color),
        |h| format!("{} {}", h.subsystem, h.status.as_deref().unwrap_or("unknown")),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
