use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::types::{Device, DeviceStatistics, PendingDevice};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "State")]
    state: String,
}

fn device_row(d: &Device, color: bool) -> DeviceRow {
    let firmware = match (&d.firmware_version, d.firmware_updatable) {
        (Some(v), true) => format!("{v} (update)"),
        (Some(v), false) => v.clone(),
        (None, _) => "-".into(),
    };
    DeviceRow {
        id: d.id.clone(),
        name: output::opt(d.name.as_deref()),
        model: output::opt(d.model.as_deref()),
        mac: d.mac_address.clone(),
        ip: output::opt(d.ip_address.as_deref()),
        state: output::state(d.state.as_deref(), color),
        firmware,
    }
}

fn device_detail(d: &Device) -> Vec<(&'static str, String)> {
    vec![
        ("ID", d.id.clone()),
        ("Name", output::opt(d.name.as_deref())),
        ("Model", output::opt(d.model.as_deref())),
        ("MAC", d.mac_address.clone()),
        ("IP", output::opt(d.ip_address.as_deref())),
        ("State", output::opt(d.state.as_deref())),
        ("Firmware", output::opt(d.firmware_version.as_deref())),
        ("Update available", output::flag(d.firmware_updatable, false)),
    ]
}

fn stats_detail(s: &DeviceStatistics) -> Vec<(&'static str, String)> {
    vec![
        ("Uptime (s)", output::opt(s.uptime_sec)),
        ("Last heartbeat", output::opt(s.last_heartbeat_at.as_deref())),
        ("CPU %", output::opt(s.cpu_utilization_pct)),
        ("Memory %", output::opt(s.memory_utilization_pct)),
    ]
}

fn pending_row(p: &PendingDevice) -> PendingRow {
    PendingRow {
        mac: p.mac_address.clone(),
        model: output::opt(p.model.as_deref()),
        ip: output::opt(p.ip_address.as_deref()),
        state: output::opt(p.state.as_deref()),
    }
}

pub async fn handle(
    client: &Client,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let out = match args.command {
        DevicesCommand::List(list) => {
            let page = api.list_devices(None, list.page()).await?;
            output::render_list(
                global.output,
                &page.data,
                |d| device_row(d, color),
                |d| d.id.clone(),
            )?
        }
        DevicesCommand::Get { id } => {
            let device = api.get_device(None, &id).await?;
            output::render_single(global.output, &device, device_detail, |d| d.id.clone())?
        }
        DevicesCommand::Stats { id } => {
            let stats = api.get_device_statistics(None, &id).await?;
            output::render_single(global.output, &stats, stats_detail, |_| id.clone())?
        }
        DevicesCommand::Pending(list) => {
            let page = api.list_pending_devices(list.page()).await?;
            output::render_list(global.output, &page.data, pending_row, |p| {
                p.mac_address.clone()
            })?
        }
        DevicesCommand::Restart { id } => {
            super::confirm(global, "restart device")?;
            api.restart_device(None, &id).await?;
            let done = format!("Restart requested for {id}");
            output::print_done(&done, global.output, global.quiet);
            return Ok(());
        }
        DevicesCommand::PowerCycle { id, port } => {
            super::confirm(global, "power-cycle port")?;
            api.power_cycle_port(None, &id, port).await?;
            output::print_done(
                &format!("Power cycle requested for {id} port {port}"),
                global.output,
                global.quiet,
            );
            return Ok(());
        }
        DevicesCommand::Locate { mac, off } => {
            client.legacy().locate_device(None, &mac, !off).await?;
            let verb = if off { "off" } else { "on" };
            let done = format!("Locate LED {verb} for {mac}");
            output::print_done(&done, global.output, global.quiet);
            return Ok(());
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
