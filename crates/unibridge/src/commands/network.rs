// WiFi broadcasts, networks and firewall policies share the
// list / enable / disable shape.

use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::types::{FirewallPolicy, Network, WifiBroadcast};

use crate::cli::{GlobalOpts, ToggleArgs, ToggleCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct WifiRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Management")]
    management: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

#[derive(Tabled)]
struct PolicyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

fn toggled(name: &str, id: &str, enabled: bool) -> String {
    let state = if enabled { "Enabled" } else { "Disabled" };
    if name.is_empty() {
        format!("{state} {id}")
    } else {
        format!("{state} {name} ({id})")
    }
}

pub async fn wifi(client: &Client, args: ToggleArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let (id, enabled) = match args.command {
        ToggleCommand::List(list) => {
            let page = api.list_wifi_broadcasts(None, list.page()).await?;
            let out = output::render_list(
                global.output,
                &page.data,
                |w: &WifiBroadcast| WifiRow {
                    id: w.id.clone(),
                    name: w.name.clone(),
                    kind: w.broadcast_type.clone(),
                    enabled: output::flag(w.enabled, color),
                },
                |w| w.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        ToggleCommand::Enable { id } => (id, true),
        ToggleCommand::Disable { id } => (id, false),
    };

    let updated = api.set_wifi_broadcast_enabled(None, &id, enabled).await?;
    output::print_updated(
        &updated,
        &toggled(&updated.name, &updated.id, updated.enabled),
        global.output,
        global.quiet,
    )
}

pub async fn networks(
    client: &Client,
    args: ToggleArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let (id, enabled) = match args.command {
        ToggleCommand::List(list) => {
            let page = api.list_networks(None, list.page()).await?;
            let out = output::render_list(
                global.output,
                &page.data,
                |n: &Network| NetworkRow {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    vlan: output::opt(n.vlan_id),
                    management: output::opt(n.management.as_deref()),
                    enabled: output::flag(n.enabled, color),
                },
                |n| n.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        ToggleCommand::Enable { id } => (id, true),
        ToggleCommand::Disable { id } => (id, false),
    };

    let updated = api.set_network_enabled(None, &id, enabled).await?;
    output::print_updated(
        &updated,
        &toggled(&updated.name, &updated.id, updated.enabled),
        global.output,
        global.quiet,
    )
}

pub async fn firewall(
    client: &Client,
    args: ToggleArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let (id, enabled) = match args.command {
        ToggleCommand::List(list) => {
            let page = api.list_firewall_policies(None, list.page()).await?;
            let out = output::render_list(
                global.output,
                &page.data,
                |p: &FirewallPolicy| PolicyRow {
                    id: p.id.clone(),
                    index: output::opt(p.index),
                    name: p.name.clone(),
                    enabled: output::flag(p.enabled, color),
                },
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        ToggleCommand::Enable { id } => (id, true),
        ToggleCommand::Disable { id } => (id, false),
    };

    let updated = api.set_firewall_policy_enabled(None, &id, enabled).await?;
    output::print_updated(
        &updated,
        &toggled(&updated.name, &updated.id, updated.enabled),
        global.output,
        global.quiet,
    )
}
