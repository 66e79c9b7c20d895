use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::legacy_models::LegacyClientEntry;
use unibridge_api::types::NetworkClient;

use crate::cli::{ClientsArgs, ClientsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
}

#[derive(Tabled)]
struct StationRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Guest")]
    guest: String,
}

fn client_row(c: &NetworkClient) -> ClientRow {
    ClientRow {
        id: c.id.clone(),
        name: output::opt(c.name.as_deref()),
        kind: output::opt(c.client_type.as_deref()),
        ip: output::opt(c.ip_address.as_deref()),
        mac: output::opt(c.mac_address.as_deref()),
    }
}

fn station_row(s: &LegacyClientEntry, color: bool) -> StationRow {
    let network = if s.is_wired == Some(true) {
        output::opt(s.network.as_deref())
    } else {
        output::opt(s.essid.as_deref().or(s.network.as_deref()))
    };
    StationRow {
        mac: s.mac.clone(),
        name: output::opt(s.name.as_deref().or(s.hostname.as_deref())),
        ip: output::opt(s.ip.as_deref()),
        network,
        signal: s.signal.map_or_else(|| "-".into(), |dbm| format!("{dbm} dBm")),
        guest: output::flag(s.is_guest.unwrap_or(false), color),
    }
}

pub async fn handle(
    client: &Client,
    args: ClientsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let legacy = client.legacy();
    let color = output::should_color(global.color);

    let done = match args.command {
        ClientsCommand::List(list) => {
            let page = client.integration().list_clients(None, list.page()).await?;
            let out =
                output::render_list(global.output, &page.data, client_row, |c| c.id.clone())?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        ClientsCommand::Active => {
            let stations = legacy.list_active_clients(None).await?;
            let out = output::render_list(
                global.output,
                &stations,
                |s| station_row(s, color),
                |s| s.mac.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        ClientsCommand::Block { mac } => {
            legacy.block_client(None, &mac).await?;
            format!("Blocked {mac}")
        }
        ClientsCommand::Unblock { mac } => {
            legacy.unblock_client(None, &mac).await?;
            format!("Unblocked {mac}")
        }
        ClientsCommand::Kick { mac } => {
            legacy.kick_client(None, &mac).await?;
            format!("Disconnected {mac}")
        }
        ClientsCommand::Forget { mac } => {
            super::confirm(global, "forget client")?;
            legacy.forget_client(None, &mac).await?;
            format!("Forgot {mac}")
        }
    };
    output::print_done(&done, global.output, global.quiet);
    Ok(())
}
