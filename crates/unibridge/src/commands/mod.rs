//! Command handlers. Each family takes the client, its parsed arguments,
//! and the global options, and prints its own output.

pub mod acl;
pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod events;
pub mod network;
pub mod sites;
pub mod vouchers;

use unibridge_api::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(cmd: Command, client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Info => sites::info(client, global).await,
        Command::Sites(args) => sites::handle(client, args, global).await,
        Command::Devices(args) => devices::handle(client, args, global).await,
        Command::Clients(args) => clients::handle(client, args, global).await,
        Command::Wifi(args) => network::wifi(client, args, global).await,
        Command::Networks(args) => network::networks(client, args, global).await,
        Command::Firewall(args) => network::firewall(client, args, global).await,
        Command::Acl(args) => acl::handle(client, args, global).await,
        Command::Vouchers(args) => vouchers::handle(client, args, global).await,
        Command::Events(args) => events::events(client, &args, global).await,
        Command::Alarms(args) => events::alarms(client, args, global).await,
        Command::Health => events::health(client, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
    }
}

/// Destructive commands run only with `--yes`.
fn confirm(global: &GlobalOpts, action: &str) -> Result<(), CliError> {
    if global.yes {
        Ok(())
    } else {
        Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
    }
}
