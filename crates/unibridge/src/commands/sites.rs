use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::types::{ApplicationInfo, Site};

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Reference")]
    reference: String,
}

fn site_row(s: &Site) -> SiteRow {
    SiteRow {
        id: s.id.clone(),
        name: s.name.clone(),
        reference: output::opt(s.internal_reference.as_deref()),
    }
}

fn site_detail(s: &Site) -> Vec<(&'static str, String)> {
    vec![
        ("ID", s.id.clone()),
        ("Name", s.name.clone()),
        ("Reference", output::opt(s.internal_reference.as_deref())),
    ]
}

pub async fn handle(client: &Client, args: SitesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = client.integration();
    let out = match args.command {
        SitesCommand::List { list, all } => {
            let sites = if all {
                api.list_all_sites().await?
            } else {
                api.list_sites(list.page()).await?.data
            };
            output::render_list(global.output, &sites, site_row, |s| s.id.clone())?
        }
        SitesCommand::Get { id } => {
            let site = api.get_site(id.as_deref()).await?;
            output::render_single(global.output, &site, site_detail, |s| s.id.clone())?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn info(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.integration().get_info().await?;
    let out = output::render_single(
        global.output,
        &info,
        |i: &ApplicationInfo| {
            vec![
                ("Version", i.application_version.clone()),
                ("Base URL", client.base_url().to_string()),
                ("Site", client.default_site().to_owned()),
            ]
        },
        |i| i.application_version.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
