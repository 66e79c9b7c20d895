use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::types::{AclRule, AclRuleOrdering};

use crate::cli::{AclArgs, AclCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AclRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Position")]
    position: usize,
    #[tabled(rename = "Rule ID")]
    id: String,
}

fn render_ordering(ordering: &AclRuleOrdering, format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Table {
        return Ok(output::table(
            ordering
                .ordered_acl_rule_ids
                .iter()
                .enumerate()
                .map(|(i, id)| OrderRow {
                    position: i + 1,
                    id: id.clone(),
                }),
        ));
    }
    output::render_single(format, ordering, |_| Vec::new(), |o| {
        o.ordered_acl_rule_ids.join("\n")
    })
}

pub async fn handle(client: &Client, args: AclArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let out = match args.command {
        AclCommand::List(list) => {
            let page = api.list_acl_rules(None, list.page()).await?;
            output::render_list(
                global.output,
                &page.data,
                |r: &AclRule| AclRow {
                    id: r.id.clone(),
                    index: output::opt(r.index),
                    name: r.name.clone(),
                    kind: r.rule_type.clone(),
                    action: r.action.clone(),
                    enabled: output::flag(r.enabled, color),
                },
                |r| r.id.clone(),
            )?
        }
        AclCommand::Enable { id } => return toggle(client, &id, true, global).await,
        AclCommand::Disable { id } => return toggle(client, &id, false, global).await,
        AclCommand::Order => {
            let ordering = api.get_acl_rule_ordering(None).await?;
            render_ordering(&ordering, global.output)?
        }
        AclCommand::Reorder { ids } => {
            let ordering = api.reorder_acl_rules(None, &ids).await?;
            render_ordering(&ordering, global.output)?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn toggle(
    client: &Client,
    id: &str,
    enabled: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rule = client
        .integration()
        .set_acl_rule_enabled(None, id, enabled)
        .await?;
    let state = if rule.enabled { "Enabled" } else { "Disabled" };
    output::print_updated(
        &rule,
        &format!("{state} ACL rule {} ({})", rule.name, rule.id),
        global.output,
        global.quiet,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ordering_table_numbers_rules_from_one() {
        let ordering = AclRuleOrdering {
            ordered_acl_rule_ids: vec!["r2".into(), "r1".into()],
        };
        let table = render_ordering(&ordering, OutputFormat::Table).unwrap();
        let r2 = table.find("r2").unwrap();
        let r1 = table.find("r1").unwrap();
        assert!(r2 < r1);

        let plain = render_ordering(&ordering, OutputFormat::Plain).unwrap();
        assert_eq!(plain, "r2\nr1");
    }
}
