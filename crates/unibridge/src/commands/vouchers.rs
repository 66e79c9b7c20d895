use tabled::Tabled;

use unibridge_api::Client;
use unibridge_api::types::{Voucher, VoucherRequest};

use crate::cli::{GlobalOpts, VouchersArgs, VouchersCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Minutes")]
    minutes: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn voucher_row(v: &Voucher, color: bool) -> VoucherRow {
    VoucherRow {
        id: v.id.clone(),
        code: v.code.clone(),
        name: output::opt(v.name.as_deref()),
        minutes: output::opt(v.time_limit_minutes),
        status: output::state(Some(if v.expired { "expired" } else { "ok" }), color),
    }
}

pub async fn handle(
    client: &Client,
    args: VouchersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = client.integration();
    let color = output::should_color(global.color);

    let vouchers = match args.command {
        VouchersCommand::List(list) => api.list_vouchers(None, list.page()).await?.data,
        VouchersCommand::Create {
            name,
            count,
            minutes,
        } => {
            let request = VoucherRequest {
                count,
                name,
                time_limit_minutes: minutes,
                ..VoucherRequest::default()
            };
            api.create_vouchers(None, &request).await?
        }
        VouchersCommand::Delete { id } => {
            super::confirm(global, "revoke voucher")?;
            api.delete_voucher(None, &id).await?;
            output::print_done(&format!("Revoked voucher {id}"), global.output, global.quiet);
            return Ok(());
        }
    };

    let out = output::render_list(
        global.output,
        &vouchers,
        |v| voucher_row(v, color),
        |v| v.code.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
