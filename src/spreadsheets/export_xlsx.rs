use crate::domain::Deal;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Workbook, XlsxError};

const HEADERS: [&str; 6] = [
    "address",
    "price",
    "zestimate",
    "discount_pct",
    "daysOnZillow",
    "detailUrl",
];

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Same columns as the dashboard table, one row per deal.
pub fn deals_workbook(deals: &[Deal]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err(header))?;
    }

    for (i, deal) in deals.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &deal.address)
            .map_err(xlsx_err("address"))?;
        worksheet
            .write_number(r, 1, deal.price)
            .map_err(xlsx_err("price"))?;
        worksheet
            .write_number(r, 2, deal.zestimate)
            .map_err(xlsx_err("zestimate"))?;
        worksheet
            .write_number(r, 3, deal.discount_pct)
            .map_err(xlsx_err("discount"))?;
        if let Some(days) = deal.days_on_zillow {
            worksheet
                .write_number(r, 4, days)
                .map_err(xlsx_err("days on Zillow"))?;
        }
        worksheet
            .write_string(r, 5, &deal.detail_url)
            .map_err(xlsx_err("detail URL"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_deals_xlsx(deals: &[Deal], date: &str) -> ResultResp {
    let buffer = deals_workbook(deals)?;
    xlsx_response(buffer, &format!("deals_{date}.xlsx"))
}
